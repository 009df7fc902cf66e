//! Arguments shared by the `run` and `plan` commands.

use clap::Args;

use crate::config::RevConfig;

/// Skip-list overrides.
///
/// Each flag may be repeated. When given, the flag's values replace the
/// corresponding list from the configuration file rather than extending it.
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Glob pattern for files that keep their name (repeatable)
    #[arg(long = "skip-rename", value_name = "PATTERN")]
    pub skip_rename: Vec<String>,

    /// Glob pattern for files that are never scanned for references (repeatable)
    #[arg(long = "skip-find-deps", value_name = "PATTERN")]
    pub skip_find_deps: Vec<String>,
}

impl PatternArgs {
    pub fn apply(&self, config: &mut RevConfig) {
        if !self.skip_rename.is_empty() {
            config.skip_rename = self.skip_rename.clone();
        }
        if !self.skip_find_deps.is_empty() {
            config.skip_find_deps = self.skip_find_deps.clone();
        }
    }
}
