//! The `run` command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::{CliConfig, PatternArgs};
use crate::revision::revise;
use crate::utils::{ProgressBar, join_relative};

/// Revision a file tree and write the manifest.
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Directory containing the assets to revision
    pub input: PathBuf,

    /// Directory receiving the revisioned tree (created if missing)
    pub output: PathBuf,

    #[command(flatten)]
    pub patterns: PatternArgs,

    /// Manifest filename, relative to the output directory
    #[arg(long, value_name = "NAME")]
    pub manifest: Option<String>,

    /// Maximum number of files scanned concurrently
    #[arg(long, value_name = "N")]
    pub max_parallel: Option<usize>,
}

impl RunCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let mut config = cli.load_rev_config().await?;
        self.patterns.apply(&mut config);
        if let Some(manifest) = self.manifest {
            config.manifest = manifest;
        }
        if self.max_parallel.is_some() {
            config.max_parallel = self.max_parallel;
        }

        let progress = ProgressBar::new(0, cli.show_progress());
        let manifest = revise(&self.input, &self.output, &config, &progress)
            .await
            .with_context(|| format!("Failed to revision {}", self.input.display()))?;

        if !cli.quiet {
            println!(
                "{} Revisioned {} files ({} renamed)",
                "✓".green(),
                manifest.len(),
                manifest.renamed_count()
            );
            println!(
                "  Manifest: {}",
                join_relative(&self.output, &config.manifest).display().to_string().cyan()
            );
        }

        Ok(())
    }
}
