//! Run configuration for assetrev.
//!
//! Configuration is layered:
//! 1. Built-in defaults ([`RevConfig::default`])
//! 2. An optional `assetrev.toml` (explicit `--config` path, or the file in
//!    the current directory when present)
//! 3. Command-line flags, which replace the corresponding file values
//!
//! # File Format
//!
//! ```toml
//! skip_rename = ["index.html", "robots.txt"]
//! skip_find_deps = ["*.png", "*.jpg", "*.jpeg", "*.gif", "*.woff2"]
//! manifest = "rev-manifest.json"
//! max_parallel = 16
//! ```
//!
//! Unknown keys are rejected so typos do not silently fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_MANIFEST_NAME, DEFAULT_SKIP_FIND_DEPS, DEFAULT_SKIP_RENAME,
    default_max_parallel,
};
use crate::core::RevError;
use crate::pattern::PatternSet;

/// Options recognized by a revision run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevConfig {
    /// Glob patterns for files whose name must never change.
    #[serde(default = "default_skip_rename")]
    pub skip_rename: Vec<String>,

    /// Glob patterns for files never scanned for references.
    #[serde(default = "default_skip_find_deps")]
    pub skip_find_deps: Vec<String>,

    /// Manifest filename, relative to the output root.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Maximum number of concurrent dependency scans.
    ///
    /// `None` uses [`default_max_parallel`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<usize>,
}

fn default_skip_rename() -> Vec<String> {
    DEFAULT_SKIP_RENAME.iter().map(ToString::to_string).collect()
}

fn default_skip_find_deps() -> Vec<String> {
    DEFAULT_SKIP_FIND_DEPS.iter().map(ToString::to_string).collect()
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST_NAME.to_string()
}

impl Default for RevConfig {
    fn default() -> Self {
        Self {
            skip_rename: default_skip_rename(),
            skip_find_deps: default_skip_find_deps(),
            manifest: default_manifest(),
            max_parallel: None,
        }
    }
}

impl RevConfig {
    /// Loads the configuration from `path`, or from `assetrev.toml` in the
    /// current directory when no path is given.
    ///
    /// An explicit path must exist; the implicit file is optional and its
    /// absence yields the defaults.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => {
                let implicit = PathBuf::from(CONFIG_FILE_NAME);
                if implicit.exists() {
                    Self::load_from(&implicit).await
                } else {
                    debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads and validates the configuration file at `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot drive a run.
    pub fn validate(&self) -> Result<(), RevError> {
        let manifest = Path::new(&self.manifest);
        if self.manifest.trim().is_empty() {
            return Err(RevError::ConfigError {
                message: "manifest name must not be empty".to_string(),
            });
        }
        if manifest.is_absolute()
            || manifest.components().any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(RevError::ConfigError {
                message: format!(
                    "manifest '{}' must be a relative path inside the output directory",
                    self.manifest
                ),
            });
        }
        if self.max_parallel == Some(0) {
            return Err(RevError::ConfigError {
                message: "max_parallel must be at least 1".to_string(),
            });
        }

        self.skip_rename_set()?;
        self.skip_find_deps_set()?;
        Ok(())
    }

    /// Compiled `skip_rename` patterns.
    pub fn skip_rename_set(&self) -> Result<PatternSet, RevError> {
        PatternSet::new(&self.skip_rename)
    }

    /// Compiled `skip_find_deps` patterns.
    pub fn skip_find_deps_set(&self) -> Result<PatternSet, RevError> {
        PatternSet::new(&self.skip_find_deps)
    }

    /// Scan fan-out after applying the default.
    pub fn effective_max_parallel(&self) -> usize {
        self.max_parallel.unwrap_or_else(default_max_parallel).max(1)
    }
}
