//! Command-line interface for assetrev.
//!
//! # Commands
//!
//! - `run` - Revision an input tree into an output tree and write the manifest
//! - `plan` - Show the processing order and dependencies without writing
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors and suppress the summary
//! - `--no-progress` - Disable the progress bar
//! - `--config` - Path to an `assetrev.toml` (defaults to `./assetrev.toml`)
//!
//! `RUST_LOG` takes precedence over `--verbose` and `--quiet` when set.
//!
//! # Example
//!
//! ```bash
//! # Revision ./site into ./dist
//! assetrev run site dist
//!
//! # Keep robots.txt and index.html unrenamed
//! assetrev run site dist --skip-rename index.html --skip-rename robots.txt
//!
//! # Inspect the order as JSON
//! assetrev plan site --format json
//! ```

mod common;
mod plan;
mod run;

pub use common::PatternArgs;
pub use plan::{OutputFormat, PlanCommand};
pub use run::RunCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::RevConfig;

/// Settings derived from the global flags, shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub quiet: bool,
    pub no_progress: bool,
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Whether the revision progress bar should be drawn.
    pub fn show_progress(&self) -> bool {
        !self.no_progress && !self.quiet
    }

    /// Loads the layered configuration file (defaults, then `assetrev.toml`).
    pub async fn load_rev_config(&self) -> Result<RevConfig> {
        RevConfig::load_with_optional(self.config_path.clone()).await
    }
}

#[derive(Parser)]
#[command(
    name = "assetrev",
    about = "Content-addressed asset revisioning",
    version,
    long_about = "assetrev renames every file of a static site to embed a hash of its content \
                  and rewrites references between files to the new names."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors and print no summary
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Revision a file tree and write the manifest
    Run(RunCommand),

    /// Print the processing order and dependencies without writing anything
    Plan(PlanCommand),
}

impl Cli {
    /// Initializes logging and runs the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(&config.log_level);
        self.execute_with_config(config).await
    }

    /// Translates the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            no_progress: self.no_progress,
            config_path: self.config.clone(),
        }
    }

    /// Runs the command with an explicit configuration, without touching logging.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Run(cmd) => cmd.execute(&config).await,
            Commands::Plan(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `default_level`.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
