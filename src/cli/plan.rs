//! The `plan` command.
//!
//! Prints every file in processing order with the files it references. Text
//! output is one line per file followed by indented dependencies; JSON output
//! is an array of `{ "file": ..., "dependencies": [...] }` objects.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::{CliConfig, PatternArgs};
use crate::revision::{RevisionPlan, plan};

/// Output format for `plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print the processing order and dependencies without writing anything.
#[derive(Args, Debug)]
pub struct PlanCommand {
    /// Directory containing the assets
    pub input: PathBuf,

    #[command(flatten)]
    pub patterns: PatternArgs,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct PlanEntry<'a> {
    file: &'a str,
    dependencies: &'a [String],
}

impl PlanCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let mut config = cli.load_rev_config().await?;
        self.patterns.apply(&mut config);

        let plan = plan(&self.input, &config)
            .await
            .with_context(|| format!("Failed to plan {}", self.input.display()))?;

        match self.format {
            OutputFormat::Text => print!("{}", render_text(&plan)),
            OutputFormat::Json => println!("{}", render_json(&plan)?),
        }
        Ok(())
    }
}

fn entries(plan: &RevisionPlan) -> Vec<PlanEntry<'_>> {
    plan.order
        .iter()
        .map(|file| PlanEntry {
            file,
            dependencies: plan.dependencies.dependencies(file),
        })
        .collect()
}

fn render_text(plan: &RevisionPlan) -> String {
    let mut out = String::new();
    for entry in entries(plan) {
        out.push_str(&format!("{}\n", entry.file.bold()));
        for dep in entry.dependencies {
            out.push_str(&format!("  -> {dep}\n"));
        }
    }
    out
}

fn render_json(plan: &RevisionPlan) -> Result<String> {
    serde_json::to_string_pretty(&entries(plan)).context("Failed to serialize plan")
}
