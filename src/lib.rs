//! assetrev - content-addressed asset revisioning
//!
//! Renames every file of a static file tree to embed a hash of its content,
//! and rewrites every textual reference to another file so it points at that
//! file's new name.
//!
//! # Architecture Overview
//!
//! A file's hash covers its rewritten references, so a file can only be
//! hashed once every file it mentions has its final name. A run therefore:
//!
//! 1. Lists the input tree ([`utils::list_files`])
//! 2. Scans every file for literal mentions of other files' relative paths,
//!    in parallel ([`graph::DependencyGraphBuilder`])
//! 3. Orders the files so dependencies come first, failing on cycles
//!    ([`graph::processing_order`])
//! 4. Rewrites, hashes, renames and writes each file in that order
//!    ([`revision::RevisionPipeline`])
//! 5. Writes `manifest.json` mapping original to revisioned paths
//!    ([`manifest::ManifestWriter`])
//!
//! [`revision::revise`] performs all five steps.
//!
//! # Modules
//!
//! - [`cli`] - The `assetrev` command-line interface
//! - [`config`] - `assetrev.toml` and run options
//! - [`core`] - Error types and user-facing error reporting
//! - [`graph`] - Reference scanning, dependency map and ordering
//! - [`manifest`] - The original-to-revisioned mapping and its persistence
//! - [`pattern`] - Glob matching for the skip lists
//! - [`revision`] - Digesting, rewriting and the revision pipeline
//! - [`utils`] - File system helpers and progress reporting
//!
//! # Example
//!
//! ```rust,no_run
//! use assetrev::config::RevConfig;
//! use assetrev::revision::revise;
//! use assetrev::utils::ProgressBar;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), assetrev::core::RevError> {
//! let manifest = revise(
//!     Path::new("site"),
//!     Path::new("dist"),
//!     &RevConfig::default(),
//!     &ProgressBar::hidden(),
//! )
//! .await?;
//! println!("index.html -> {:?}", manifest.get("index.html"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod graph;
pub mod manifest;
pub mod pattern;
pub mod revision;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
