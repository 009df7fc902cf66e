//! Integration test suite for assetrev
//!
//! End-to-end tests of whole revision runs through the library API and the
//! `assetrev` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **revision**: Full runs over realistic trees (names, rewrites, manifest)
//! - **cycles**: Cyclic references and the failure guarantees around them
//! - **cli**: Command-line behavior, flags and configuration files

mod cli;
mod cycles;
mod revision;

use assert_cmd::Command;

/// The `assetrev` binary with the progress bar disabled.
pub fn assetrev() -> Command {
    let mut cmd = Command::cargo_bin("assetrev").unwrap();
    cmd.env("ASSETREV_NO_PROGRESS", "1").env_remove("RUST_LOG");
    cmd
}
