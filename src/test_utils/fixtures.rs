//! Temporary asset trees.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::utils::{join_relative, list_files};

/// A temporary directory holding a `site/` input tree and a `dist/` output
/// location side by side.
///
/// Everything is removed when the fixture is dropped.
pub struct AssetTree {
    temp_dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

impl AssetTree {
    /// Creates an empty input tree. The output directory is not created.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        let input = temp_dir.path().join("site");
        let output = temp_dir.path().join("dist");
        fs::create_dir_all(&input).context("Failed to create input directory")?;

        Ok(Self {
            temp_dir,
            input,
            output,
        })
    }

    /// Builds a tree from `(relative path, content)` pairs.
    pub fn with_files(files: &[(&str, &str)]) -> Result<Self> {
        let tree = Self::new()?;
        for (path, content) in files {
            tree.add(path, content)?;
        }
        Ok(tree)
    }

    /// Writes a file under the input root, creating parent directories.
    pub fn add(&self, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = join_relative(&self.input, relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Reads a file from the output tree as UTF-8.
    pub fn read_output(&self, relative: &str) -> Result<String> {
        let path = join_relative(&self.output, relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Reads a file from the output tree as raw bytes.
    pub fn read_output_bytes(&self, relative: &str) -> Result<Vec<u8>> {
        let path = join_relative(&self.output, relative);
        fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Every file under the output root, relative and sorted.
    pub fn output_files(&self) -> Result<Vec<String>> {
        Ok(list_files(&self.output)?)
    }
}
