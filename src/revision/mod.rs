//! Hash, rewrite and rename.
//!
//! [`RevisionPipeline`] walks the processing order once. For each file it
//! rewrites the references to dependencies that are already revisioned,
//! hashes the result, picks the output name and writes the file under the
//! output root. The pipeline owns the [`RefsTable`] and the [`Manifest`] and
//! is driven from a single task, so neither needs synchronization.
//!
//! [`revise`] runs the whole thing: list, scan, order, revise, and write the
//! manifest.

pub mod digest;
pub mod refs;
pub mod rewrite;
mod run;

pub use digest::{content_digest, revisioned_name};
pub use refs::RefsTable;
pub use rewrite::substitute;
pub use run::{RevisionPlan, plan, revise};

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::RevError;
use crate::manifest::Manifest;
use crate::pattern::PatternSet;
use crate::utils::{atomic_write, join_relative, read_file};

/// Sequential revisioning of files into an output tree.
#[derive(Debug)]
pub struct RevisionPipeline {
    input: PathBuf,
    output: PathBuf,
    rename_skip: PatternSet,
    refs: RefsTable,
    manifest: Manifest,
}

impl RevisionPipeline {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>, rename_skip: PatternSet) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            rename_skip,
            refs: RefsTable::new(),
            manifest: Manifest::new(),
        }
    }

    /// Revisions `file` and returns its output path.
    ///
    /// Every entry of `deps` must have been processed already.
    ///
    /// # Errors
    ///
    /// - [`RevError::UnresolvedDependency`] if a dependency has no output name yet
    /// - [`RevError::IoReadFailure`] / [`RevError::IoWriteFailure`] on I/O errors
    /// - [`RevError::DuplicateRevision`] if `file` was already processed
    pub fn process(&mut self, file: &str, deps: &[String]) -> Result<String, RevError> {
        let mut table = Vec::with_capacity(deps.len());
        for dep in deps {
            let resolved = self.refs.get(dep).ok_or_else(|| RevError::UnresolvedDependency {
                file: file.to_string(),
                dependency: dep.clone(),
            })?;
            table.push((dep.as_str(), resolved));
        }

        let original = read_file(&self.input, file)?;
        let content = if table.is_empty() {
            original
        } else {
            substitute(&original, &table)
        };

        let revised = if self.rename_skip.matches(file) {
            file.to_string()
        } else {
            revisioned_name(file, &content_digest(&content))
        };

        atomic_write(&join_relative(&self.output, &revised), &content)
            .map_err(|e| RevError::write(revised.clone(), e))?;

        debug!("{} -> {} ({} references rewritten)", file, revised, table.len());

        self.refs.insert(file, revised.clone())?;
        self.manifest.insert(file, revised.clone());
        Ok(revised)
    }

    pub fn refs(&self) -> &RefsTable {
        &self.refs
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Consumes the pipeline, returning the manifest in processing order.
    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}
