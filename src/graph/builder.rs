//! Parallel construction of the [`DependencyMap`].
//!
//! Every file's read-and-scan is independent, so scans run on Tokio's blocking
//! pool with a bounded fan-out (`buffer_unordered`). The map is assembled only
//! after every scan has finished; a single read failure fails the whole build
//! and no partial map escapes.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::DependencyMap;
use super::scanner::ContentScanner;
use crate::constants::default_max_parallel;
use crate::core::RevError;
use crate::pattern::PatternSet;
use crate::utils::read_file;

/// Builds the dependency map of a file tree.
#[derive(Debug, Clone)]
pub struct DependencyGraphBuilder {
    root: PathBuf,
    skip_scan: PatternSet,
    rename_skip: PatternSet,
    max_parallel: usize,
}

impl DependencyGraphBuilder {
    /// Creates a builder reading files under `root`.
    ///
    /// Files matching `skip_scan` are never read and get no dependencies.
    /// Files matching `rename_skip` are never reported as dependencies.
    pub fn new(root: impl AsRef<Path>, skip_scan: PatternSet, rename_skip: PatternSet) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            skip_scan,
            rename_skip,
            max_parallel: default_max_parallel(),
        }
    }

    /// Limits the number of concurrent scans.
    #[must_use]
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    /// Scans `files` and returns one entry per file, in `files` order.
    ///
    /// # Errors
    ///
    /// Returns the [`RevError::IoReadFailure`] of the first unreadable file
    /// (in `files` order).
    pub async fn build(&self, files: &[String]) -> Result<DependencyMap, RevError> {
        let scanner = Arc::new(ContentScanner::new(files, &self.rename_skip));

        info!(
            "Scanning {} files for references (max {} in parallel)",
            files.len(),
            self.max_parallel
        );

        let mut results: Vec<(usize, Result<Vec<String>, RevError>)> =
            stream::iter(files.iter().cloned().enumerate())
                .map(|(index, file)| {
                    let skip = self.skip_scan.matches(&file);
                    let root = self.root.clone();
                    let scanner = Arc::clone(&scanner);

                    async move {
                        if skip {
                            debug!("Not scanning {} (skip_find_deps)", file);
                            return (index, Ok(Vec::new()));
                        }

                        let task_file = file.clone();
                        let joined = tokio::task::spawn_blocking(move || {
                            let content = read_file(&root, &task_file)?;
                            Ok::<_, RevError>(scanner.scan(&task_file, &content))
                        })
                        .await;

                        let result = match joined {
                            Ok(result) => result,
                            Err(e) => Err(RevError::read(file.clone(), std::io::Error::other(e))),
                        };
                        if let Ok(deps) = &result {
                            debug!("{} references {:?}", file, deps);
                        }
                        (index, result)
                    }
                })
                .buffer_unordered(self.max_parallel)
                .collect()
                .await;

        results.sort_by_key(|(index, _)| *index);

        let mut map = DependencyMap::with_capacity(files.len());
        for (index, result) in results {
            map.insert(files[index].clone(), result?);
        }

        info!("Found {} references across {} files", map.edge_count(), map.len());
        Ok(map)
    }
}
