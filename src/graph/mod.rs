//! Dependency discovery and ordering.
//!
//! A file depends on another when its content mentions the other file's
//! relative path verbatim. This module turns a file listing into a
//! [`DependencyMap`] ([`builder`], using [`scanner`] per file) and the map into a
//! processing order where every dependency precedes its dependents
//! ([`order`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use assetrev::graph::{DependencyGraphBuilder, processing_order};
//! use assetrev::pattern::PatternSet;
//! use assetrev::utils::list_files;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), assetrev::core::RevError> {
//! let root = Path::new("site");
//! let files = list_files(root)?;
//! let builder = DependencyGraphBuilder::new(
//!     root,
//!     PatternSet::new(&["*.png"])?,
//!     PatternSet::new(&["index.html"])?,
//! );
//! let map = builder.build(&files).await?;
//! for file in processing_order(&map)? {
//!     println!("{file} -> {:?}", map.dependencies(&file));
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod order;
pub mod scanner;

pub use builder::DependencyGraphBuilder;
pub use order::{DependencyGraph, processing_order};
pub use scanner::{ContentScanner, find_references};

use std::collections::HashMap;

/// Mapping from each file to the files it references.
///
/// Keys iterate in insertion order, which is the file listing order when
/// built by [`DependencyGraphBuilder`]. Every key has an entry, including
/// files with no dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    files: Vec<String>,
    deps: HashMap<String, Vec<String>>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            files: Vec::with_capacity(capacity),
            deps: HashMap::with_capacity(capacity),
        }
    }

    /// Sets the dependency list of `file`, appending it to the key order if new.
    pub fn insert(&mut self, file: impl Into<String>, deps: Vec<String>) {
        let file = file.into();
        if !self.deps.contains_key(&file) {
            self.files.push(file.clone());
        }
        self.deps.insert(file, deps);
    }

    /// Dependency list of `file`, or `None` if the file is not a key.
    pub fn get(&self, file: &str) -> Option<&[String]> {
        self.deps.get(file).map(Vec::as_slice)
    }

    /// Dependency list of `file`; empty for unknown files.
    pub fn dependencies(&self, file: &str) -> &[String] {
        self.get(file).unwrap_or(&[])
    }

    pub fn contains(&self, file: &str) -> bool {
        self.deps.contains_key(file)
    }

    /// Keys in insertion order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// `(file, dependencies)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.files.iter().map(|file| (file.as_str(), self.dependencies(file)))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of (file, dependency) pairs.
    pub fn edge_count(&self) -> usize {
        self.deps.values().map(Vec::len).sum()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (file, deps) in iter {
            map.insert(file, deps);
        }
        map
    }
}
