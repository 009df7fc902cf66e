//! The revision manifest.
//!
//! The manifest maps every input path to the path it was written to, and is
//! the externally visible record of a run. It is stored as pretty-printed
//! JSON with keys in file listing order:
//!
//! ```json
//! {
//!   "a.js": "a.1f0e3dad.js",
//!   "b.js": "b.9c2d41f7.js",
//!   "index.html": "index.html"
//! }
//! ```
//!
//! [`ManifestWriter`] replaces any previous manifest atomically, so readers
//! never observe a truncated file.

use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::RevError;
use crate::utils::atomic_write;

/// Ordered mapping of original paths to revisioned paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the revisioned path of `original`, keeping its position if present.
    pub fn insert(&mut self, original: impl Into<String>, revised: impl Into<String>) {
        let original = original.into();
        let revised = revised.into();
        match self.index.get(&original) {
            Some(&position) => self.entries[position].1 = revised,
            None => {
                self.index.insert(original.clone(), self.entries.len());
                self.entries.push((original, revised));
            }
        }
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.index.get(original).map(|&position| self.entries[position].1.as_str())
    }

    /// `(original, revised)` pairs in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(original, revised)| (original.as_str(), revised.as_str()))
    }

    /// Revisioned paths in manifest order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(_, revised)| revised.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose path changed.
    pub fn renamed_count(&self) -> usize {
        self.entries.iter().filter(|(original, revised)| original != revised).count()
    }

    /// Reorders the entries to follow `files`.
    ///
    /// Entries not named in `files` keep their relative order at the end.
    #[must_use]
    pub fn ordered_by(self, files: &[String]) -> Self {
        let rank: HashMap<&str, usize> =
            files.iter().enumerate().map(|(i, file)| (file.as_str(), i)).collect();

        let mut entries = self.entries;
        entries.sort_by_key(|(original, _)| rank.get(original.as_str()).copied().unwrap_or(usize::MAX));

        entries.into_iter().collect()
    }

    /// Reads a manifest written by [`ManifestWriter`], keeping its key order.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let manifest: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        debug!("Loaded manifest with {} entries from {}", manifest.len(), path.display());
        Ok(manifest)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for (original, revised) in iter {
            manifest.insert(original, revised);
        }
        manifest
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (original, revised) in &self.entries {
            map.serialize_entry(original, revised)?;
        }
        map.end()
    }
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = Manifest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of original paths to revisioned paths")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut manifest = Manifest::new();
        while let Some((original, revised)) = access.next_entry::<String, String>()? {
            manifest.insert(original, revised);
        }
        Ok(manifest)
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

/// Persists a [`Manifest`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    path: PathBuf,
}

impl ManifestWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes `manifest` and replaces the file at [`path`](Self::path).
    ///
    /// # Errors
    ///
    /// [`RevError::ManifestWriteFailure`] if serialization or the write fails.
    pub fn write(&self, manifest: &Manifest) -> Result<(), RevError> {
        let failure = |source: std::io::Error| RevError::ManifestWriteFailure {
            path: self.path.clone(),
            source,
        };

        let mut json = serde_json::to_vec_pretty(manifest)
            .map_err(|e| failure(std::io::Error::other(e)))?;
        json.push(b'\n');

        atomic_write(&self.path, &json).map_err(failure)?;

        info!("Wrote manifest with {} entries to {}", manifest.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Manifest {
        vec![
            ("z.js", "z.11111111.js"),
            ("a.js", "a.22222222.js"),
            ("index.html", "index.html"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut manifest = sample();
        manifest.insert("a.js", "a.33333333.js");

        let keys: Vec<_> = manifest.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z.js", "a.js", "index.html"]);
        assert_eq!(manifest.get("a.js"), Some("a.33333333.js"));
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_renamed_count() {
        assert_eq!(sample().renamed_count(), 2);
        assert_eq!(Manifest::new().renamed_count(), 0);
    }

    #[test]
    fn test_ordered_by_file_listing() {
        let files: Vec<String> =
            ["a.js", "index.html", "z.js"].iter().map(ToString::to_string).collect();
        let manifest = sample().ordered_by(&files);

        let keys: Vec<_> = manifest.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a.js", "index.html", "z.js"]);
        assert_eq!(manifest.get("z.js"), Some("z.11111111.js"));
    }

    #[test]
    fn test_serializes_in_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"z.js":"z.11111111.js","a.js":"a.22222222.js","index.html":"index.html"}"#
        );
    }

    #[test]
    fn test_write_then_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out").join("manifest.json");

        let writer = ManifestWriter::new(&path);
        writer.write(&sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"z.js\": \"z.11111111.js\""));
        assert!(text.ends_with("}\n"));

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_write_overwrites_previous_manifest() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("manifest.json");
        std::fs::write(&path, "stale").unwrap();

        let manifest: Manifest = vec![("a.js", "a.44444444.js")].into_iter().collect();
        ManifestWriter::new(&path).write(&manifest).unwrap();

        assert_eq!(Manifest::load(&path).unwrap(), manifest);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let temp = tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = ManifestWriter::new(blocker.join("manifest.json")).write(&sample()).unwrap_err();
        assert!(matches!(err, RevError::ManifestWriteFailure { .. }));
    }

    #[test]
    fn test_load_rejects_non_string_values() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("manifest.json");
        std::fs::write(&path, r#"{"a.js": 1}"#).unwrap();

        assert!(Manifest::load(&path).is_err());
    }
}
