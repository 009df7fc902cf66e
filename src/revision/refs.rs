use std::collections::HashMap;

use crate::core::RevError;

/// Original name to output name, filled in as files are revisioned.
///
/// Entries are only ever added.
#[derive(Debug, Clone, Default)]
pub struct RefsTable {
    entries: HashMap<String, String>,
}

impl RefsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the output name of `original`.
    ///
    /// # Errors
    ///
    /// [`RevError::DuplicateRevision`] if `original` already has an entry.
    pub fn insert(
        &mut self,
        original: impl Into<String>,
        revised: impl Into<String>,
    ) -> Result<(), RevError> {
        let original = original.into();
        if self.entries.contains_key(&original) {
            return Err(RevError::DuplicateRevision {
                path: original,
            });
        }
        self.entries.insert(original, revised.into());
        Ok(())
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    pub fn contains(&self, original: &str) -> bool {
        self.entries.contains_key(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
