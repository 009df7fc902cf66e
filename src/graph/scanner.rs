//! Textual reference scanning.
//!
//! A reference is a literal substring occurrence of another file's relative
//! path in a file's content. Content is decoded as UTF-8 (lossily, so binary
//! noise never aborts a scan) and candidates are tested with plain substring
//! search; no regex is involved, so dots and plus signs in filenames are taken
//! literally.

use crate::pattern::PatternSet;

/// Returns the candidates that occur in `content`, in candidate order.
///
/// `exclude_self` is dropped (a file never depends on itself) and so is every
/// candidate matching `rename_skip`: a file that keeps its name needs no
/// rewrite, so mentioning it creates no ordering constraint.
pub fn find_references(
    content: &[u8],
    candidates: &[String],
    exclude_self: &str,
    rename_skip: &PatternSet,
) -> Vec<String> {
    if content.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let text = String::from_utf8_lossy(content);
    candidates
        .iter()
        .filter(|candidate| !candidate.is_empty() && text.contains(candidate.as_str()))
        .filter(|candidate| candidate.as_str() != exclude_self)
        .filter(|candidate| !rename_skip.matches(candidate))
        .cloned()
        .collect()
}

/// Reusable scanner over a fixed candidate set.
///
/// Rename-skipped candidates are filtered once up front instead of on every
/// file, which matters when the same set is scanned against thousands of
/// files.
#[derive(Debug, Clone)]
pub struct ContentScanner {
    candidates: Vec<String>,
}

impl ContentScanner {
    pub fn new(candidates: &[String], rename_skip: &PatternSet) -> Self {
        let candidates = candidates
            .iter()
            .filter(|candidate| !candidate.is_empty() && !rename_skip.matches(candidate))
            .cloned()
            .collect();
        Self {
            candidates,
        }
    }

    /// References to other candidates in `content` of `file`.
    pub fn scan(&self, file: &str, content: &[u8]) -> Vec<String> {
        find_references(content, &self.candidates, file, &PatternSet::default())
    }

    /// Candidates remaining after the rename-skip filter.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}
