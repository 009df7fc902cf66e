//! Literal reference substitution.

use std::collections::HashSet;

/// Replaces every occurrence of each `from` with its `to`, in table order.
///
/// Matching is literal. Each replacement runs over the output of the previous
/// one, so a later `from` can match inside text an earlier replacement wrote:
/// `app.js -> app.1234567f.js` leaves an `f.js` behind for a later `f.js`
/// entry to rewrite. Repeated `from` entries are applied once. The content is
/// decoded lossily, so invalid UTF-8 sequences become `U+FFFD` in the result.
pub fn substitute<S: AsRef<str>>(content: &[u8], table: &[(S, S)]) -> Vec<u8> {
    let mut text = String::from_utf8_lossy(content).into_owned();
    let mut applied = HashSet::new();
    for (from, to) in table {
        let from = from.as_ref();
        // A revisioned name usually contains its original name
        if from.is_empty() || !applied.insert(from) || !text.contains(from) {
            continue;
        }
        text = text.replace(from, to.as_ref());
    }
    text.into_bytes()
}
