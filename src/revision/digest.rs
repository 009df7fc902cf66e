//! Content digests and revisioned filenames.

use sha2::{Digest, Sha256};

use crate::constants::HASH_FRAGMENT_LEN;

/// Lowercase hex SHA-256 of `content`.
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Splits a base name into stem and extension.
///
/// The extension starts at the last `.` and keeps it. A leading dot is part
/// of the stem, so `.htaccess` has no extension.
pub fn split_extension(base: &str) -> (&str, &str) {
    match base.rfind('.') {
        Some(index) if index > 0 => base.split_at(index),
        _ => (base, ""),
    }
}

/// Inserts the first eight digest characters before the extension of `path`.
///
/// ```
/// use assetrev::revision::digest::revisioned_name;
///
/// let name = revisioned_name("css/site.css", "0123456789abcdef");
/// assert_eq!(name, "css/site.01234567.css");
/// ```
pub fn revisioned_name(path: &str, digest: &str) -> String {
    let (dir, base) = match path.rfind('/') {
        Some(index) => path.split_at(index + 1),
        None => ("", path),
    };
    let (stem, ext) = split_extension(base);
    let fragment = digest.get(..HASH_FRAGMENT_LEN).unwrap_or(digest);

    format!("{dir}{stem}.{fragment}{ext}")
}
