//! File system helpers operating on paths relative to a root directory.
//!
//! All relative paths handled by assetrev are forward-slash separated strings
//! (the form stored in the manifest and searched for in file contents).
//! [`join_relative`] turns them back into platform paths.
//!
//! Writes are atomic: content goes to a temporary file in the destination
//! directory which is then renamed over the target, so an interrupted run never
//! leaves a half-written asset behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::core::RevError;

/// Converts a path into the forward-slash form used for storage and matching.
pub fn normalize_path_for_storage<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Joins a forward-slash relative path onto `root`.
pub fn join_relative(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for component in relative.split('/').filter(|c| !c.is_empty()) {
        path.push(component);
    }
    path
}

/// Lists every regular file under `root`, recursively.
///
/// Paths are relative to `root`, forward-slash separated and returned in
/// sorted walk order, so the listing is deterministic across runs and
/// platforms. Symlinks are not followed and directories are not listed.
///
/// # Errors
///
/// Returns [`RevError::InputNotFound`] if `root` is not a directory and
/// [`RevError::IoReadFailure`] if any directory entry cannot be read.
pub fn list_files(root: &Path) -> Result<Vec<String>, RevError> {
    if !root.is_dir() {
        return Err(RevError::InputNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(|p| normalize_path_for_storage(p.strip_prefix(root).unwrap_or(p)))
                .unwrap_or_default();
            RevError::read(path, std::io::Error::from(e))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative = normalize_path_for_storage(relative);
        trace!("Listed {}", relative);
        files.push(relative);
    }

    Ok(files)
}

/// Reads a file relative to `root`.
///
/// # Errors
///
/// Returns [`RevError::IoReadFailure`] naming `relative`.
pub fn read_file(root: &Path, relative: &str) -> Result<Vec<u8>, RevError> {
    fs::read(join_relative(root, relative)).map_err(|e| RevError::read(relative, e))
}

/// Creates `path` and its parents if missing.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

/// Atomically writes `content` to `path`, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Returns true if `path` is `root` or lies underneath it.
///
/// Both paths are made absolute without touching the filesystem, so `path`
/// does not need to exist yet.
pub fn is_within(path: &Path, root: &Path) -> bool {
    match (std::path::absolute(path), std::path::absolute(root)) {
        (Ok(path), Ok(root)) => lexical_normalize(&path).starts_with(lexical_normalize(&root)),
        _ => false,
    }
}

fn lexical_normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
