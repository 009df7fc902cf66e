//! Filesystem and terminal utilities
//!
//! # Modules
//!
//! - [`fs`] - Recursive listing, reads and atomic writes relative to a root
//! - [`progress`] - Progress bar for the revision phase

pub mod fs;
pub mod progress;

pub use fs::{
    atomic_write, ensure_dir, is_within, join_relative, list_files, normalize_path_for_storage,
    read_file,
};
pub use progress::ProgressBar;
