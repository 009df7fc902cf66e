//! Global constants used throughout the assetrev codebase.
//!
//! Default skip lists, the manifest name, hash fragment length and the
//! parallelism parameters for dependency scanning.

/// Files whose names never change unless configured otherwise.
pub const DEFAULT_SKIP_RENAME: &[&str] = &["index.html"];

/// Files never scanned for references unless configured otherwise.
///
/// Raster images are binary; looking for filenames inside them is wasted work
/// and can produce false edges.
pub const DEFAULT_SKIP_FIND_DEPS: &[&str] = &["*.png", "*.jpg", "*.jpeg", "*.gif"];

/// Manifest filename written at the output root.
pub const DEFAULT_MANIFEST_NAME: &str = "manifest.json";

/// Name of the optional configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "assetrev.toml";

/// Number of hex digest characters embedded in a revisioned filename.
pub const HASH_FRAGMENT_LEN: usize = 8;

/// Environment variable disabling progress bars when set to any value.
pub const NO_PROGRESS_ENV: &str = "ASSETREV_NO_PROGRESS";

/// Minimum number of parallel scans regardless of CPU count.
pub const MIN_PARALLELISM: usize = 10;

/// Multiplier applied to CPU core count for default parallelism.
pub const PARALLELISM_CORE_MULTIPLIER: usize = 2;

/// Core count assumed when `std::thread::available_parallelism()` fails.
pub const FALLBACK_CORE_COUNT: usize = 4;

/// Default fan-out for the dependency scanning phase.
///
/// `max(MIN_PARALLELISM, cores * PARALLELISM_CORE_MULTIPLIER)`
pub fn default_max_parallel() -> usize {
    let cores = std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(FALLBACK_CORE_COUNT);
    std::cmp::max(MIN_PARALLELISM, cores * PARALLELISM_CORE_MULTIPLIER)
}
