//! Test utilities for assetrev
//!
//! Available to the crate's own tests and, through the `test-utils` feature,
//! to the integration tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use assetrev::test_utils::AssetTree;
//!
//! let tree = AssetTree::new().unwrap();
//! tree.add("a.js", "no refs").unwrap();
//! tree.add("index.html", "<script src=\"a.js\"></script>").unwrap();
//! assert!(tree.input().join("a.js").exists());
//! ```

mod fixtures;

pub use fixtures::AssetTree;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. Without either, logging
/// stays off. Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
