//! Test utilities for kubectl-save
//!
//! Shared by unit tests and, through the `test-utils` feature, by the
//! integration test targets.
//!
//! # Example
//!
//! ```rust,no_run
//! use kubectl_save::test_utils::{ResourceFixture, init_test_logging, list_yaml};
//!
//! init_test_logging(None);
//! let yaml = list_yaml(&[ResourceFixture::pod("a"), ResourceFixture::pod("b")]).unwrap();
//! assert!(yaml.contains("kind: List"));
//! ```

pub mod fixtures;

pub use fixtures::{ResourceFixture, ketall_yaml, list_yaml, relative_files};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, logging stays
/// off. Output goes through the test writer so it is captured per test.
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
