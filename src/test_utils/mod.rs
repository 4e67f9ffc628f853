//! Test utilities for DTR
//!
//! Shared by unit tests and the integration suites (through the
//! `test-utils` feature):
//! - Logging setup that plays well with the test harness
//! - Token document and configuration fixtures
//! - A ready-made [`TokenContext`] over a JSON value
//!
//! # Example
//!
//! ```rust,no_run
//! use dtr_cli::test_utils::{context_from, init_test_logging};
//! use serde_json::json;
//!
//! init_test_logging(None);
//! let mut tokens = context_from(json!({ "a": 1, "b": "{a}" }));
//! assert!(tokens.resolve("b").is_some());
//! ```

pub mod fixtures;

pub use fixtures::{ConfigFixture, DocumentFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::context::{TokenContext, TokenOptions};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=dtr_cli::resolver=trace cargo test
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
            .with_ansi(true)
            .try_init();
    });
}

/// Build a context with default options, panicking on invalid documents.
pub fn context_from(document: serde_json::Value) -> TokenContext {
    TokenContext::from_json(document, TokenOptions::default()).expect("test document must be an object")
}
