//! DTR - Design Token Registry
//!
//! A library and CLI for working with hierarchical design token documents in
//! the W3C Design Tokens style. A nested document such as
//!
//! ```json
//! {
//!   "colors": {
//!     "base": "#007BFF",
//!     "primary": { "$value": "{colors.base}", "$type": "color" }
//!   }
//! }
//! ```
//!
//! is flattened into dot-separated ids (`colors.base`, `colors.primary`),
//! registered with stable insertion-order indices, and any id or `{alias}`
//! reference can be resolved to its final concrete value.
//!
//! # Architecture
//!
//! - [`tokens`] - the token value model and alias-string helpers
//! - [`flatten`] - nested document to `(id, value)` entries
//! - [`registry`] - generic id/index/value store with reverse lookup
//! - [`resolver`] - alias resolution with cycle detection and a memo cache
//! - [`context`] - the public facade combining the above
//! - [`core`] - error types and user-facing error formatting
//! - [`config`] - optional `dtr.toml` project configuration
//! - [`loader`] - reading JSON, YAML and TOML documents from disk
//! - [`cli`] - the `dtr` command-line interface
//!
//! # Example
//!
//! ```rust
//! use dtr_cli::context::{TokenContext, TokenOptions};
//! use dtr_cli::tokens::TokenValue;
//! use serde_json::json;
//!
//! let mut tokens = TokenContext::from_json(
//!     json!({ "spacing": { "base": 4, "md": { "$value": "{spacing.base}" } } }),
//!     TokenOptions::default(),
//! )?;
//!
//! assert_eq!(tokens.resolve("{spacing.md}"), Some(TokenValue::from(4)));
//! assert_eq!(tokens.lookup(0), Some("spacing.base"));
//! # Ok::<(), dtr_cli::core::TokenError>(())
//! ```
//!
//! Resolution never fails with an error: unknown ids, broken partial paths and
//! circular aliases log a warning through `tracing` and return `None`.

// Engine
pub mod context;
pub mod flatten;
pub mod registry;
pub mod resolver;
pub mod tokens;

// Supporting modules
pub mod cli;
pub mod config;
pub mod core;
pub mod loader;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
