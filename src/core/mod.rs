//! Core types shared across DTR.
//!
//! - [`TokenError`] - error enum for option, document, configuration and I/O failures
//! - [`ErrorContext`] - an error plus user-facing details and a suggestion
//! - [`user_friendly_error`] - converts any `anyhow::Error` for CLI display

pub mod error;

pub use error::{ErrorContext, TokenError, create_error_context, user_friendly_error};
