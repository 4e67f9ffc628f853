//! Error handling for DTR
//!
//! Two kinds of failure exist in this crate, and they are handled differently:
//!
//! 1. **Resolution failures** (missing ids, broken paths, cycles) are not errors.
//!    The resolver logs a warning and returns `None`, so one broken token never
//!    takes down a host that renders many.
//! 2. **Programmer and I/O errors** (malformed construction options, unreadable
//!    documents, bad configuration) are reported as [`TokenError`].
//!
//! The CLI converts any `anyhow::Error` into an [`ErrorContext`] with
//! [`user_friendly_error`], which adds details and a suggestion and prints them
//! in color.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dtr_cli::core::{ErrorContext, TokenError};
//!
//! let context = ErrorContext::new(TokenError::DocumentNotFound {
//!     path: "tokens.json".to_string(),
//! })
//! .with_suggestion("Pass --document <PATH> or set `document` in dtr.toml");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The error type for DTR operations.
#[derive(Error, Debug)]
pub enum TokenError {
    /// A construction option is malformed.
    #[error("Invalid token option '{option}': {reason}")]
    InvalidOptions {
        /// Name of the offending option
        option: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A token document does not have the expected shape.
    #[error("Invalid token document: {reason}")]
    InvalidDocument {
        /// What is wrong with the document
        reason: String,
    },

    /// The token document file does not exist.
    #[error("Token document not found: {path}")]
    DocumentNotFound {
        /// Path that was looked up
        path: String,
    },

    /// The token document could not be parsed.
    #[error("Failed to parse {format} token document {path}")]
    DocumentParseError {
        /// Path of the document
        path: String,
        /// Format the parser expected (JSON, YAML, TOML)
        format: String,
        /// Parser message
        reason: String,
    },

    /// The document extension is not one of the supported formats.
    #[error("Unsupported token document format: {path}")]
    UnsupportedFormat {
        /// Path of the document
        path: String,
    },

    /// The configuration file is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// A reference requested on the command line did not resolve.
    #[error("Token reference '{reference}' could not be resolved")]
    TokenNotFound {
        /// The reference as given
        reference: String,
        /// Registered ids that look similar
        suggestions: Vec<String>,
    },

    /// One or more tokens failed to resolve.
    #[error("{count} token(s) could not be resolved")]
    UnresolvedTokens {
        /// Number of failing tokens
        count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other errors
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for TokenError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidOptions {
                option,
                reason,
            } => Self::InvalidOptions {
                option: option.clone(),
                reason: reason.clone(),
            },
            Self::InvalidDocument {
                reason,
            } => Self::InvalidDocument {
                reason: reason.clone(),
            },
            Self::DocumentNotFound {
                path,
            } => Self::DocumentNotFound {
                path: path.clone(),
            },
            Self::DocumentParseError {
                path,
                format,
                reason,
            } => Self::DocumentParseError {
                path: path.clone(),
                format: format.clone(),
                reason: reason.clone(),
            },
            Self::UnsupportedFormat {
                path,
            } => Self::UnsupportedFormat {
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::TokenNotFound {
                reference,
                suggestions,
            } => Self::TokenNotFound {
                reference: reference.clone(),
                suggestions: suggestions.clone(),
            },
            Self::UnresolvedTokens {
                count,
            } => Self::UnresolvedTokens {
                count: *count,
            },
            // std::io::Error is not Clone
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error with user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TokenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: TokenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error. Printed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error. Printed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion.
///
/// The error chain is searched for a [`TokenError`]; anything else is wrapped
/// as [`TokenError::Other`] with the full chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(token_error) = cause.downcast_ref::<TokenError>() {
            return create_error_context(token_error);
        }
    }

    let details = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join(": ");
    let context = ErrorContext::new(TokenError::Other {
        message: error.to_string(),
    });
    if details.is_empty() { context } else { context.with_details(details) }
}

/// Build the [`ErrorContext`] for a known error.
pub fn create_error_context(error: &TokenError) -> ErrorContext {
    let context = ErrorContext::new(error.clone());
    match error {
        TokenError::InvalidOptions {
            option,
            ..
        } => context.with_suggestion(format!(
            "Fix the '{option}' setting on the command line or in dtr.toml"
        )),
        TokenError::InvalidDocument {
            ..
        } => context
            .with_suggestion("The document root must be an object mapping token names to values"),
        TokenError::DocumentNotFound {
            path,
        } => context
            .with_suggestion("Pass --document <PATH> or set `document` in dtr.toml")
            .with_details(format!("No file exists at {path}")),
        TokenError::DocumentParseError {
            format,
            reason,
            ..
        } => context
            .with_suggestion(format!("Check the document for {format} syntax errors"))
            .with_details(reason.clone()),
        TokenError::UnsupportedFormat {
            ..
        } => context.with_suggestion("Use a .json, .yaml, .yml or .toml token document"),
        TokenError::ConfigError {
            ..
        } => context.with_suggestion("Check dtr.toml against the documented keys: document, prefix, flat"),
        TokenError::TokenNotFound {
            suggestions,
            ..
        } => {
            if suggestions.is_empty() {
                context.with_suggestion("Run 'dtr list' to see the registered token ids")
            } else {
                context.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
        TokenError::UnresolvedTokens {
            ..
        } => context
            .with_suggestion("Run with --verbose to see why each reference failed")
            .with_details("Unresolved references point at missing ids, missing path segments, or form a cycle"),
        TokenError::IoError(_) => {
            context.with_suggestion("Check that the path exists and you have the necessary permissions")
        }
        TokenError::Other {
            ..
        } => context,
    }
}
