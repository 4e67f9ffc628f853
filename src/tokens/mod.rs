//! Design token values and alias references.
//!
//! This module defines the node types of a token document and the single rule
//! that decides whether a string is an alias reference.
//!
//! # Document Shape
//!
//! Documents follow a practical subset of the W3C Design Tokens format:
//!
//! ```json
//! {
//!   "colors": {
//!     "$type": "color",
//!     "base": "#007BFF",
//!     "primary": { "$value": "{colors.base}", "$description": "Brand color" }
//!   }
//! }
//! ```
//!
//! - Plain strings, numbers, booleans and `null` are leaves
//! - Objects with a `$value` key are alias wrappers ([`AliasToken`])
//! - Other objects are containers whose children become nested ids
//!
//! # Examples
//!
//! ```rust
//! use dtr_cli::tokens::{is_alias, TokenValue};
//! use serde_json::json;
//!
//! assert!(is_alias("{colors.base}"));
//! assert!(!is_alias("{}"));
//!
//! let token = TokenValue::from(json!({ "$value": "{colors.base}" }));
//! assert_eq!(token.alias_target(), Some("{colors.base}"));
//! ```

mod convert;
mod value;

pub use convert::{document_from_json, object_to_map};
pub use value::{
    AliasToken, DEPRECATED_KEY, DESCRIPTION_KEY, EXTENSIONS_KEY, Primitive, TYPE_KEY,
    TokenCallable, TokenFn, TokenMap, TokenValue, VALUE_KEY,
};

/// Whether `s` is an alias reference: longer than two characters, starting
/// with `{` and ending with `}`.
#[must_use]
pub fn is_alias(s: &str) -> bool {
    s.len() > 2 && s.starts_with('{') && s.ends_with('}')
}

/// Strip the braces from a fully wrapped alias (`{colors.base}`).
///
/// Anything else is returned as is; see [`normalize_reference`] for braced
/// heads such as `{colors}.blue.500`.
#[must_use]
pub fn clean_reference(reference: &str) -> &str {
    if is_alias(reference) {
        return &reference[1..reference.len() - 1];
    }
    reference
}

/// Normalize a reference to a dot path, rewriting a braced head
/// (`{colors}.blue`) into a plain one (`colors.blue`).
#[must_use]
pub fn normalize_reference(reference: &str) -> std::borrow::Cow<'_, str> {
    use std::borrow::Cow;

    if is_alias(reference) {
        return Cow::Borrowed(clean_reference(reference));
    }
    if let Some(rest) = reference.strip_prefix('{')
        && let Some((head, tail)) = rest.split_once("}.")
        && !head.is_empty()
        && !head.contains(['{', '}'])
    {
        return Cow::Owned(format!("{head}.{tail}"));
    }
    Cow::Borrowed(reference)
}
