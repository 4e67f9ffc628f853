//! Token context: the public facade of the engine.
//!
//! A [`TokenContext`] is built once from a nested document and a set of
//! [`TokenOptions`]. Construction flattens the document and onboards the
//! entries into a [`Registry`]; afterwards tokens can be added, updated and
//! removed through the registry passthroughs, and any reference can be resolved
//! with [`TokenContext::resolve`].
//!
//! There is no process-wide state: every context owns its registry and its
//! resolution cache. A context is not synchronized; wrap it in a `Mutex` to
//! share it between threads.
//!
//! # Cache Policy
//!
//! Resolutions are cached and registry mutations do **not** invalidate them.
//! After `upsert`-ing a token, references resolved before the update keep
//! returning the earlier value until [`TokenContext::clear_cache`] is called.
//!
//! # Examples
//!
//! ```rust
//! use dtr_cli::context::{TokenContext, TokenOptions};
//! use dtr_cli::tokens::TokenValue;
//! use serde_json::json;
//!
//! let mut tokens = TokenContext::from_json(
//!     json!({
//!         "base": "#007BFF",
//!         "primary": { "$value": "{base}" },
//!         "accent": { "$value": "{primary}" }
//!     }),
//!     TokenOptions::default(),
//! )?;
//!
//! assert_eq!(tokens.size(), 3);
//! assert_eq!(tokens.resolve("accent"), Some(TokenValue::from("#007BFF")));
//! assert!(TokenContext::is_alias("{primary}"));
//! # Ok::<(), dtr_cli::core::TokenError>(())
//! ```

use serde::{Deserialize, Serialize};
use strsim::levenshtein;
use tracing::debug;

use crate::core::TokenError;
use crate::flatten::flatten;
use crate::registry::{Registry, Ticket, TicketInput};
use crate::resolver::{CacheStats, Resolver, TokenRef};
use crate::tokens::{TokenMap, TokenValue, document_from_json};


/// Maximum edit distance for id suggestions, as a percentage of the reference length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOptions {
    /// Keep nested containers as single opaque tokens instead of flattening them.
    #[serde(default)]
    pub flat: bool,

    /// Prepended, with a `.`, to every id generated from the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl TokenOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_flat(mut self, flat: bool) -> Self {
        self.flat = flat;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Check the options for programmer errors.
    ///
    /// A prefix must be non-empty, must not start or end with `.`, and must
    /// not contain braces or whitespace.
    pub fn validate(&self) -> Result<(), TokenError> {
        let Some(prefix) = &self.prefix else {
            return Ok(());
        };

        let reason = if prefix.is_empty() {
            Some("must not be empty")
        } else if prefix.starts_with('.') || prefix.ends_with('.') {
            Some("must not start or end with '.'")
        } else if prefix.contains("..") {
            Some("must not contain empty segments")
        } else if prefix.contains(['{', '}']) {
            Some("must not contain '{' or '}'")
        } else if prefix.chars().any(char::is_whitespace) {
            Some("must not contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(TokenError::InvalidOptions {
                option: "prefix".to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Flattened, registered tokens plus alias resolution.
#[derive(Debug, Default)]
pub struct TokenContext {
    registry: Registry<TokenValue>,
    resolver: Resolver,
    options: TokenOptions,
}

impl TokenContext {
    /// Build a context from a token document.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidOptions`] when the options are malformed.
    pub fn new(document: &TokenMap, options: TokenOptions) -> Result<Self, TokenError> {
        options.validate()?;

        let entries = flatten(document, options.prefix.as_deref(), options.flat);
        let mut registry = Registry::new();
        registry.onboard(entries.into_iter().map(|entry| TicketInput::with_id(entry.id, entry.value)));
        debug!(
            "Created token context with {} tokens (flat: {}, prefix: {:?})",
            registry.size(),
            options.flat,
            options.prefix
        );

        Ok(Self {
            registry,
            resolver: Resolver::new(),
            options,
        })
    }

    /// Build a context from a parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidDocument`] when the root is not an object,
    /// or [`TokenError::InvalidOptions`] for malformed options.
    pub fn from_json(value: serde_json::Value, options: TokenOptions) -> Result<Self, TokenError> {
        let document = document_from_json(value).ok_or_else(|| TokenError::InvalidDocument {
            reason: "the root must be an object".to_string(),
        })?;
        Self::new(&document, options)
    }

    /// Whether `value` is an alias reference (`{...}` with a non-empty body).
    #[must_use]
    pub fn is_alias(value: &str) -> bool {
        crate::tokens::is_alias(value)
    }

    pub const fn options(&self) -> &TokenOptions {
        &self.options
    }

    pub const fn registry(&self) -> &Registry<TokenValue> {
        &self.registry
    }

    /// Resolve a token id, `{alias}` string or alias object.
    ///
    /// Returns `None` (after logging a warning) for unresolvable references.
    pub fn resolve(&mut self, reference: impl Into<TokenRef>) -> Option<TokenValue> {
        self.resolver.resolve(&self.registry, &reference.into())
    }

    /// Resolve every registered id, in index order.
    pub fn resolve_all(&mut self) -> Vec<(String, Option<TokenValue>)> {
        let ids: Vec<String> = self.registry.keys().map(str::to_string).collect();
        ids.into_iter()
            .map(|id| {
                let value = self.resolver.resolve(&self.registry, &TokenRef::Path(id.clone()));
                (id, value)
            })
            .collect()
    }

    /// Ids whose resolution fails, in index order.
    pub fn unresolved(&mut self) -> Vec<String> {
        self.resolve_all()
            .into_iter()
            .filter_map(|(id, value)| value.is_none().then_some(id))
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.resolver.cache_stats()
    }

    /// Drop every cached resolution. The only way to see registry updates
    /// through references resolved earlier.
    pub fn clear_cache(&mut self) {
        self.resolver.clear_cache();
    }

    /// Registered ids close to `reference`, closest first (at most three).
    pub fn suggest(&self, reference: &str) -> Vec<String> {
        let target = crate::tokens::normalize_reference(reference);
        let max_distance = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;

        let mut scored: Vec<_> = self
            .registry
            .keys()
            .map(|id| (id, levenshtein(&target, id)))
            .filter(|(_, distance)| *distance <= max_distance)
            .collect();
        scored.sort_by_key(|(_, distance)| *distance);
        scored.into_iter().take(3).map(|(id, _)| id.to_string()).collect()
    }

    // Registry passthroughs

    pub fn register(&mut self, input: impl Into<TicketInput<TokenValue>>) -> Ticket<TokenValue> {
        self.registry.register(input)
    }

    pub fn unregister(&mut self, id: &str) -> Option<Ticket<TokenValue>> {
        self.registry.unregister(id)
    }

    pub fn upsert(&mut self, id: &str, value: impl Into<TokenValue>) -> Ticket<TokenValue> {
        self.registry.upsert(id, value.into())
    }

    pub fn onboard<I, T>(&mut self, inputs: I) -> Vec<Ticket<TokenValue>>
    where
        I: IntoIterator<Item = T>,
        T: Into<TicketInput<TokenValue>>,
    {
        self.registry.onboard(inputs)
    }

    pub fn has(&self, id: &str) -> bool {
        self.registry.has(id)
    }

    pub fn get(&self, id: &str) -> Option<&Ticket<TokenValue>> {
        self.registry.get(id)
    }

    pub fn size(&self) -> usize {
        self.registry.size()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.registry.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &TokenValue> + '_ {
        self.registry.values()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Ticket<TokenValue>)> + '_ {
        self.registry.entries()
    }

    pub fn lookup(&self, index: usize) -> Option<&str> {
        self.registry.lookup(index)
    }

    /// Ids whose raw stored value equals `value`.
    pub fn browse<Q>(&self, value: &Q) -> Option<Vec<String>>
    where
        TokenValue: PartialEq<Q>,
        Q: ?Sized,
    {
        self.registry.browse(value)
    }

    /// Ids whose resolved value equals `value`, in index order.
    ///
    /// Unlike [`browse`](Self::browse), aliases count as matches when they
    /// resolve to `value`.
    pub fn browse_resolved(&mut self, value: &TokenValue) -> Option<Vec<String>> {
        let ids: Vec<String> = self
            .resolve_all()
            .into_iter()
            .filter(|(_, resolved)| resolved.as_ref() == Some(value))
            .map(|(id, _)| id)
            .collect();
        if ids.is_empty() { None } else { Some(ids) }
    }
}
