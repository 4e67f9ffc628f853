//! Alias resolution.
//!
//! The [`Resolver`] turns a token reference into a concrete value by walking
//! the alias graph stored in a [`Registry`]. It never mutates the registry; its
//! only state is the [`ResolutionCache`].
//!
//! # Algorithm
//!
//! 1. Return a cached outcome for the reference if there is one (misses included)
//! 2. Take the path: the reference string, or the `$value` of an alias object
//! 3. Strip the braces (`{a.b}` and `{a}.b` both become `a.b`)
//! 4. Fail on a path already seen during this call (cycle)
//! 5. Look the path up directly; failing that, find the longest registered
//!    prefix and keep the trailing segments as a remainder
//! 6. Walk the remainder through the matched value's nested containers,
//!    looking through `$value` wrappers at each hop
//! 7. Follow the reached value if it is an alias-shaped string (directly or
//!    inside `$value` wrappers); otherwise it is the result
//!
//! Following an alias loops back to step 3 rather than recursing, so chain
//! length never grows the call stack. Every reference followed during one
//! call is cached with the final outcome.
//!
//! A partial path whose prefix is an alias can grow without ever repeating
//! (`x = {x.a}` turns `x.a` into `x.a.a`, ...). Such walks are cut off after
//! a number of prefix expansions bounded by the registry size times the
//! deepest id. That cut-off depends on where the walk started, so its miss is
//! cached under the caller's reference only.
//!
//! # Failures
//!
//! Missing ids, broken path segments and cycles are not errors: they log a
//! warning and resolve to `None`. The negative outcome is cached, so each
//! failing reference warns once.
//!
//! # Examples
//!
//! ```rust
//! use dtr_cli::registry::{Registry, TicketInput};
//! use dtr_cli::resolver::{Resolver, TokenRef};
//! use dtr_cli::tokens::TokenValue;
//!
//! let mut registry = Registry::new();
//! registry.register(TicketInput::with_id("base", TokenValue::from("#007BFF")));
//! registry.register(TicketInput::with_id("primary", TokenValue::alias("{base}")));
//!
//! let mut resolver = Resolver::new();
//! let value = resolver.resolve(&registry, &TokenRef::from("{primary}"));
//! assert_eq!(value, Some(TokenValue::from("#007BFF")));
//! ```

mod cache;


pub use cache::{CacheStats, CachedResolution, ResolutionCache};

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::registry::{Registry, Ticket};
use crate::tokens::{AliasToken, Primitive, TokenValue, is_alias, normalize_reference};

/// A reference to resolve: a path (plain or brace-wrapped) or an alias object.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenRef {
    Path(String),
    Alias(AliasToken),
}

impl TokenRef {
    /// Key under which the outcome is cached: the string itself, or the
    /// canonical JSON form of an alias object.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Path(path) => path.clone(),
            Self::Alias(alias) => alias.to_string(),
        }
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.write_str(path),
            Self::Alias(alias) => write!(f, "{alias}"),
        }
    }
}

impl From<&str> for TokenRef {
    fn from(value: &str) -> Self {
        Self::Path(value.to_string())
    }
}

impl From<String> for TokenRef {
    fn from(value: String) -> Self {
        Self::Path(value)
    }
}

impl From<&String> for TokenRef {
    fn from(value: &String) -> Self {
        Self::Path(value.clone())
    }
}

impl From<AliasToken> for TokenRef {
    fn from(value: AliasToken) -> Self {
        Self::Alias(value)
    }
}

impl From<&AliasToken> for TokenRef {
    fn from(value: &AliasToken) -> Self {
        Self::Alias(value.clone())
    }
}

/// Outcome of one hop of the walk.
enum Step {
    Done(TokenValue),
    Follow(String),
    Failed,
    /// Gave up after too many prefix expansions.
    Exhausted,
}

/// Paths seen during one `resolve` call, in visiting order.
#[derive(Default)]
struct Walk {
    seen: HashSet<String>,
    chain: Vec<String>,
    expansions: usize,
    expansion_limit: Option<usize>,
}

impl Walk {
    fn enter(&mut self, path: &str) -> bool {
        self.chain.push(path.to_string());
        self.seen.insert(path.to_string())
    }

    /// Count one swap of an aliased prefix for its target. Returns `false`
    /// once the walk has expanded more often than any finite path needs.
    fn expand(&mut self, registry: &Registry<TokenValue>) -> bool {
        let limit = *self.expansion_limit.get_or_insert_with(|| {
            let depth = registry.keys().map(|id| id.split('.').count()).max().unwrap_or(1);
            registry.size().max(1) * (depth + 1)
        });
        self.expansions += 1;
        self.expansions <= limit
    }

    fn describe(&self) -> String {
        self.chain.join(" -> ")
    }
}

/// Resolves references against a registry and caches the outcomes.
#[derive(Debug, Default)]
pub struct Resolver {
    cache: ResolutionCache,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `reference` to a concrete value.
    ///
    /// Returns `None` when the reference cannot be resolved. Concrete values
    /// come back unchanged: `0`, `false` and `null` are `Some`, and functions
    /// are the same callable that was registered.
    pub fn resolve(
        &mut self,
        registry: &Registry<TokenValue>,
        reference: &TokenRef,
    ) -> Option<TokenValue> {
        let key = reference.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            return hit.value().cloned();
        }

        let start = match reference {
            TokenRef::Path(path) => path.clone(),
            TokenRef::Alias(alias) => match alias.innermost() {
                TokenValue::Primitive(Primitive::String(path)) => path.clone(),
                concrete => {
                    let value = concrete.clone();
                    self.cache.insert(key, Some(value.clone()));
                    return Some(value);
                }
            },
        };

        let mut walk = Walk::default();
        let mut followed = vec![key];
        let mut current = start;

        let mut exhausted = false;
        let outcome = loop {
            match step(registry, &current, &mut walk) {
                Step::Done(value) => break Some(value),
                Step::Failed => break None,
                Step::Exhausted => {
                    exhausted = true;
                    break None;
                }
                Step::Follow(next) => {
                    if let Some(hit) = self.cache.get(&next) {
                        break hit.value().cloned();
                    }
                    followed.push(next.clone());
                    current = next;
                }
            }
        };

        debug!(
            "Resolved '{}' in {} hop(s): {}",
            reference,
            followed.len(),
            if outcome.is_some() { "found" } else { "unresolved" }
        );
        if exhausted {
            followed.truncate(1);
        }
        for key in followed {
            self.cache.insert(key, outcome.clone());
        }
        outcome
    }

    pub const fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop all cached outcomes.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

fn step(registry: &Registry<TokenValue>, reference: &str, walk: &mut Walk) -> Step {
    let path = normalize_reference(reference);

    if !walk.enter(&path) {
        warn!("Circular token reference detected: {}", walk.describe());
        return Step::Failed;
    }

    let Some((ticket, remainder)) = find(registry, &path) else {
        warn!("Token '{}' not found", path);
        return Step::Failed;
    };

    if remainder.is_empty() {
        return settle(&ticket.value);
    }

    let base = ticket.value.unwrap_alias();
    if let Some(target) = base.as_str().filter(|s| is_alias(s)) {
        let rest = remainder.join(".");
        if !walk.expand(registry) {
            warn!("Circular token reference detected: {}", walk.describe());
            return Step::Exhausted;
        }
        return Step::Follow(format!("{target}.{rest}"));
    }

    let mut current = base;
    let mut reached = ticket.id.clone();
    for segment in &remainder {
        match current.child(segment) {
            Some(next) => {
                current = next.unwrap_alias();
                reached.push('.');
                reached.push_str(segment);
            }
            None => {
                warn!("Token path '{}' not found: '{}' has no key '{}'", path, reached, segment);
                return Step::Failed;
            }
        }
    }

    settle(current)
}

/// Follow an alias-shaped value, or accept it as the result.
fn settle(value: &TokenValue) -> Step {
    match value.alias_target() {
        Some(target) => Step::Follow(target.to_string()),
        None => Step::Done(value.unwrap_alias().clone()),
    }
}

/// Find the ticket for `path`: an exact id match, or else the longest
/// registered dot-prefix together with the unmatched trailing segments.
fn find<'r, 'p>(
    registry: &'r Registry<TokenValue>,
    path: &'p str,
) -> Option<(&'r Ticket<TokenValue>, Vec<&'p str>)> {
    if let Some(ticket) = registry.get(path) {
        return Some((ticket, Vec::new()));
    }
    if !path.contains('.') {
        return None;
    }

    let segments: Vec<&str> = path.split('.').collect();
    (1..segments.len()).rev().find_map(|end| {
        registry.get(&segments[..end].join(".")).map(|ticket| (ticket, segments[end..].to_vec()))
    })
}
