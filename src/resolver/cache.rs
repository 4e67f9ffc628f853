//! Resolution cache.
//!
//! Results are keyed by the caller's original reference. Failed resolutions are
//! stored as [`CachedResolution::Miss`], so a broken reference is walked (and
//! warned about) once.
//!
//! # Invalidation
//!
//! The cache is monotonic. Registry mutations never touch it; only
//! [`ResolutionCache::clear`] drops entries.

use std::collections::HashMap;

use tracing::trace;

use crate::tokens::TokenValue;

/// A cached resolution outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedResolution {
    Resolved(TokenValue),
    Miss,
}

impl CachedResolution {
    pub const fn value(&self) -> Option<&TokenValue> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Miss => None,
        }
    }
}

impl From<Option<TokenValue>> for CachedResolution {
    fn from(value: Option<TokenValue>) -> Self {
        value.map_or(Self::Miss, Self::Resolved)
    }
}

/// Hit/miss counters and current size of a [`ResolutionCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a percentage, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Cache of resolved references.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<String, CachedResolution>,
    hits: usize,
    misses: usize,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a reference, counting the hit or miss.
    pub fn get(&mut self, key: &str) -> Option<&CachedResolution> {
        if let Some(entry) = self.entries.get(key) {
            self.hits += 1;
            trace!("Resolution cache hit for '{}'", key);
            Some(entry)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Look up a reference without touching the counters.
    pub fn peek(&self, key: &str) -> Option<&CachedResolution> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, outcome: impl Into<CachedResolution>) {
        self.entries.insert(key, outcome.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
