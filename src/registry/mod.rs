//! Ordered registry of keyed tickets.
//!
//! [`Registry`] stores values under string ids and assigns every ticket an
//! index from a monotonic counter. The index records registration order:
//!
//! - Updating a ticket in place (re-`register` or `upsert` of a known id) keeps
//!   its index
//! - `unregister` leaves a gap; other tickets are never renumbered
//! - A removed id that is registered again receives a fresh index
//!
//! Id lookup is a hash map probe. Index lookup and ordered enumeration go
//! through a `BTreeMap` keyed by index, so enumeration always reflects
//! registration order rather than hash order.
//!
//! # Examples
//!
//! ```rust
//! use dtr_cli::registry::{Registry, TicketInput};
//!
//! let mut registry: Registry<&str> = Registry::new();
//! registry.register(TicketInput::with_id("primary", "#007BFF"));
//! registry.register(TicketInput::with_id("danger", "#F00"));
//! registry.register(TicketInput::with_id("error", "#F00"));
//!
//! assert_eq!(registry.lookup(0), Some("primary"));
//! assert_eq!(registry.browse(&"#F00"), Some(vec!["danger".to_string(), "error".to_string()]));
//!
//! registry.unregister("primary");
//! assert_eq!(registry.lookup(0), None);
//! assert_eq!(registry.lookup(1), Some("danger"));
//! ```

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use tracing::trace;


/// The registry record for one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket<V> {
    pub id: String,
    pub index: usize,
    pub value: V,
}

/// A ticket to be registered. Without an id, the registry generates one.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketInput<V> {
    pub id: Option<String>,
    pub value: V,
}

impl<V> TicketInput<V> {
    /// An input without id; the registry will generate one.
    pub const fn new(value: V) -> Self {
        Self {
            id: None,
            value,
        }
    }

    pub fn with_id(id: impl Into<String>, value: V) -> Self {
        Self {
            id: Some(id.into()),
            value,
        }
    }
}

impl<V> From<V> for TicketInput<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

/// Keyed collection with stable insertion indices and reverse lookups.
#[derive(Debug, Clone)]
pub struct Registry<V> {
    tickets: HashMap<String, Ticket<V>>,
    order: BTreeMap<usize, String>,
    next_index: usize,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            tickets: HashMap::new(),
            order: BTreeMap::new(),
            next_index: 0,
        }
    }
}

impl<V> Registry<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered tickets.
    pub fn size(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn has(&self, id: &str) -> bool {
        self.tickets.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Ticket<V>> {
        self.tickets.get(id)
    }

    /// Current index of `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tickets.get(id).map(|ticket| ticket.index)
    }

    /// Id registered at `index`, or `None` for gaps and out-of-range indices.
    pub fn lookup(&self, index: usize) -> Option<&str> {
        self.order.get(&index).map(String::as_str)
    }

    /// Ticket registered at `index`.
    pub fn get_by_index(&self, index: usize) -> Option<&Ticket<V>> {
        self.lookup(index).and_then(|id| self.tickets.get(id))
    }

    /// Tickets in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Ticket<V>> + '_ {
        self.order.values().filter_map(|id| self.tickets.get(id))
    }

    /// Ids in index order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.values().map(String::as_str)
    }

    /// Values in index order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|ticket| &ticket.value)
    }

    /// `(id, ticket)` pairs in index order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Ticket<V>)> + '_ {
        self.iter().map(|ticket| (ticket.id.as_str(), ticket))
    }

    /// Remove a ticket. Other tickets keep their indices.
    pub fn unregister(&mut self, id: &str) -> Option<Ticket<V>> {
        let ticket = self.tickets.remove(id)?;
        self.order.remove(&ticket.index);
        trace!("Unregistered '{}' (index {})", id, ticket.index);
        Some(ticket)
    }

    /// Remove every ticket. The index counter keeps counting.
    pub fn clear(&mut self) {
        self.tickets.clear();
        self.order.clear();
    }

    fn insert(&mut self, id: String, value: V) -> &Ticket<V> {
        match self.tickets.entry(id) {
            Entry::Occupied(entry) => {
                let ticket = entry.into_mut();
                ticket.value = value;
                trace!("Updated '{}' in place (index {})", ticket.id, ticket.index);
                ticket
            }
            Entry::Vacant(entry) => {
                let id = entry.key().clone();
                let index = self.next_index;
                self.next_index += 1;
                self.order.insert(index, id.clone());
                trace!("Registered '{}' at index {}", id, index);
                entry.insert(Ticket {
                    id,
                    index,
                    value,
                })
            }
        }
    }
}

impl<V: Clone> Registry<V> {
    /// Register a ticket.
    ///
    /// A known id is updated in place and keeps its index. A missing id is
    /// replaced by a generated UUID.
    pub fn register(&mut self, input: impl Into<TicketInput<V>>) -> Ticket<V> {
        let TicketInput {
            id,
            value,
        } = input.into();
        let id = id.unwrap_or_else(generate_id);
        self.insert(id, value).clone()
    }

    /// Create the ticket if absent, otherwise replace its value in place.
    pub fn upsert(&mut self, id: &str, value: V) -> Ticket<V> {
        self.insert(id.to_string(), value).clone()
    }

    /// Register many tickets. Input order becomes index order.
    pub fn onboard<I, T>(&mut self, inputs: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator<Item = T>,
        T: Into<TicketInput<V>>,
    {
        inputs.into_iter().map(|input| self.register(input)).collect()
    }
}

impl<V> Registry<V> {
    /// Ids whose stored value equals `value`, in index order.
    ///
    /// Comparison uses the value type's `PartialEq`; for token values that is
    /// strict equality (structural for objects, identity for functions).
    /// Returns `None` when nothing matches.
    pub fn browse<Q>(&self, value: &Q) -> Option<Vec<String>>
    where
        V: PartialEq<Q>,
        Q: ?Sized,
    {
        let ids: Vec<String> = self
            .iter()
            .filter(|ticket| ticket.value == *value)
            .map(|ticket| ticket.id.clone())
            .collect();
        if ids.is_empty() { None } else { Some(ids) }
    }
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
