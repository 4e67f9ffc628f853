//! Flatten nested token documents into dot-joined ids.
//!
//! The walk uses an explicit LIFO work stack, so document depth never touches
//! the call stack. Children are pushed in reverse key order, which makes the
//! output a depth-first pre-order walk in sorted key order.
//!
//! # Node Handling
//!
//! | Node | Normal mode | Flat mode |
//! |------|-------------|-----------|
//! | primitive | emitted | emitted |
//! | alias wrapper | emitted; a container `$value` is walked too | emitted |
//! | container | walked, never emitted itself | emitted as one opaque entry |
//!
//! `$`-prefixed keys of a container are not tokens. They are gathered into a
//! metadata container and emitted at the container's own path, provided that
//! path exists and the container is not the `$value` of an alias (the alias
//! itself already owns that id).
//!
//! An empty container walked in normal mode produces no entry at all.
//!
//! # Examples
//!
//! ```rust
//! use dtr_cli::flatten::flatten;
//! use dtr_cli::tokens::document_from_json;
//! use serde_json::json;
//!
//! let doc = document_from_json(json!({ "a": { "b": 1, "c": 2 }, "d": 3 })).unwrap();
//! let ids: Vec<_> = flatten(&doc, None, false).into_iter().map(|e| e.id).collect();
//! assert_eq!(ids, ["a.b", "a.c", "d"]);
//! ```

use tracing::{debug, trace};

use crate::tokens::{TokenMap, TokenValue};

/// One flattened token.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    pub id: String,
    pub value: TokenValue,
}

struct WorkItem<'a> {
    id: String,
    value: &'a TokenValue,
}

/// Flatten `document` into `(id, value)` entries.
///
/// `prefix` is prepended (with a `.`) to every id. With `flat` set, nested
/// containers and container `$value`s are kept whole instead of walked.
#[must_use]
pub fn flatten(document: &TokenMap, prefix: Option<&str>, flat: bool) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    let mut stack: Vec<WorkItem<'_>> = Vec::new();

    push_children(&mut stack, &mut entries, prefix, document, true);

    while let Some(WorkItem { id, value }) = stack.pop() {
        match value {
            TokenValue::Primitive(_) => entries.push(FlatEntry { id, value: value.clone() }),
            TokenValue::Alias(alias) => {
                entries.push(FlatEntry { id: id.clone(), value: value.clone() });
                if !flat && let TokenValue::Container(children) = alias.value.as_ref() {
                    push_children(&mut stack, &mut entries, Some(&id), children, false);
                }
            }
            TokenValue::Container(children) => {
                if flat {
                    entries.push(FlatEntry { id, value: value.clone() });
                } else {
                    push_children(&mut stack, &mut entries, Some(&id), children, true);
                }
            }
        }
    }

    debug!("Flattened document into {} tokens", entries.len());
    entries
}

fn push_children<'a>(
    stack: &mut Vec<WorkItem<'a>>,
    entries: &mut Vec<FlatEntry>,
    prefix: Option<&str>,
    children: &'a TokenMap,
    collect_meta: bool,
) {
    if collect_meta && let Some(path) = prefix {
        let meta: TokenMap = children
            .iter()
            .filter(|(key, _)| is_meta_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !meta.is_empty() {
            trace!("Emitting metadata for '{}'", path);
            entries.push(FlatEntry { id: path.to_string(), value: TokenValue::Container(meta) });
        }
    }

    for (key, value) in children.iter().rev().filter(|(key, _)| !is_meta_key(key)) {
        stack.push(WorkItem { id: join_id(prefix, key), value });
    }
}

fn is_meta_key(key: &str) -> bool {
    key.starts_with('$')
}

/// Join a key onto an optional dot path.
#[must_use]
pub fn join_id(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{key}"),
        _ => key.to_string(),
    }
}
