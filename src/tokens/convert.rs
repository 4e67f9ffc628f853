//! Conversion between token values and `serde_json::Value`.
//!
//! Parsed documents (JSON, YAML or TOML, all read through serde into
//! `serde_json::Value`) become token trees here. Objects carrying `$value` turn
//! into [`AliasToken`]s, other objects into containers.

use serde_json::{Map, Number, Value};

use super::value::{AliasToken, Primitive, TokenMap, TokenValue, VALUE_KEY};

impl From<Value> for TokenValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => Self::Primitive(Primitive::Bool(b)),
            Value::Number(n) => Self::Primitive(Primitive::Number(n.as_f64().unwrap_or(f64::NAN))),
            Value::String(s) => Self::Primitive(Primitive::String(s)),
            Value::Array(items) => Self::Container(
                items.into_iter().enumerate().map(|(i, item)| (i.to_string(), item.into())).collect(),
            ),
            Value::Object(mut map) => match map.remove(VALUE_KEY) {
                Some(inner) => Self::Alias(AliasToken {
                    value: Box::new(inner.into()),
                    meta: object_to_map(map),
                }),
                None => Self::Container(object_to_map(map)),
            },
        }
    }
}

/// Convert a JSON object into a token map.
pub fn object_to_map(map: Map<String, Value>) -> TokenMap {
    map.into_iter().map(|(k, v)| (k, TokenValue::from(v))).collect()
}

/// Convert a JSON value that must be an object into a token document.
///
/// Returns `None` for non-object roots.
pub fn document_from_json(value: Value) -> Option<TokenMap> {
    match value {
        Value::Object(map) => Some(object_to_map(map)),
        _ => None,
    }
}

impl From<&TokenValue> for Value {
    /// Lossy rendering: functions become `"[function]"` and non-finite numbers
    /// become `null`, since JSON can represent neither.
    fn from(value: &TokenValue) -> Self {
        match value {
            TokenValue::Primitive(Primitive::Null) => Self::Null,
            TokenValue::Primitive(Primitive::Bool(b)) => Self::Bool(*b),
            TokenValue::Primitive(Primitive::Number(n)) => number_to_json(*n),
            TokenValue::Primitive(Primitive::String(s)) => Self::String(s.clone()),
            TokenValue::Primitive(Primitive::Function(_)) => Self::String("[function]".into()),
            TokenValue::Alias(alias) => {
                let mut map = Map::new();
                map.insert(VALUE_KEY.to_string(), Self::from(alias.value.as_ref()));
                for (key, meta) in &alias.meta {
                    map.insert(key.clone(), Self::from(meta));
                }
                Self::Object(map)
            }
            TokenValue::Container(children) => Self::Object(
                children.iter().map(|(k, v)| (k.clone(), Self::from(v))).collect(),
            ),
        }
    }
}

fn number_to_json(n: f64) -> Value {
    // Integral values print without a trailing `.0`
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}
