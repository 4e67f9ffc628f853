//! Token value model.
//!
//! A token document is a tree of [`TokenValue`] nodes. Each node has one of three
//! shapes, and every algorithm in this crate matches on that shape instead of
//! probing fields:
//!
//! - [`TokenValue::Primitive`] - a leaf (string, number, boolean, null or function)
//! - [`TokenValue::Alias`] - a wrapper object carrying `$value` plus `$`-metadata
//! - [`TokenValue::Container`] - a mapping of further nodes
//!
//! # Equality
//!
//! Equality is strict: numbers compare as `f64` (so `NaN != NaN`), functions
//! compare by identity, containers and aliases compare structurally.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Ordered mapping of keys to token nodes.
///
/// Keys are kept sorted, which makes flattening and display deterministic.
pub type TokenMap = BTreeMap<String, TokenValue>;

/// Key that turns an object into an alias wrapper.
pub const VALUE_KEY: &str = "$value";
/// W3C `$type` metadata key.
pub const TYPE_KEY: &str = "$type";
/// W3C `$description` metadata key.
pub const DESCRIPTION_KEY: &str = "$description";
/// W3C `$extensions` metadata key.
pub const EXTENSIONS_KEY: &str = "$extensions";
/// W3C `$deprecated` metadata key.
pub const DEPRECATED_KEY: &str = "$deprecated";

/// Signature of a callable token value.
pub type TokenCallable = dyn Fn(&[TokenValue]) -> TokenValue + Send + Sync;

/// A callable stored as a token value.
///
/// Clones share the same underlying function, and two `TokenFn`s are equal only
/// when they point at the same function.
///
/// # Examples
///
/// ```rust
/// use dtr_cli::tokens::{TokenFn, TokenValue};
///
/// let double = TokenFn::new(|args| match args.first().and_then(TokenValue::as_f64) {
///     Some(n) => TokenValue::from(n * 2.0),
///     None => TokenValue::null(),
/// });
///
/// assert_eq!(double.call(&[TokenValue::from(4.0)]), TokenValue::from(8.0));
/// assert_eq!(double, double.clone());
/// ```
#[derive(Clone)]
pub struct TokenFn(Arc<TokenCallable>);

impl TokenFn {
    /// Wrap a closure as a token function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[TokenValue]) -> TokenValue + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the function.
    pub fn call(&self, args: &[TokenValue]) -> TokenValue {
        (self.0)(args)
    }
}

impl PartialEq for TokenFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TokenFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenFn({:p})", Arc::as_ptr(&self.0))
    }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Function(TokenFn),
}

/// Alias wrapper: an object with a `$value` key.
///
/// `meta` holds every other key of the wrapper object, W3C metadata
/// (`$type`, `$description`, `$extensions`, `$deprecated`) included.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasToken {
    pub value: Box<TokenValue>,
    pub meta: TokenMap,
}

impl AliasToken {
    /// Create an alias wrapper around `value` with no metadata.
    pub fn new(value: impl Into<TokenValue>) -> Self {
        Self {
            value: Box::new(value.into()),
            meta: TokenMap::new(),
        }
    }

    /// Add a metadata entry. The key is stored as given.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// The `$type` metadata, when it is a string.
    pub fn token_type(&self) -> Option<&str> {
        self.meta.get(TYPE_KEY).and_then(TokenValue::as_str)
    }

    /// The `$description` metadata, when it is a string.
    pub fn description(&self) -> Option<&str> {
        self.meta.get(DESCRIPTION_KEY).and_then(TokenValue::as_str)
    }

    /// The raw `$extensions` metadata.
    pub fn extensions(&self) -> Option<&TokenValue> {
        self.meta.get(EXTENSIONS_KEY)
    }

    /// Whether the token is marked deprecated.
    ///
    /// W3C allows `$deprecated` to be a boolean or an explanation string; any
    /// string counts as deprecated.
    pub fn is_deprecated(&self) -> bool {
        match self.meta.get(DEPRECATED_KEY) {
            Some(TokenValue::Primitive(Primitive::Bool(flag))) => *flag,
            Some(TokenValue::Primitive(Primitive::String(_))) => true,
            _ => false,
        }
    }

    /// Follow nested `$value` wrappers down to the first non-alias value.
    pub fn innermost(&self) -> &TokenValue {
        self.value.unwrap_alias()
    }
}

/// A node in a token document.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Primitive(Primitive),
    Alias(AliasToken),
    Container(TokenMap),
}

impl TokenValue {
    /// The `null` primitive.
    #[must_use]
    pub const fn null() -> Self {
        Self::Primitive(Primitive::Null)
    }

    /// An empty container.
    #[must_use]
    pub const fn empty_container() -> Self {
        Self::Container(TokenMap::new())
    }

    /// Build an alias wrapper around `value`.
    pub fn alias(value: impl Into<TokenValue>) -> Self {
        Self::Alias(AliasToken::new(value))
    }

    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Primitive(Primitive::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Primitive(Primitive::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_function(&self) -> Option<&TokenFn> {
        match self {
            Self::Primitive(Primitive::Function(f)) => Some(f),
            _ => None,
        }
    }

    pub const fn as_alias(&self) -> Option<&AliasToken> {
        match self {
            Self::Alias(alias) => Some(alias),
            _ => None,
        }
    }

    pub const fn as_container(&self) -> Option<&TokenMap> {
        match self {
            Self::Container(map) => Some(map),
            _ => None,
        }
    }

    /// Follow `$value` wrappers until a primitive or container is reached.
    pub fn unwrap_alias(&self) -> &TokenValue {
        let mut current = self;
        while let Self::Alias(alias) = current {
            current = &alias.value;
        }
        current
    }

    /// The alias-shaped string this value points at, looking through `$value`
    /// wrappers, or `None` when the value is concrete.
    pub fn alias_target(&self) -> Option<&str> {
        self.unwrap_alias().as_str().filter(|s| super::is_alias(s))
    }

    /// Look up a child key of a container.
    pub fn child(&self, key: &str) -> Option<&TokenValue> {
        self.as_container().and_then(|map| map.get(key))
    }
}

impl PartialEq<str> for TokenValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for TokenValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl From<Primitive> for TokenValue {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<AliasToken> for TokenValue {
    fn from(value: AliasToken) -> Self {
        Self::Alias(value)
    }
}

impl From<TokenMap> for TokenValue {
    fn from(value: TokenMap) -> Self {
        Self::Container(value)
    }
}

impl From<TokenFn> for TokenValue {
    fn from(value: TokenFn) -> Self {
        Self::Primitive(Primitive::Function(value))
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        Self::Primitive(Primitive::String(value.to_string()))
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        Self::Primitive(Primitive::String(value))
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        Self::Primitive(Primitive::Number(value))
    }
}

impl From<i32> for TokenValue {
    fn from(value: i32) -> Self {
        Self::Primitive(Primitive::Number(f64::from(value)))
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        Self::Primitive(Primitive::Bool(value))
    }
}

impl<K, V> FromIterator<(K, V)> for TokenValue
where
    K: Into<String>,
    V: Into<TokenValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Container(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Canonical text form.
///
/// Top-level strings render bare; everything nested renders as compact JSON
/// with sorted keys. Functions render as `[function]`, non-finite numbers as
/// `NaN`, `Infinity` and `-Infinity`.
impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(Primitive::String(s)) => f.write_str(s),
            other => write_json(other, f),
        }
    }
}

/// Alias wrappers always render as a JSON object, `$value` first.
impl fmt::Display for AliasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_alias(self, f)
    }
}

fn write_json(value: &TokenValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        TokenValue::Primitive(primitive) => write_primitive(primitive, f),
        TokenValue::Alias(alias) => write_alias(alias, f),
        TokenValue::Container(map) => {
            f.write_str("{")?;
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_key(key, f)?;
                write_json(value, f)?;
            }
            f.write_str("}")
        }
    }
}

fn write_alias(alias: &AliasToken, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    write_key(VALUE_KEY, f)?;
    write_json(&alias.value, f)?;
    for (key, value) in &alias.meta {
        f.write_str(",")?;
        write_key(key, f)?;
        write_json(value, f)?;
    }
    f.write_str("}")
}

fn write_key(key: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:", serde_json::Value::from(key))
}

fn write_primitive(primitive: &Primitive, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match primitive {
        Primitive::Null => f.write_str("null"),
        Primitive::Bool(b) => write!(f, "{b}"),
        Primitive::Number(n) if n.is_nan() => f.write_str("NaN"),
        Primitive::Number(n) if n.is_infinite() => {
            f.write_str(if n.is_sign_positive() { "Infinity" } else { "-Infinity" })
        }
        Primitive::Number(n) => write!(f, "{n}"),
        Primitive::String(s) => write!(f, "{}", serde_json::Value::from(s.as_str())),
        Primitive::Function(_) => f.write_str("[function]"),
    }
}
