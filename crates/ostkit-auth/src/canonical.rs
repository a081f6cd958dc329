//! Canonical query strings
//!
//! OST KIT verifies a signature computed over `path?sorted-query`. The
//! expected canonical form has two encoding quirks that must be matched
//! byte for byte or the server rejects the signature:
//!
//! - GET values are encoded twice. Spaces are first replaced by `+`, the
//!   value is form-encoded, and the whole pair is form-encoded again when
//!   the query is assembled, so `"a b"` becomes `a%252Bb`.
//! - POST canonical strings are encoded once, then `%5B%5D` is collapsed to
//!   a literal `[]` and `%20` to `+`.
//!
//! "Form-encoded" here means: ASCII alphanumerics and `-`, `_`, `.` pass
//! through, space becomes `+`, every other byte becomes `%XX`.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;

/// Bytes escaped by form encoding
const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Suffix marking list-valued keys
pub const LIST_SUFFIX: &str = "[]";

/// A single request parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain string
    Str(String),
    /// Integer
    Int(i64),
    /// Exact decimal amount
    Decimal(Decimal),
    /// Boolean, rendered as `"true"` / `"false"`
    Bool(bool),
    /// List, rendered as one `key[]=item` pair per item
    List(Vec<String>),
}

impl ParamValue {
    /// Integer view of the value, parsing strings if needed
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Display form of a single value
///
/// A list displays comma-joined for logs only. Requests never render a list
/// through `Display`; [`Params::pairs`] expands it to one pair per item.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Request parameters, always iterated in ascending key order
///
/// List values are stored under a key ending in `[]`; the suffix is added on
/// insert if the caller left it off, so the stored key is also the sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: BTreeMap<String, ParamValue>,
}

impl Params {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert that skips `None`
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let mut key = key.into();
        let value = value.into();
        if matches!(value, ParamValue::List(_)) && !key.ends_with(LIST_SUFFIX) {
            key.push_str(LIST_SUFFIX);
        }
        self.entries.insert(key, value);
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Whether a parameter is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate keys and values in sorted order
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.entries.iter()
    }

    /// Flatten into `(key, value)` pairs in sorted order
    ///
    /// Lists expand to one pair per item, all under the `[]` key.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                ParamValue::List(items) => {
                    pairs.extend(items.iter().map(|item| (key.clone(), item.clone())));
                }
                other => pairs.push((key.clone(), other.to_string())),
            }
        }
        pairs
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Form-encode a string (alphanumerics and `-_.` kept, space as `+`)
pub fn form_encode(input: &str) -> String {
    utf8_percent_encode(input, FORM).to_string().replace("%20", "+")
}

/// Canonical string signed for a GET request
pub fn canonical_get_query(path: &str, params: &Params) -> String {
    let query = params
        .pairs()
        .iter()
        .map(|(key, value)| {
            let inner = form_encode(&value.replace(' ', "+"));
            format!("{}={}", form_encode(key), form_encode(&inner))
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

/// Canonical string signed for a POST request
pub fn canonical_post_query(path: &str, params: &Params) -> String {
    let query = params
        .pairs()
        .iter()
        .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
        .replace("%5B%5D", LIST_SUFFIX)
        .replace("%20", "+")
}
