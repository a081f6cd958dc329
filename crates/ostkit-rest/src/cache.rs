//! Per-client cache of entities seen in responses
//!
//! Populated as a side effect of extracting results. Entries are never
//! evicted; the cache lives as long as the client that owns it.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Result categories whose entities are cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    User,
    Action,
    Transaction,
    Airdrop,
    Transfer,
}

impl CacheCategory {
    /// Every declared category
    pub const ALL: [CacheCategory; 5] = [
        Self::User,
        Self::Action,
        Self::Transaction,
        Self::Airdrop,
        Self::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Action => "action",
            Self::Transaction => "transaction",
            Self::Airdrop => "airdrop",
            Self::Transfer => "transfer",
        }
    }

    /// Map a `result_type` to its category, if it is cacheable
    ///
    /// The result type is singularized by [`singularize`] first, so both
    /// `"action"` and `"actions"` map to [`CacheCategory::Action`].
    pub fn for_result_type(result_type: &str) -> Option<Self> {
        match singularize(result_type) {
            "user" => Some(Self::User),
            "action" => Some(Self::Action),
            "transaction" => Some(Self::Transaction),
            "airdrop" => Some(Self::Airdrop),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip one trailing `s` from a result type
///
/// Deliberately naive: `"status"` becomes `"statu"`. The vendor's type names
/// are the contract, so no smarter pluralization is applied.
pub fn singularize(result_type: &str) -> &str {
    result_type.strip_suffix('s').unwrap_or(result_type)
}

/// Entity cache keyed by category, then by entity id
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: HashMap<CacheCategory, HashMap<String, Value>>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    /// Create an empty cache with every declared category present
    pub fn new() -> Self {
        Self {
            entries: CacheCategory::ALL
                .iter()
                .map(|category| (*category, HashMap::new()))
                .collect(),
        }
    }

    /// Look up a cached entity
    pub fn get(&self, category: CacheCategory, id: &str) -> Option<&Value> {
        self.entries.get(&category).and_then(|entities| entities.get(id))
    }

    /// Store an entity, replacing any previous value for the same id
    pub fn put(&mut self, category: CacheCategory, id: impl Into<String>, value: Value) {
        self.entries
            .entry(category)
            .or_default()
            .insert(id.into(), value);
    }

    /// Store `payload` if it carries an id, or each element of an array
    /// payload that does. Returns the number of entities stored.
    pub fn put_entities(&mut self, category: CacheCategory, payload: &Value) -> usize {
        match payload {
            Value::Array(items) => items
                .iter()
                .filter(|item| self.put_entity(category, item))
                .count(),
            other => usize::from(self.put_entity(category, other)),
        }
    }

    fn put_entity(&mut self, category: CacheCategory, entity: &Value) -> bool {
        match entity_id(entity) {
            Some(id) => {
                self.put(category, id, entity.clone());
                true
            }
            None => false,
        }
    }

    /// Number of cached entities in a category
    pub fn len(&self, category: CacheCategory) -> usize {
        self.entries.get(&category).map_or(0, HashMap::len)
    }

    /// Whether no category holds any entity
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }

    /// Drop every cached entity, keeping the declared categories
    pub fn clear(&mut self) {
        for entities in self.entries.values_mut() {
            entities.clear();
        }
    }
}

/// The `id` of an entity, as a string
fn entity_id(entity: &Value) -> Option<String> {
    match entity.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
