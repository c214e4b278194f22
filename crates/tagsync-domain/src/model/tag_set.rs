//! TagSet - The normalized key/value tag container
//!
//! TagSet is a Value Object: two sets with the same pairs are equal,
//! regardless of the order the remote returned them in.
//! Every key carries a value; there is no "key without value" state.

use std::collections::HashMap;

/// Raw tag mapping as exchanged with remote clients and resource state
pub type TagMap = HashMap<String, String>;

/// Normalized tag container used across the tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: TagMap,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a raw mapping without filtering or transformation
    pub fn from_map(tags: TagMap) -> Self {
        Self { tags }
    }

    /// Does the set contain `key`?
    pub fn key_exists(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// Value stored under `key`, if the key exists
    pub fn key_value(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Raw projection, for the driver's resource-state representation
    pub fn to_map(&self) -> TagMap {
        self.tags.clone()
    }

    pub fn into_map(self) -> TagMap {
        self.tags
    }
}

impl From<TagMap> for TagSet {
    fn from(tags: TagMap) -> Self {
        Self::from_map(tags)
    }
}

impl<K, V> FromIterator<(K, V)> for TagSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tags: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
