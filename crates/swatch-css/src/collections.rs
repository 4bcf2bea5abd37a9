//! Insertion-ordered token collections.
//!
//! Both collections keep the first occurrence of a value and ignore later
//! duplicates, so iteration order is first-seen order.

use std::collections::{HashMap, HashSet};

use serde::{Serialize, Serializer};

/// A deduplicated, insertion-ordered set of literal token values.
///
/// Uniqueness is exact string equality: `#FFF` and `#fff` are distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    values: Vec<String>,
    seen: HashSet<String>,
}

impl TokenSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.seen.contains(&value) {
            return false;
        }
        let _ = self.seen.insert(value.clone());
        self.values.push(value);
        true
    }

    /// Add every value of `other` that is not already present, in its order.
    pub fn union_with(&mut self, other: &Self) {
        for value in &other.values {
            let _ = self.insert(value.as_str());
        }
    }

    /// Whether `value` is present.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Values in first-seen order, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.values
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            let _ = set.insert(value);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for TokenSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            let _ = self.insert(value);
        }
    }
}

impl Serialize for TokenSet {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(&self.values)
    }
}

/// An insertion-ordered map where the first value stored under a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TokenMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` unless the key is already present.
    ///
    /// Returns `false`, leaving the existing value in place, for a repeated key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.index.contains_key(&key) {
            return false;
        }
        let _ = self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value.into()));
        true
    }

    /// The value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl Serialize for TokenMap {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter())
    }
}
