//! Minimal association list backing the map kind.
//!
//! Lookups are linear. This is only the payload the map kind needs to
//! participate in release, hashing, and rendering; it is not a hash map.

use crate::value::{Val, Value};

/// Ordered key/value entries with unique keys.
#[derive(Clone, Debug, Default)]
pub struct ValueMap {
    entries: Vec<(Val, Val)>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `value` under `key`.
    ///
    /// If an equal key is already present its value is replaced and
    /// returned; the new key handle is released in that case.
    pub fn insert(&mut self, key: Val, value: Val) -> Option<Val> {
        match self.position(&key) {
            Some(i) => {
                key.release();
                Some(std::mem::replace(&mut self.entries[i].1, value))
            }
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Val> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Remove the entry for `key`, releasing the stored key and returning
    /// the value.
    pub fn remove(&mut self, key: &Value) -> Option<Val> {
        let (k, v) = self.entries.remove(self.position(key)?);
        k.release();
        Some(v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Val, &Val)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Release every key and value, leaving the map empty.
    pub fn release(&mut self) {
        for (k, v) in self.entries.drain(..) {
            k.release();
            v.release();
        }
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|(k, _)| **k == *key)
    }
}

// Equal maps hold the same entries regardless of insertion order.
impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}
