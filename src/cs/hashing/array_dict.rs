//! Unordered array dictionary: the O(n) baseline the hash tables are measured against.

use crate::cs::hashing::dictionary::Dictionary;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A capacity-bounded, unordered array of records searched linearly.
///
/// Keys only need `Eq`; nothing is hashed.
#[derive(Debug, Clone)]
pub struct ArrayDictionary<K, V> {
    entries: Vec<Entry<K, V>>,
    max_len: usize,
}

impl<K, V> ArrayDictionary<K, V> {
    /// Creates an empty dictionary that holds at most `max_len` records.
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_len),
            max_len,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_len
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }
}

impl<K: Eq, V> ArrayDictionary<K, V> {
    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|e| &e.key == key)
    }
}

impl<K: Eq, V> Dictionary<K, V> for ArrayDictionary<K, V> {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn find(&self, key: &K) -> Result<&V> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| &e.value)
            .ok_or(Error::NotFound)
    }

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        if let Some(idx) = self.position(&key) {
            self.entries[idx].value = value;
            return Ok(());
        }
        if self.entries.len() >= self.max_len {
            return Err(Error::Full {
                capacity: self.max_len,
            });
        }
        self.entries.push(Entry { key, value });
        Ok(())
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.position(key).ok_or(Error::NotFound)?;
        // the last record moves into the hole
        Ok(self.entries.swap_remove(idx).value)
    }

    fn size(&self) -> usize {
        self.entries.len()
    }
}
