//! # Separate Chaining Hash Table
//!
//! A dictionary that resolves collisions by keeping every record of a bucket in its own chain.
//! - **Fixed bucket count**: chosen at construction and never changed, so chains simply get
//!   longer as the table fills. Inserts never fail.
//! - **Most-recent-first** chains: new records are pushed to the head of their chain.
//! - **Order-preserving** removal: unlinking a record leaves the rest of its chain in order.

use std::collections::VecDeque;
use std::fmt;

use log::debug;

use crate::cs::hashing::dictionary::Dictionary;
use crate::cs::hashing::hash_fn::KeyHash;
use crate::error::{Error, Result};

/// Default number of buckets if none specified.
const DEFAULT_BUCKET_COUNT: usize = 100;

/// A single entry in a chain: `(K, V)`.
#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A collision chain, head first.
type Chain<K, V> = VecDeque<Entry<K, V>>;

/// A separate-chaining dictionary with a fixed number of buckets.
#[derive(Debug, Clone)]
pub struct ChainedTable<K, V> {
    buckets: Vec<Chain<K, V>>,
    /// The number of stored key-value pairs.
    len: usize,
}

/// A builder for the [`ChainedTable`].
#[derive(Debug, Clone)]
pub struct ChainedTableBuilder {
    bucket_count: usize,
}

impl Default for ChainedTableBuilder {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

impl ChainedTableBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the number of buckets.
    /// The number of records is unbounded; they are just spread across this many chains.
    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be > 0");
        self.bucket_count = bucket_count;
        self
    }

    pub fn build<K, V>(self) -> ChainedTable<K, V> {
        let mut buckets = Vec::with_capacity(self.bucket_count);
        buckets.resize_with(self.bucket_count, Default::default);

        ChainedTable { buckets, len: 0 }
    }
}

impl<K, V> ChainedTable<K, V> {
    /// Creates a table with `bucket_count` empty chains.
    ///
    /// # Panics
    /// If `bucket_count` is zero.
    pub fn new(bucket_count: usize) -> Self {
        ChainedTableBuilder::new()
            .with_bucket_count(bucket_count)
            .build()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Same as [`bucket_count`](Self::bucket_count); records are not bounded by it.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Average chain length.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.bucket_count() as f64
    }

    /// Length of the chain in `bucket`, or `None` if the index is out of range.
    pub fn chain_len(&self, bucket: usize) -> Option<usize> {
        self.buckets.get(bucket).map(VecDeque::len)
    }

    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(VecDeque::len).max().unwrap_or(0)
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket, each chain head first.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|entry| (&entry.key, &entry.value)))
    }
}

impl<K: Eq + KeyHash, V> ChainedTable<K, V> {
    /// Bucket index for a given key.
    fn bucket_index(&self, key: &K) -> usize {
        (key.key_hash() % self.bucket_count() as u64) as usize
    }

    /// Chain position of `key` within its bucket.
    fn position(&self, bucket: usize, key: &K) -> Option<usize> {
        self.buckets[bucket].iter().position(|entry| &entry.key == key)
    }
}

impl<K: Eq + KeyHash, V> Dictionary<K, V> for ChainedTable<K, V> {
    fn clear(&mut self) {
        debug!(
            "clearing chained table ({} records, longest chain {})",
            self.len,
            self.longest_chain()
        );
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    fn find(&self, key: &K) -> Result<&V> {
        let bucket = self.bucket_index(key);
        self.buckets[bucket]
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| &entry.value)
            .ok_or(Error::NotFound)
    }

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        let bucket = self.bucket_index(&key);
        let chain = &mut self.buckets[bucket];

        if let Some(entry) = chain.iter_mut().find(|entry| entry.key == key) {
            entry.value = value;
            return Ok(());
        }
        chain.push_front(Entry { key, value });
        self.len += 1;
        Ok(())
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        let bucket = self.bucket_index(key);
        let pos = self.position(bucket, key).ok_or(Error::NotFound)?;
        let entry = self.buckets[bucket]
            .remove(pos)
            .ok_or(Error::NotFound)?;
        self.len -= 1;
        Ok(entry.value)
    }

    fn size(&self) -> usize {
        self.len
    }
}

/// One line per bucket: `"bucket {i}: [{k}: {v}] ..."`, chain head first.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for ChainedTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.buckets.iter().enumerate() {
            write!(f, "bucket {}: ", i)?;
            for entry in chain {
                write!(f, "[{}: {}] ", entry.key, entry.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
