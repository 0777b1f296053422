//! # Linear Probing Hash Table
//!
//! A **closed-addressing** dictionary: every record lives directly in one fixed-size slot array,
//! and collisions are resolved by stepping through alternate slots of that same array.
//!
//! ## Key Features
//! - **Fixed capacity**: the slot array is allocated once and never rehashed. Once it holds
//!   `capacity` records, further inserts fail with [`Error::Full`].
//! - **Linear probing** with a configurable step: the probe sequence for hash code `h` is
//!   `(h + step * i) mod capacity` for `i` in `0..capacity`.
//! - **Tombstones**: removal leaves a `Tombstone` marker instead of an `Empty` slot, so lookups
//!   for keys that probed past the removed record keep working. Insertion reclaims the first
//!   tombstone on the probe path.
//!
//! ## Capacity policy
//! An insert is refused as soon as the record count equals the capacity, before any probing,
//! and an insert whose probe sequence ends without reaching an `Empty` slot is refused as well,
//! even when it passed tombstones. Callers size the table generously (the quota simulator uses
//! four slots per order) instead of relying on tombstone space.

use std::fmt;

use log::{debug, warn};

use crate::cs::hashing::dictionary::Dictionary;
use crate::cs::hashing::hash_fn::KeyHash;
use crate::error::{Error, Result};

/// Capacity used by [`LinearProbingBuilder::new`] when none is given.
const DEFAULT_CAPACITY: usize = 100;
/// Linear probing constant used when none is given.
const DEFAULT_PROBE_STEP: usize = 1;

/// A slot can be `Empty`, `Tombstone` (used to be occupied but removed), or `Occupied(key, value)`.
#[derive(Debug, Clone)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(K, V),
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

/// Slot indices visited for one key, in order.
struct ProbeSequence {
    index: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        self.index = (self.index + self.step) % self.capacity;
        Some(current)
    }
}

/// A builder for [`LinearProbingTable`], allowing you to specify capacity and probe step.
#[derive(Debug, Clone)]
pub struct LinearProbingBuilder {
    capacity: usize,
    probe_step: usize,
}

impl Default for LinearProbingBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            probe_step: DEFAULT_PROBE_STEP,
        }
    }
}

impl LinearProbingBuilder {
    /// Create a new builder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of slots. This is also the maximum number of records.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        self.capacity = capacity;
        self
    }

    /// Sets the linear probing constant.
    ///
    /// A step sharing a factor with the capacity visits only part of the table, so inserts can
    /// report [`Error::Full`] before the table is actually full.
    pub fn with_probe_step(mut self, step: usize) -> Self {
        assert!(step > 0, "probe step must be > 0");
        self.probe_step = step;
        self
    }

    pub fn build<K, V>(self) -> LinearProbingTable<K, V> {
        let mut slots = Vec::with_capacity(self.capacity);
        slots.resize_with(self.capacity, Default::default);

        LinearProbingTable {
            slots,
            len: 0,
            tombstones: 0,
            probe_step: self.probe_step,
        }
    }
}

/// Fixed-capacity hash table using linear probing and tombstone deletion.
#[derive(Debug, Clone)]
pub struct LinearProbingTable<K, V> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    probe_step: usize,
}

impl<K, V> LinearProbingTable<K, V> {
    /// Creates a table with `capacity` slots and probe step 1.
    ///
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        LinearProbingBuilder::new().with_capacity(capacity).build()
    }

    /// Creates a table with `capacity` slots and the given probe step.
    ///
    /// # Panics
    /// If `capacity` or `probe_step` is zero.
    pub fn with_probe_step(capacity: usize, probe_step: usize) -> Self {
        LinearProbingBuilder::new()
            .with_capacity(capacity)
            .with_probe_step(probe_step)
            .build()
    }

    /// Number of slots, fixed for the lifetime of the table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn probe_step(&self) -> usize {
        self.probe_step
    }

    /// Number of slots currently holding a tombstone.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ratio of live records to slots.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns an iterator over all (key, value) pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        })
    }
}

impl<K: Eq + KeyHash, V> LinearProbingTable<K, V> {
    fn probe_sequence(&self, key: &K) -> ProbeSequence {
        let capacity = self.capacity();
        ProbeSequence {
            index: (key.key_hash() % capacity as u64) as usize,
            step: self.probe_step % capacity,
            capacity,
            remaining: capacity,
        }
    }

    /// Index of the slot holding `key`, following the probe sequence until an `Empty` slot.
    fn locate(&self, key: &K) -> Option<usize> {
        for idx in self.probe_sequence(key) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(k, _) if k == key => return Some(idx),
                _ => {}
            }
        }
        None
    }

    fn full(&self) -> Error {
        warn!(
            "linear probing table rejected insert: {} records, {} tombstones, capacity {}",
            self.len,
            self.tombstones,
            self.capacity()
        );
        Error::Full {
            capacity: self.capacity(),
        }
    }
}

impl<K: Eq + KeyHash, V> Dictionary<K, V> for LinearProbingTable<K, V> {
    fn clear(&mut self) {
        debug!(
            "clearing linear probing table ({} records, {} tombstones)",
            self.len, self.tombstones
        );
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.tombstones = 0;
    }

    fn find(&self, key: &K) -> Result<&V> {
        match self.locate(key).map(|idx| &self.slots[idx]) {
            Some(Slot::Occupied(_, v)) => Ok(v),
            _ => Err(Error::NotFound),
        }
    }

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.len >= self.capacity() {
            return Err(self.full());
        }

        let mut first_tombstone = None;
        for idx in self.probe_sequence(&key) {
            match &mut self.slots[idx] {
                Slot::Empty => {
                    let target = match first_tombstone {
                        Some(tomb) => {
                            self.tombstones -= 1;
                            tomb
                        }
                        None => idx,
                    };
                    self.slots[target] = Slot::Occupied(key, value);
                    self.len += 1;
                    return Ok(());
                }
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(idx);
                    }
                }
                Slot::Occupied(k, v) => {
                    if *k == key {
                        *v = value;
                        return Ok(());
                    }
                }
            }
        }
        Err(self.full())
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.locate(key).ok_or(Error::NotFound)?;
        match std::mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(_, v) => {
                self.len -= 1;
                self.tombstones += 1;
                Ok(v)
            }
            _ => unreachable!("locate only returns occupied slots"),
        }
    }

    fn size(&self) -> usize {
        self.len
    }
}

/// One line per slot: `"{i} empty"`, `"{i} tombstone"` or `"{i} key={k}, value={v}"`.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for LinearProbingTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{} empty", i)?,
                Slot::Tombstone => writeln!(f, "{} tombstone", i)?,
                Slot::Occupied(k, v) => writeln!(f, "{} key={}, value={}", i, k, v)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> [(i32, &'static str); 10] {
        [
            (1, "One"),
            (2, "Two"),
            (3, "Three"),
            (4, "Four"),
            (5, "Five"),
            (6, "Six"),
            (7, "Seven"),
            (8, "Eight"),
            (9, "Nine"),
            (10, "Ten"),
        ]
    }

    #[test]
    fn fill_find_remove_update_overflow() {
        let mut table = LinearProbingTable::new(10);
        for (k, v) in numbered() {
            table.insert(k, v.to_string()).unwrap();
        }
        assert_eq!(table.size(), 10);
        assert_eq!(table.find(&2).unwrap(), "Two");

        assert_eq!(table.remove(&2).unwrap(), "Two");
        assert!(table.find(&2).unwrap_err().is_not_found());
        assert_eq!(table.size(), 9);

        table.insert(1, "Uno".to_string()).unwrap();
        assert_eq!(table.find(&1).unwrap(), "Uno");
        assert_eq!(table.size(), 9);

        // no Empty slot is left on the probe path, only the tombstone at 2
        let err = table.insert(11, "Eleven".to_string()).unwrap_err();
        assert!(err.is_full());
        assert!(table.find(&11).unwrap_err().is_not_found());
        assert_eq!(table.size(), 9);
        assert_eq!(table.tombstones(), 1);
    }

    #[test]
    fn interleaved_walkthrough() {
        let mut table = LinearProbingTable::new(10);
        table.insert(1, "One".to_string()).unwrap();
        table.insert(2, "Two".to_string()).unwrap();
        table.insert(3, "Three".to_string()).unwrap();
        assert_eq!(table.find(&2).unwrap(), "Two");
        table.remove(&2).unwrap();
        assert!(table.find(&2).unwrap_err().is_not_found());
        table.insert(1, "Uno".to_string()).unwrap();
        assert_eq!(table.find(&1).unwrap(), "Uno");

        for (k, v) in numbered().into_iter().skip(3) {
            table.insert(k, v.to_string()).unwrap();
        }
        assert!(table.insert(11, "Eleven".to_string()).unwrap_err().is_full());
        assert_eq!(table.size(), 9);
    }

    #[test]
    fn full_table_rejects_without_probing() {
        let mut table = LinearProbingTable::new(4);
        for k in 0..4 {
            table.insert(k, k * 10).unwrap();
        }
        assert!(table.insert(99, 0).unwrap_err().is_full());
        // even an update of a present key is refused once count == capacity
        assert!(table.insert(2, 0).unwrap_err().is_full());
        assert_eq!(table.find(&2).unwrap(), &20);
        assert_eq!(table.size(), 4);
    }

    #[test]
    fn full_even_with_tombstones() {
        let mut table = LinearProbingTable::new(4);
        for k in 0..4 {
            table.insert(k, k).unwrap();
        }
        table.remove(&1).unwrap();
        assert_eq!(table.tombstones(), 1);
        // every slot is occupied or a tombstone, so the probe never reaches Empty
        assert!(table.insert(7, 7).unwrap_err().is_full());
        assert_eq!(table.size(), 3);
        assert_eq!(table.tombstones(), 1);
        // updates of live keys still go through
        table.insert(3, 30).unwrap();
        assert_eq!(table.find(&3).unwrap(), &30);
    }

    #[test]
    fn tombstone_keeps_probe_chain_intact() {
        let mut table = LinearProbingTable::new(10);
        // all three share home slot 1
        table.insert(1, "a").unwrap();
        table.insert(11, "b").unwrap();
        table.insert(21, "c").unwrap();

        table.remove(&11).unwrap();
        assert_eq!(table.find(&21).unwrap(), &"c");
        assert_eq!(table.find(&1).unwrap(), &"a");
        assert!(table.remove(&11).unwrap_err().is_not_found());
    }

    #[test]
    fn insert_reuses_first_tombstone() {
        let mut table = LinearProbingTable::new(10);
        table.insert(1, "a").unwrap();
        table.insert(11, "b").unwrap();
        table.insert(21, "c").unwrap();
        table.remove(&11).unwrap();
        assert_eq!(table.tombstones(), 1);

        table.insert(31, "d").unwrap();
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.find(&31).unwrap(), &"d");
        assert_eq!(table.find(&21).unwrap(), &"c");
        let dump = table.to_string();
        assert!(dump.contains("2 key=31, value=d"));
        assert!(dump.contains("4 empty"));
    }

    #[test]
    fn update_past_tombstone_does_not_duplicate() {
        let mut table = LinearProbingTable::new(10);
        table.insert(1, 1).unwrap();
        table.insert(11, 11).unwrap();
        table.insert(21, 21).unwrap();
        table.remove(&1).unwrap();

        table.insert(21, 210).unwrap();
        assert_eq!(table.size(), 2);
        assert_eq!(table.tombstones(), 1);
        assert_eq!(table.iter().filter(|(k, _)| **k == 21).count(), 1);
        assert_eq!(table.find(&21).unwrap(), &210);
    }

    #[test]
    fn missing_key_in_full_table_exhausts_probe() {
        let mut table = LinearProbingTable::new(3);
        for k in 0..3 {
            table.insert(k, ()).unwrap();
        }
        assert!(table.find(&3).unwrap_err().is_not_found());
        assert!(table.remove(&3).unwrap_err().is_not_found());
    }

    #[test]
    fn probe_step_spreads_collisions() {
        let mut table = LinearProbingTable::with_probe_step(10, 3);
        table.insert(0, 'a').unwrap();
        table.insert(10, 'b').unwrap();
        table.insert(20, 'c').unwrap();
        let dump = table.to_string();
        assert!(dump.contains("0 key=0, value=a"));
        assert!(dump.contains("3 key=10, value=b"));
        assert!(dump.contains("6 key=20, value=c"));
        assert!(dump.contains("1 empty"));
    }

    #[test]
    fn non_coprime_step_reports_full_early() {
        let mut table = LinearProbingTable::with_probe_step(4, 2);
        table.insert(0, 0).unwrap();
        table.insert(4, 4).unwrap();
        // probe visits 0, 2, 0, 2
        assert!(table.insert(8, 8).unwrap_err().is_full());
        assert_eq!(table.size(), 2);
        // keys with an odd home slot still fit
        table.insert(1, 1).unwrap();
        assert_eq!(table.size(), 3);
    }

    #[test]
    fn negative_and_text_keys() {
        let mut table = LinearProbingTable::new(7);
        table.insert(-3, "neg").unwrap();
        table.insert(i32::MIN, "min").unwrap();
        assert_eq!(table.find(&-3).unwrap(), &"neg");
        assert_eq!(table.find(&i32::MIN).unwrap(), &"min");

        let mut words = LinearProbingTable::new(16);
        for w in ["alpha", "beta", "gamma", "delta"] {
            words.insert(w.to_string(), w.len()).unwrap();
        }
        assert_eq!(words.find(&"gamma".to_string()).unwrap(), &5);
    }

    #[test]
    fn clear_resets_slots_and_tombstones() {
        let mut table = LinearProbingTable::new(5);
        for k in 0..5 {
            table.insert(k, k).unwrap();
        }
        table.remove(&0).unwrap();
        table.clear();
        assert_eq!(table.size(), 0);
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.capacity(), 5);
        assert!(table.to_string().lines().all(|l| l.ends_with("empty")));
        for k in 10..15 {
            table.insert(k, k).unwrap();
        }
        assert_eq!(table.size(), 5);
    }

    #[test]
    fn load_factor_and_iter() {
        let mut table = LinearProbingTable::new(8);
        assert!(table.is_empty());
        table.insert(1, "x").unwrap();
        table.insert(2, "y").unwrap();
        assert_eq!(table.load_factor(), 0.25);
        let mut items: Vec<_> = table.iter().map(|(k, v)| (*k, *v)).collect();
        items.sort();
        assert_eq!(items, vec![(1, "x"), (2, "y")]);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn zero_capacity_panics() {
        let _ = LinearProbingTable::<i32, i32>::new(0);
    }

    #[test]
    #[should_panic(expected = "probe step must be > 0")]
    fn zero_probe_step_panics() {
        let _ = LinearProbingTable::<i32, i32>::with_probe_step(4, 0);
    }
}
