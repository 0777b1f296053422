//! The capability shared by every dictionary in this crate.

use crate::error::Result;

/// A map from keys to values with fixed-capacity semantics.
///
/// The trait is object safe, so consumers can hold a `&mut dyn Dictionary<K, V>` and stay
/// indifferent to the backing table.
pub trait Dictionary<K, V> {
    /// Removes every record, keeping capacity.
    fn clear(&mut self);

    /// Returns the value stored for `key`, or [`Error::NotFound`](crate::Error::NotFound).
    fn find(&self, key: &K) -> Result<&V>;

    /// Stores `value` under `key`.
    ///
    /// An existing record is overwritten and the size does not change. Otherwise a new record is
    /// added, or [`Error::Full`](crate::Error::Full) is returned if there is no room for it.
    fn insert(&mut self, key: K, value: V) -> Result<()>;

    /// Deletes the record for `key` and returns its value, or
    /// [`Error::NotFound`](crate::Error::NotFound).
    fn remove(&mut self, key: &K) -> Result<V>;

    /// Number of records currently stored.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn contains(&self, key: &K) -> bool {
        self.find(key).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::hashing::{ArrayDictionary, ChainedTable, LinearProbingTable};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    type Boxed = Box<dyn Dictionary<i64, String>>;

    fn implementations() -> Vec<(&'static str, Boxed)> {
        vec![
            ("array", Box::new(ArrayDictionary::<i64, String>::new(64)) as Boxed),
            ("closed", Box::new(LinearProbingTable::<i64, String>::new(256)) as Boxed),
            ("closed/step3", Box::new(LinearProbingTable::<i64, String>::with_probe_step(256, 3)) as Boxed),
            ("chained", Box::new(ChainedTable::<i64, String>::new(8)) as Boxed),
        ]
    }

    #[test]
    fn insert_then_find() {
        for (name, mut dict) in implementations() {
            for k in -10..10 {
                dict.insert(k, format!("v{}", k)).unwrap();
            }
            for k in -10..10 {
                assert_eq!(dict.find(&k).unwrap(), &format!("v{}", k), "{}", name);
            }
            assert_eq!(dict.size(), 20, "{}", name);
        }
    }

    #[test]
    fn update_keeps_size_and_new_key_grows_it() {
        for (name, mut dict) in implementations() {
            dict.insert(1, "a".to_string()).unwrap();
            dict.insert(2, "b".to_string()).unwrap();
            assert_eq!(dict.size(), 2, "{}", name);

            dict.insert(1, "c".to_string()).unwrap();
            assert_eq!(dict.size(), 2, "{}", name);
            assert_eq!(dict.find(&1).unwrap(), "c", "{}", name);

            dict.insert(3, "d".to_string()).unwrap();
            assert_eq!(dict.size(), 3, "{}", name);
        }
    }

    #[test]
    fn remove_then_find_fails() {
        for (name, mut dict) in implementations() {
            dict.insert(5, "five".to_string()).unwrap();
            dict.insert(6, "six".to_string()).unwrap();
            assert_eq!(dict.remove(&5).unwrap(), "five", "{}", name);
            assert!(dict.find(&5).unwrap_err().is_not_found(), "{}", name);
            assert!(dict.remove(&5).unwrap_err().is_not_found(), "{}", name);
            assert!(!dict.contains(&5), "{}", name);
            assert!(dict.contains(&6), "{}", name);
            assert_eq!(dict.size(), 1, "{}", name);
        }
    }

    #[test]
    fn missing_key_is_not_found_and_leaves_state() {
        for (name, mut dict) in implementations() {
            assert!(dict.find(&42).unwrap_err().is_not_found(), "{}", name);
            dict.insert(1, "x".to_string()).unwrap();
            assert!(dict.remove(&42).unwrap_err().is_not_found(), "{}", name);
            assert_eq!(dict.size(), 1, "{}", name);
            assert_eq!(dict.find(&1).unwrap(), "x", "{}", name);
        }
    }

    #[test]
    fn clear_forgets_everything() {
        for (name, mut dict) in implementations() {
            for k in 0..30 {
                dict.insert(k, k.to_string()).unwrap();
            }
            dict.remove(&3).unwrap();
            dict.clear();
            assert_eq!(dict.size(), 0, "{}", name);
            assert!(dict.is_empty(), "{}", name);
            for k in 0..30 {
                assert!(dict.find(&k).unwrap_err().is_not_found(), "{}", name);
            }
            dict.insert(3, "back".to_string()).unwrap();
            assert_eq!(dict.find(&3).unwrap(), "back", "{}", name);
        }
    }

    #[test]
    fn random_operations_match_std_hashmap() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for (name, mut dict) in implementations() {
            let mut model: HashMap<i64, String> = HashMap::new();
            for step in 0..2_000 {
                // closed tables are sized well above the key range so tombstones never fill them
                let key = rng.gen_range(-24..24);
                match rng.gen_range(0..3) {
                    0 => {
                        let value = format!("{}-{}", key, step);
                        dict.insert(key, value.clone()).unwrap();
                        model.insert(key, value);
                    }
                    1 => match model.remove(&key) {
                        Some(expected) => assert_eq!(dict.remove(&key).unwrap(), expected),
                        None => assert!(dict.remove(&key).unwrap_err().is_not_found()),
                    },
                    _ => match model.get(&key) {
                        Some(expected) => assert_eq!(dict.find(&key).unwrap(), expected),
                        None => assert!(dict.find(&key).unwrap_err().is_not_found()),
                    },
                }
                assert_eq!(dict.size(), model.len(), "{} at step {}", name, step);
            }
        }
    }
}
