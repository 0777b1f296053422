//! Fixed-capacity hash dictionaries.
//!
//! This module provides two hash tables that differ only in how they resolve collisions, plus a
//! linear-scan baseline, all behind the [`Dictionary`] trait:
//! - [`LinearProbingTable`]: closed addressing, linear probing with tombstones
//! - [`ChainedTable`]: separate chaining, one collision chain per bucket
//! - [`ArrayDictionary`]: unordered array, O(n) per operation
//!
//! None of them ever resizes. Capacity is chosen at construction.
//!
//! # Examples
//!
//! ```rust
//! use addrquota::{ChainedTable, Dictionary, LinearProbingTable};
//!
//! let mut closed = LinearProbingTable::new(8);
//! closed.insert(3, "three").unwrap();
//! assert_eq!(closed.find(&3).unwrap(), &"three");
//!
//! let mut chained = ChainedTable::new(2);
//! chained.insert("k".to_string(), 1).unwrap();
//! assert!(chained.remove(&"k".to_string()).is_ok());
//! assert!(chained.find(&"k".to_string()).unwrap_err().is_not_found());
//! ```

pub mod array_dict;
pub mod dictionary;
pub mod hash_fn;
pub mod linear_probing;
pub mod separate;

pub use array_dict::ArrayDictionary;
pub use dictionary::Dictionary;
pub use hash_fn::{hash_int, hash_str, KeyHash, PolyHashBuilder, PolyHasher};
pub use linear_probing::{LinearProbingBuilder, LinearProbingTable};
pub use separate::{ChainedTable, ChainedTableBuilder};
