pub mod cs;
pub mod error;
pub mod logger;
pub mod quota;

pub use cs::hashing::{
    ArrayDictionary, ChainedTable, Dictionary, KeyHash, LinearProbingTable, PolyHasher,
};
pub use error::{Error, Result};
