use std::fmt;

use crate::cs::hashing::hash_fn::{KeyHash, PolyHasher};

/// A (simplified) street address, the key of the quota dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetAddress {
    pub number: i32,
    pub street: String,
    pub city: String,
    pub zip: i32,
}

impl StreetAddress {
    pub fn new(number: i32, street: impl Into<String>, city: impl Into<String>, zip: i32) -> Self {
        Self {
            number,
            street: street.into(),
            city: city.into(),
            zip,
        }
    }
}

impl KeyHash for StreetAddress {
    fn key_hash(&self) -> u64 {
        let mut hasher = PolyHasher::new();
        hasher.write_key(&self.number);
        hasher.write_key(self.street.as_str());
        hasher.write_key(self.city.as_str());
        hasher.write_key(&self.zip);
        hasher.finish()
    }
}

impl fmt::Display for StreetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {} {}", self.number, self.street, self.city, self.zip)
    }
}
