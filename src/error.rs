//! Error definitions.
use thiserror::Error;

/// Crate-wide error type.
///
/// `NotFound` and `Full` are the two dictionary outcomes callers are expected to branch on;
/// the rest come from the order simulator and its driver.
#[derive(Error, Debug)]
pub enum Error {
    /// No record matches the requested key.
    #[error("key not found")]
    NotFound,

    /// The container cannot accept another record.
    #[error("dictionary is full (capacity {capacity})")]
    Full { capacity: usize },

    /// A line of an order file could not be parsed.
    #[error("invalid order on line {line}: {reason}")]
    ParseOrder { line: usize, reason: String },

    /// The timer was used out of order.
    #[error("timer misuse: {0}")]
    Timer(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }

    /// Returns true for [`Error::Full`].
    pub fn is_full(&self) -> bool {
        matches!(self, Error::Full { .. })
    }
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
