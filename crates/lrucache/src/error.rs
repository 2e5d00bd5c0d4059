//! Error types for lrucache

use std::fmt;

/// Result type alias for lrucache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
///
/// Lookups and removals never fail: a miss is `None` and a removal of an
/// absent key is `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested capacity was zero or negative
    InvalidCapacity(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(requested) => {
                write!(f, "Invalid capacity: {} (must be at least 1)", requested)
            }
        }
    }
}

impl std::error::Error for Error {}
