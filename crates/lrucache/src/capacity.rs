//! Validated cache capacity

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::{Error, Result};

/// Maximum number of entries a cache may hold (always at least 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    /// Validate a requested capacity
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` when `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(Self)
            .ok_or(Error::InvalidCapacity(0))
    }

    /// Capacity as a plain integer
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for Capacity {
    type Error = Error;

    fn try_from(capacity: usize) -> Result<Self> {
        Self::new(capacity)
    }
}

impl TryFrom<i64> for Capacity {
    type Error = Error;

    fn try_from(requested: i64) -> Result<Self> {
        match usize::try_from(requested) {
            Ok(capacity) if capacity > 0 => Self::new(capacity),
            _ => Err(Error::InvalidCapacity(requested)),
        }
    }
}

impl From<NonZeroUsize> for Capacity {
    fn from(capacity: NonZeroUsize) -> Self {
        Self(capacity)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_zero_rejected() {
        assert_eq!(Capacity::new(0), Err(Error::InvalidCapacity(0)));
    }

    #[test]
    fn test_capacity_negative_rejected() {
        assert_eq!(Capacity::try_from(-1i64), Err(Error::InvalidCapacity(-1)));
        assert_eq!(
            Capacity::try_from(i64::MIN),
            Err(Error::InvalidCapacity(i64::MIN))
        );
    }

    #[test]
    fn test_capacity_positive() {
        assert_eq!(Capacity::new(1).map(Capacity::get), Ok(1));
        assert_eq!(Capacity::try_from(42i64).map(Capacity::get), Ok(42));
        assert_eq!(Capacity::try_from(7usize).map(Capacity::get), Ok(7));
    }

    #[test]
    fn test_capacity_display() {
        let capacity = Capacity::from(NonZeroUsize::MIN);
        assert_eq!(capacity.to_string(), "1");
    }
}
