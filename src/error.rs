//! Error type shared by the skip list and the multiset built on top of it.

use thiserror::Error;

/// Errors reported by fallible skip list and multiset operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A positional lookup asked for an element past the end of the list.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The promotion probability must lie strictly between 0 and 1.
    #[error("promotion probability must be in (0, 1), got {0}")]
    InvalidProbability(f64),

    /// A level cap of zero would leave no room for the bottom level.
    #[error("maximum level must be at least 1")]
    InvalidMaxLevel,
}

pub type Result<T> = std::result::Result<T, Error>;
