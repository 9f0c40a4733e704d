use std::collections::TryReserveError;

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum PointIndexError {
    /// Failure to open or read a dataset file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset that does not follow the `n k` header plus `n × k`
    /// integer-token format, or whose header values are out of range.
    #[error("Format error: {0}")]
    Format(String),

    /// A result or scratch buffer could not grow.
    #[error("Allocation error: {0}")]
    Allocation(#[from] TryReserveError),

    /// An operation issued in the wrong session state, such as a second
    /// `LOAD` or a query before any dataset is loaded.
    #[error("State error: {0}")]
    State(String),

    /// A bounded range query collected more results than its configured
    /// capacity allows.
    #[error("Capacity error: result count exceeds limit of {limit}")]
    Capacity {
        /// The configured maximum result count.
        limit: usize,
    },

    /// A point or bounds argument whose arity does not match the tree
    /// dimension.
    #[error("Invalid dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// The tree dimension.
        expected: usize,
        /// The arity actually supplied.
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, PointIndexError>;
