//! Error types for fetching and reading result sets.

use thiserror::Error;

use crate::position::Position;

/// Failures reported by a result source while loading its result set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The underlying query failed
    #[error("Query failed: {0}")]
    Query(String),

    /// The source was asked to fetch before it was configured
    #[error("Result source '{source_name}' is not configured")]
    NotConfigured { source_name: String },

    /// The storage engine behind the source failed
    #[error("Result source error: {0}")]
    Source(String),
}

/// Errors surfaced by the results adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// Initial load failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Position does not address an item in the current result set
    #[error("Position {position} out of bounds ({group_count} groups)")]
    PositionOutOfBounds {
        position: Position,
        group_count: usize,
    },
}

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;
