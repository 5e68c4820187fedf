//! Error taxonomy for store operations.
//!
//! Construction-time failures (`Configuration`, `Connection`) are fatal to
//! the caller and abort startup; operation-time failures map whatever the
//! driver reports into `Query`/`Mapping`. No retry policy exists at this
//! layer.

use serde::{Deserialize, Serialize};

/// Common result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation errors
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Wrap a driver-level error as a query failure.
    pub fn query(err: impl std::fmt::Display) -> Self {
        StoreError::Query(err.to_string())
    }

    /// Wrap a serialization/deserialization error as a mapping failure.
    pub fn mapping(err: impl std::fmt::Display) -> Self {
        StoreError::Mapping(err.to_string())
    }
}
