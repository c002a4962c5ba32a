//! Core error types for fitquest-core.
//!
//! Per-concern errors (catalog, persistence) fold into a single
//! `CoreError` umbrella used across the library.

use thiserror::Error;

/// Core error type for fitquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The persistence collaborator failed a load or save call
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Catalog validation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An achievement id that does not exist in the catalog
    #[error("Unknown achievement id: {0}")]
    UnknownAchievement(String),
}

/// Errors raised by a key-value persistence backend.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read/write the backing store
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to resolve the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Errors raised while building an achievement catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two definitions share the same id
    #[error("Duplicate achievement id: {0}")]
    DuplicateId(String),

    /// A definition failed basic validation
    #[error("Invalid achievement '{id}': {message}")]
    InvalidDefinition { id: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
