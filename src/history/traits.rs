//! Storage traits and error types
//!
//! This module defines the trait interface for history storage backends and
//! associated error types.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Refusing to persist unsuccessful crawl of {0}")]
    UnsuccessfulResult(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable key/value slots backing the history cache
///
/// Each key holds one serialized value; `set` replaces the whole value.
pub trait HistoryStore {
    /// Reads a slot; an absent slot is `Ok(None)`, not an error
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the contents of a slot
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
