//! Storage traits and error types
//!
//! This module defines the trait interface for link store backends and
//! associated error types.

use crate::storage::LinkRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A durable set of discovered links
///
/// URL uniqueness is owned by the store: inserting a URL that is already
/// present is a silent no-op, never an error. Records are never updated or
/// deleted except by [`LinkStore::reset`].
pub trait LinkStore {
    /// Drops every record and recreates an empty store
    fn reset(&mut self) -> StorageResult<()>;

    /// Inserts each URL that is not yet stored
    ///
    /// Idempotent: calling it twice with the same URLs leaves the store
    /// unchanged the second time.
    ///
    /// # Returns
    ///
    /// The number of URLs that were newly inserted
    fn upsert_all(&mut self, urls: &[String]) -> StorageResult<usize>;

    /// Returns true if the URL is stored
    fn contains(&self, url: &str) -> StorageResult<bool>;

    /// Gets the record for a URL
    fn get_record(&self, url: &str) -> StorageResult<Option<LinkRecord>>;

    /// Counts stored URLs
    fn count(&self) -> StorageResult<u64>;

    /// Lists all stored URLs in lexical order
    fn urls(&self) -> StorageResult<Vec<String>>;
}
