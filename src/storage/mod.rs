//! Storage module for persisting discovered links
//!
//! This module handles all database operations for the crawler:
//! - SQLite database initialization and schema reset
//! - Insert-if-absent accumulation of discovered links
//! - Read access for statistics and inspection

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteLinkStore;
pub use traits::{LinkStore, StorageError, StorageResult};

use std::path::Path;

/// Opens a link store and discards whatever a previous run left in it
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_fresh_store(path: &Path) -> StorageResult<SqliteLinkStore> {
    let mut store = SqliteLinkStore::open(path)?;
    store.reset()?;
    Ok(store)
}

/// Represents a stored link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: i64,
    pub url: String,
}
