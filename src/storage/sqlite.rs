//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the LinkStore trait.

use crate::storage::schema::{initialize_schema, reset_schema};
use crate::storage::traits::{LinkStore, StorageResult};
use crate::storage::LinkRecord;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite link store backend
pub struct SqliteLinkStore {
    conn: Connection,
}

impl SqliteLinkStore {
    /// Opens (or creates) a link store at the given path
    ///
    /// The database runs in WAL mode so the file can be inspected by other
    /// readers while a traversal is writing to it. Existing records are kept
    /// until [`LinkStore::reset`] is called.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory link store
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl LinkStore for SqliteLinkStore {
    fn reset(&mut self) -> StorageResult<()> {
        reset_schema(&self.conn)?;
        tracing::debug!("Link store reset");
        Ok(())
    }

    fn upsert_all(&mut self, urls: &[String]) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;

        {
            let mut stmt = tx.prepare_cached("INSERT OR IGNORE INTO Urls (url) VALUES (?1)")?;
            for url in urls {
                inserted += stmt.execute(params![url])?;
            }
        }

        tx.commit()?;
        Ok(inserted)
    }

    fn contains(&self, url: &str) -> StorageResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Urls WHERE url = ?1)",
            params![url],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn get_record(&self, url: &str) -> StorageResult<Option<LinkRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, url FROM Urls WHERE url = ?1",
                params![url],
                |row| {
                    Ok(LinkRecord {
                        id: row.get(0)?,
                        url: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(record)
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Urls", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn urls(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM Urls ORDER BY url")?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(urls)
    }
}
