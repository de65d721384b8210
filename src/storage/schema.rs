//! Database schema definitions
//!
//! The link store is a single relation: every distinct article URL discovered
//! during a run, with an auto-assigned identity.

/// SQL schema for the link store
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Urls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE
);
"#;

/// Drops the link table, discarding every record of a previous run
pub const RESET_SQL: &str = "DROP TABLE IF EXISTS Urls;";

/// Initializes the database schema
///
/// Safe to call on an existing database; existing records are kept.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Drops and recreates the schema
pub fn reset_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(RESET_SQL)?;
    initialize_schema(conn)
}
