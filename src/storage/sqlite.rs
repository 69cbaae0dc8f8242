//! SQLite storage handle

use std::path::Path;

use rusqlite::Connection;

use super::schema;
use crate::{Error, Result};

/// Handle to a single-file SQLite database of bookmark folders.
///
/// One handle owns one connection, single consumer, no pooling. Opening the
/// handle guarantees the schema exists before any folder operation runs.
/// Dropping the handle closes the connection; `close` does the same but
/// surfaces the error SQLite reports.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database file (creates it if it doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize_schema()?;
        tracing::debug!("opened bookmark database at {}", path.display());
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema. Idempotent: reopening an existing
    /// file never drops data.
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Borrow the live connection for folder operations
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, reporting any error SQLite raises on close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))
    }
}
