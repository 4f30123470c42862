use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema;

/// Owns the SQLite connection holding settings and working hours.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path`; `":memory:"` gives a
    /// private in-memory database.
    ///
    /// # Examples
    /// ```
    /// use lane_calendar::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// db.initialize_schema().unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open lane calendar database at {}", path))?;
        log::debug!("Opened database at {}", path);

        Ok(Self { conn })
    }

    /// In-memory database with the schema already applied.
    pub fn in_memory() -> Result<Self> {
        let db = Self::new(":memory:")?;
        db.initialize_schema()?;
        Ok(db)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates the settings and working-hours tables and applies pending
    /// column migrations. Safe to call on every start.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(&self.conn)
    }
}
