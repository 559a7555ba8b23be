//! SQLite-based rundown persistence.
//!
//! Provides persistent storage for:
//! - The ordered rundown (entries as JSON, ordered by position)
//! - Key-value store for application state (sheet snapshots, markers)
//!
//! The timing triple only ever reaches disk through [`Database::save_rundown`]
//! after a `Rundown` mutation, so partially-updated events cannot be
//! persisted.

use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::DatabaseError;
use crate::rundown::{Rundown, RundownEntry};

use super::data_dir;

/// SQLite database for rundown storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/ontime/ontime.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("ontime.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS rundown (
                position    INTEGER NOT NULL,
                id          TEXT PRIMARY KEY,
                kind        TEXT NOT NULL,
                data        TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_rundown_position ON rundown(position);",
        )?;
        Ok(())
    }

    /// Replace the stored rundown with the given one, atomically.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub fn save_rundown(&mut self, rundown: &Rundown) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM rundown", [])?;
        for (position, entry) in rundown.entries().iter().enumerate() {
            let data = serde_json::to_string(entry)
                .map_err(|e| DatabaseError::QueryFailed(format!("encode entry: {e}")))?;
            tx.execute(
                "INSERT INTO rundown (position, id, kind, data, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![position as i64, entry.id(), entry.kind(), data, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Load the stored rundown in position order.
    ///
    /// # Errors
    /// Returns an error if a row cannot be read or decoded.
    pub fn load_rundown(&self) -> Result<Rundown, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, data FROM rundown ORDER BY position")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut rundown = Rundown::new();
        for row in rows {
            let (id, data) = row?;
            let entry: RundownEntry = serde_json::from_str(&data)
                .map_err(|e| DatabaseError::QueryFailed(format!("decode entry {id}: {e}")))?;
            rundown.push(entry);
        }
        Ok(rundown)
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rundown::{OntimeBlock, OntimeDelay, OntimeEvent};

    fn sample_rundown() -> Rundown {
        let mut rundown = Rundown::new();
        rundown.push(RundownEntry::Event(OntimeEvent::new("Doors", 0, 600_000)));
        rundown.push(RundownEntry::Delay(OntimeDelay::new(30_000)));
        rundown.push(RundownEntry::Block(OntimeBlock::new("Act 1")));
        rundown.push(RundownEntry::Event(OntimeEvent::new(
            "Opening", 600_000, 1_200_000,
        )));
        rundown
    }

    #[test]
    fn rundown_roundtrip_preserves_order_and_fields() {
        let mut db = Database::open_memory().unwrap();
        let rundown = sample_rundown();
        db.save_rundown(&rundown).unwrap();

        let loaded = db.load_rundown().unwrap();
        assert_eq!(loaded, rundown);
        assert_eq!(loaded.entries()[2].kind(), "block");
    }

    #[test]
    fn save_replaces_previous_rundown() {
        let mut db = Database::open_memory().unwrap();
        db.save_rundown(&sample_rundown()).unwrap();

        let mut smaller = Rundown::new();
        smaller.push(RundownEntry::Event(OntimeEvent::new("Only", 0, 1_000)));
        db.save_rundown(&smaller).unwrap();

        let loaded = db.load_rundown().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0].as_event().unwrap().title, "Only");
    }

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);
        db.kv_set("marker", "1").unwrap();
        db.kv_set("marker", "2").unwrap();
        assert_eq!(db.kv_get("marker").unwrap().as_deref(), Some("2"));
        db.kv_delete("marker").unwrap();
        assert_eq!(db.kv_get("marker").unwrap(), None);
    }
}
