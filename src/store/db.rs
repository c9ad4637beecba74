//! SQLite database connection and schema management for habits and check-ins
//!
//! Manages the `~/.habitline/habits.db` database. The schema is created on open and
//! its version recorded in `schema_version` for future migrations.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config::Config;

/// Shared database handle
#[derive(Clone)]
pub struct StoreDb {
    conn: Arc<Mutex<Connection>>,
}

impl StoreDb {
    /// Open or create the database at the default location (~/.habitline/habits.db)
    pub fn open_default() -> Result<Self> {
        Self::open(&Config::global_config_dir().join("habits.db"))
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open habit db: {}", path.display()))?;

        // WAL so a second process (e.g. `watch`) can read while we write
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Lock the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Habit DB lock poisoned")
    }

    /// SQLite's `data_version`, which changes when another connection commits
    pub fn data_version(&self) -> Result<i64> {
        let conn = self.conn();
        Ok(conn.query_row("PRAGMA data_version", [], |r| r.get(0))?)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA_SQL)?;
        Ok(())
    }
}

/// SQL schema for the habit database
const SCHEMA_SQL: &str = r#"
-- One row per habit
CREATE TABLE IF NOT EXISTS habits (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    target_days TEXT NOT NULL,
    start_date TEXT NOT NULL,
    archived INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_habit_user ON habits(user_id, archived);

-- One row per habit and day; the day key is the YYYY-MM-DD date key
CREATE TABLE IF NOT EXISTS checkins (
    habit_id TEXT NOT NULL,
    day TEXT NOT NULL,
    completed INTEGER NOT NULL,
    ts INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (habit_id, day),
    FOREIGN KEY (habit_id) REFERENCES habits(id) ON DELETE CASCADE
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;
