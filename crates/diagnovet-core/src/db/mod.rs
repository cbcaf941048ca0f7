//! Session store for DiagnovetAI.
//!
//! A key-value table of JSON documents. An in-memory connection lives exactly
//! as long as the session; a file-backed one survives restarts for demos.

mod entities;
mod keys;
mod schema;

#[allow(unused_imports)]
pub use entities::*;
pub use keys::*;
pub use schema::*;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Malformed value under '{key}': {source}")]
    Malformed {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Session store connection wrapper.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Open a store at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self { conn };
        store.initialize()?;
        info!(path = %path.as_ref().display(), "opened session store");
        Ok(store)
    }

    /// Create an in-memory store scoped to this session.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        debug!("opened in-memory session store");
        Ok(store)
    }

    /// Initialize schema.
    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Read the raw JSON text stored under a key.
    pub fn get_raw(&self, key: StorageKey) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM session_entries WHERE key = ?",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Write raw JSON text under a key (last write wins).
    pub fn set_raw(&self, key: StorageKey, value: &str) -> StoreResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO session_entries (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key.as_str(), value],
        )?;
        Ok(())
    }

    /// Load and deserialize the value under a key.
    ///
    /// Returns `Ok(None)` when the key is absent and `StoreError::Malformed`
    /// when the stored text does not parse as `T`.
    pub fn load<T: DeserializeOwned>(&self, key: StorageKey) -> StoreResult<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Malformed { key, source }),
            None => Ok(None),
        }
    }

    /// Load a value, falling back to `T::default()` when it is absent or
    /// malformed. Failures are logged, never swallowed silently.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: StorageKey) -> T {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "falling back to default value");
                T::default()
            }
        }
    }

    /// Serialize and store a value under a key.
    pub fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json)
    }

    /// Check whether a key holds any value.
    pub fn contains(&self, key: StorageKey) -> StoreResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM session_entries WHERE key = ?",
            [key.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Remove a key.
    pub fn remove(&self, key: StorageKey) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM session_entries WHERE key = ?", [key.as_str()])?;
        Ok(rows_affected > 0)
    }

    /// Drop every entry (logout).
    pub fn clear(&self) -> StoreResult<usize> {
        let rows_affected = self.conn.execute("DELETE FROM session_entries", [])?;
        info!(entries = rows_affected, "cleared session store");
        Ok(rows_affected)
    }

    /// List the keys currently set, in key order.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM session_entries ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
