//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Connections are opened through `db::open_db*`, so migrations are applied.
//! - Writes are single-statement upserts and therefore atomic per key.

use super::{KeyValueStore, StorageResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value store persisted in the `kv_items` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Opens the database file at `path`, creating and migrating it as needed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps a connection that was already opened via `db::open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Gives access to the underlying connection, mainly for diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_items (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKeyValueStore;
    use crate::db::open_db_in_memory;
    use crate::storage::KeyValueStore;

    #[test]
    fn missing_key_reads_as_none() {
        let store = SqliteKeyValueStore::open_in_memory().unwrap();
        assert_eq!(store.get_item("notes").unwrap(), None);
    }

    #[test]
    fn set_item_replaces_previous_value() {
        let mut store = SqliteKeyValueStore::open_in_memory().unwrap();
        store.set_item("notes", "[1]").unwrap();
        store.set_item("notes", "[2]").unwrap();

        assert_eq!(store.get_item("notes").unwrap().as_deref(), Some("[2]"));
        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_items;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn wraps_an_already_migrated_connection() {
        let mut store = SqliteKeyValueStore::from_connection(open_db_in_memory().unwrap());
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
