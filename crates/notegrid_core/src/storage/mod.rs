//! Backing key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Define the minimal get/set contract the note store persists through.
//! - Keep SQLite details out of the store.
//!
//! # Invariants
//! - `set_item` replaces the whole value for a key in one step.
//! - `get_item` returns `None` for keys that were never written.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_kv;
pub mod sqlite_kv;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a backing store implementation.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Store cannot serve the request (offline, quota, injected failure).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
