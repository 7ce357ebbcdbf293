//! Core logic for the NoteGrid note-taking app.
//! This crate owns the note list and its durability; UI layers only call in.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use config::{ConfigError, DuplicateIdPolicy, StoreConfig, WriteFailurePolicy};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteUpdate};
pub use storage::memory_kv::MemoryKeyValueStore;
pub use storage::sqlite_kv::SqliteKeyValueStore;
pub use storage::{KeyValueStore, StorageError, StorageResult};
pub use store::{NoteStore, NoteStoreError, PersistenceError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
