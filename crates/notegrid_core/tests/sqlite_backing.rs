use notegrid_core::db::migrations::latest_version;
use notegrid_core::db::{open_db, open_db_in_memory, DbError};
use notegrid_core::{KeyValueStore, Note, NoteStore, NoteUpdate, SqliteKeyValueStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_items");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notegrid.db");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_table_exists(&second, "kv_items");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn notes_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    {
        let mut store = NoteStore::new(SqliteKeyValueStore::open(&path).unwrap());
        store.load();
        store
            .add(Note::with_id("1", "T", "C", "1/1/24", "#000"))
            .unwrap();
        store
            .add(Note::with_id("2", "U", "D", "1/2/24", "#111"))
            .unwrap();
        store
            .update(NoteUpdate::for_id("1").title("  Renamed "))
            .unwrap();
    }

    let mut reopened = NoteStore::new(SqliteKeyValueStore::open(&path).unwrap());
    assert!(reopened.is_loading());
    let loaded = reopened.load().to_vec();

    assert_eq!(
        loaded,
        vec![
            Note::with_id("2", "U", "D", "1/2/24", "#111"),
            Note::with_id("1", "Renamed", "C", "1/1/24", "#000"),
        ]
    );
    assert!(!reopened.is_loading());
}

#[test]
fn collection_is_stored_as_json_under_the_notes_key() {
    let mut store = NoteStore::new(SqliteKeyValueStore::open_in_memory().unwrap());
    store.load();
    store
        .add(Note::with_id("1", "T", "C", "1/1/24", "#000"))
        .unwrap();

    let raw = store.backing().get_item("notes").unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            {"id": "1", "title": "T", "content": "C", "date": "1/1/24", "color": "#000"}
        ])
    );
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table `{table_name}` should exist");
}
