//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Own the single process-wide `NoteStore` the UI screens share.
//! - Expose load/add/update/delete with simple, panic-free envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The store is loaded exactly once, when it is first opened.
//! - All store calls are serialized through one mutex.

use log::{error, info};
use notegrid_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Note, NoteStore, NoteUpdate, SqliteKeyValueStore, StoreConfig,
};
use std::path::PathBuf;
use std::sync::Mutex;

const DEFAULT_DB_FILE_NAME: &str = "notegrid.sqlite3";
const DB_PATH_ENV: &str = "NOTEGRID_DB_PATH";

static NOTE_STORE: Mutex<Option<SharedStore>> = Mutex::new(None);

struct SharedStore {
    db_path: PathBuf,
    store: NoteStore<SqliteKeyValueStore>,
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message otherwise.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Note fields as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: String,
    pub color: String,
}

impl From<&Note> for NoteItem {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            date: note.date.clone(),
            color: note.color.clone(),
        }
    }
}

impl From<NoteItem> for Note {
    fn from(item: NoteItem) -> Self {
        Note::with_id(item.id, item.title, item.content, item.date, item.color)
    }
}

/// Snapshot of the store's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    /// Notes, most recently added first.
    pub items: Vec<NoteItem>,
    pub is_loading: bool,
    /// Empty on success; diagnostics otherwise.
    pub message: String,
}

/// Result envelope for mutating calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Note the action applied to, when known.
    pub note_id: Option<String>,
    /// Human-readable message for alerts and diagnostics.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: String) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: false,
            note_id,
            message: message.into(),
        }
    }
}

/// Opens and loads the shared store at `db_path`.
///
/// `config_json` may be empty for defaults. Returns an empty string on
/// success. Repeating the call with the same path and config is a no-op;
/// anything else after the store is open is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_init(db_path: String, config_json: String) -> String {
    let config = match StoreConfig::from_json_str(&config_json) {
        Ok(config) => config,
        Err(err) => return format!("notes_init failed: {err}"),
    };
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "notes_init failed: db_path cannot be empty".to_string();
    }
    let db_path = PathBuf::from(trimmed);

    let mut guard = match NOTE_STORE.lock() {
        Ok(guard) => guard,
        Err(_) => return "notes_init failed: store lock poisoned".to_string(),
    };

    if let Some(shared) = guard.as_ref() {
        if shared.db_path != db_path {
            return format!(
                "notes_init failed: store already open at `{}`",
                shared.db_path.display()
            );
        }
        if shared.store.config() != &config {
            return "notes_init failed: store already open with a different config".to_string();
        }
        return String::new();
    }

    match open_shared_store(db_path, config) {
        Ok(shared) => {
            *guard = Some(shared);
            String::new()
        }
        Err(err) => format!("notes_init failed: {err}"),
    }
}

/// Returns the current note list.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    match with_store(|store| {
        Ok((
            store.notes().iter().map(NoteItem::from).collect::<Vec<_>>(),
            store.is_loading(),
        ))
    }) {
        Ok((items, is_loading)) => NotesListResponse {
            items,
            is_loading,
            message: String::new(),
        },
        Err(err) => NotesListResponse {
            items: Vec::new(),
            is_loading: false,
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Whether the shared store is still loading. `false` once opened.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_is_loading() -> bool {
    with_store(|store| Ok(store.is_loading())).unwrap_or(false)
}

/// Looks up one note for the detail screen.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_get(id: String) -> Option<NoteItem> {
    with_store(|store| Ok(store.get(&id).map(NoteItem::from)))
        .ok()
        .flatten()
}

/// Creates and adds the placeholder note for the grid's add button.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_new() -> NoteActionResponse {
    let result = with_store(|store| {
        let note = store.new_note();
        let note_id = note.id.clone();
        store.add(note).map_err(|err| err.to_string())?;
        Ok(note_id)
    });
    match result {
        Ok(note_id) => NoteActionResponse::success("Note created.", note_id),
        Err(err) => NoteActionResponse::failure(format!("notes_new failed: {err}"), None),
    }
}

/// Adds a caller-built note to the front of the list.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_add(note: NoteItem) -> NoteActionResponse {
    let note_id = note.id.clone();
    match with_store(|store| store.add(note.into()).map_err(|err| err.to_string())) {
        Ok(()) => NoteActionResponse::success("Note added.", note_id),
        Err(err) => NoteActionResponse::failure(format!("notes_add failed: {err}"), Some(note_id)),
    }
}

/// Saves the editor's fields for `id`, stamping today's date.
///
/// `color: None` keeps the stored color.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_update(
    id: String,
    title: String,
    content: String,
    color: Option<String>,
) -> NoteActionResponse {
    let result = with_store(|store| {
        let mut update = NoteUpdate::for_id(id.as_str())
            .title(title)
            .content(content)
            .date(store.display_date_today());
        update.color = color;
        store.update(update).map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => NoteActionResponse::success("Note saved.", id),
        Err(err) => NoteActionResponse::failure(format!("notes_update failed: {err}"), Some(id)),
    }
}

/// Deletes every note with `id`. Deleting an unknown id still succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(id: String) -> NoteActionResponse {
    match with_store(|store| store.delete(&id).map_err(|err| err.to_string())) {
        Ok(0) => NoteActionResponse::success("Nothing to delete.", id),
        Ok(_) => NoteActionResponse::success("Note deleted.", id),
        Err(err) => NoteActionResponse::failure(format!("notes_delete failed: {err}"), Some(id)),
    }
}

fn open_shared_store(db_path: PathBuf, config: StoreConfig) -> Result<SharedStore, String> {
    let backing = SqliteKeyValueStore::open(&db_path).map_err(|err| {
        error!(
            "event=notes_open module=ffi status=error error={}",
            err
        );
        err.to_string()
    })?;
    let mut store = NoteStore::with_config(backing, config).map_err(|err| err.to_string())?;
    let count = store.load().len();
    info!("event=notes_open module=ffi status=ok count={count}");
    Ok(SharedStore { db_path, store })
}

fn with_store<T>(
    f: impl FnOnce(&mut NoteStore<SqliteKeyValueStore>) -> Result<T, String>,
) -> Result<T, String> {
    let mut guard = NOTE_STORE
        .lock()
        .map_err(|_| "store lock poisoned".to_string())?;
    if guard.is_none() {
        *guard = Some(open_shared_store(
            resolve_default_db_path(),
            StoreConfig::default(),
        )?);
    }
    match guard.as_mut() {
        Some(shared) => f(&mut shared.store),
        None => Err("store unavailable".to_string()),
    }
}

// Why: UI code may call `notes_*` before (or without) `notes_init`, e.g. in
// widget previews; open a default location instead of failing every call.
fn resolve_default_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
