//! `NoteStore` implementation.
//!
//! # Responsibility
//! - Load the persisted collection once per session.
//! - Apply add/update/delete to a copy of the list, persist that copy as a
//!   whole, then publish it.
//!
//! # Invariants
//! - `is_loading` is true only before and during `load()`.
//! - Load failures never surface; the list falls back to empty.
//! - Mutation failures always surface; memory follows `WriteFailurePolicy`.

use super::error::{NoteStoreError, PersistenceError, StoreResult};
use crate::config::{ConfigError, DuplicateIdPolicy, StoreConfig, WriteFailurePolicy};
use crate::model::note::{Note, NoteUpdate};
use crate::storage::KeyValueStore;
use log::{debug, error, info, warn};
use std::time::Instant;

/// Canonical note list kept in sync with a key-value backing store.
pub struct NoteStore<S: KeyValueStore> {
    backing: S,
    config: StoreConfig,
    notes: Vec<Note>,
    is_loading: bool,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Creates an unloaded store with default configuration.
    pub fn new(backing: S) -> Self {
        Self {
            backing,
            config: StoreConfig::default(),
            notes: Vec::new(),
            is_loading: true,
        }
    }

    /// Creates an unloaded store after validating `config`.
    pub fn with_config(backing: S, config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(backing)
        })
    }

    /// Current note list, most recently added first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Whether the initial load has not finished yet.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Finds the first note with `id`.
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn backing(&self) -> &S {
        &self.backing
    }

    /// Releases the backing store, e.g. to reopen it in a fresh session.
    pub fn into_backing(self) -> S {
        self.backing
    }

    /// Today's date in the configured display format.
    pub fn display_date_today(&self) -> String {
        self.config.today()
    }

    /// Builds (but does not add) the placeholder note for the grid's add button.
    pub fn new_note(&self) -> Note {
        Note::starter(self.display_date_today())
    }

    /// Reads the persisted collection into memory.
    ///
    /// A missing record yields an empty list. Read and parse failures are
    /// logged and also yield an empty list; they are never returned.
    pub fn load(&mut self) -> &[Note] {
        let started_at = Instant::now();
        self.is_loading = true;

        match self.read_persisted() {
            Ok(notes) => {
                info!(
                    "event=notes_load module=store status=ok count={} duration_ms={}",
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                self.notes = notes;
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                self.notes = Vec::new();
            }
        }

        self.is_loading = false;
        &self.notes
    }

    /// Prepends `note` and persists the full list.
    ///
    /// # Errors
    /// - `NoteStoreError::DuplicateId` under `DuplicateIdPolicy::Reject`.
    /// - `NoteStoreError::Persistence` when the write fails.
    pub fn add(&mut self, note: Note) -> StoreResult<()> {
        let exists = self.notes.iter().any(|existing| existing.id == note.id);
        let replace = exists && self.config.duplicate_ids == DuplicateIdPolicy::Replace;
        if exists {
            match self.config.duplicate_ids {
                DuplicateIdPolicy::Reject => {
                    warn!("event=notes_add module=store status=rejected error_code=duplicate_id");
                    return Err(NoteStoreError::DuplicateId(note.id));
                }
                DuplicateIdPolicy::Replace => {
                    debug!("event=notes_add module=store status=replacing reason=duplicate_id");
                }
                DuplicateIdPolicy::Allow => {
                    debug!("event=notes_add module=store status=allowing reason=duplicate_id");
                }
            }
        }

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.extend(
            self.notes
                .iter()
                .filter(|existing| !(replace && existing.id == note.id))
                .cloned(),
        );
        next.insert(0, note);
        self.save("add", next)
    }

    /// Merges `update` over every note with a matching id and persists.
    ///
    /// An unknown id is not an error: the unchanged list is persisted again.
    pub fn update(&mut self, update: impl Into<NoteUpdate>) -> StoreResult<()> {
        let update = update.into();
        let mut matched = 0usize;
        let next = self
            .notes
            .iter()
            .map(|note| {
                let mut note = note.clone();
                if note.id == update.id {
                    note.merge(&update);
                    matched += 1;
                }
                note
            })
            .collect();

        debug!("event=notes_update module=store matched={matched}");
        self.save("update", next)
    }

    /// Removes every note with `id` and persists. Returns how many were removed.
    ///
    /// An unknown id is not an error: the unchanged list is persisted again.
    pub fn delete(&mut self, id: &str) -> StoreResult<usize> {
        let next: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect();
        let removed = self.notes.len() - next.len();

        debug!("event=notes_delete module=store removed={removed}");
        self.save("delete", next)?;
        Ok(removed)
    }

    fn read_persisted(&self) -> Result<Vec<Note>, PersistenceError> {
        let raw = self
            .backing
            .get_item(&self.config.storage_key)
            .map_err(PersistenceError::Read)?;

        match raw {
            Some(raw) if !raw.trim().is_empty() => {
                let parsed: Option<Vec<Note>> =
                    serde_json::from_str(&raw).map_err(PersistenceError::Parse)?;
                Ok(parsed.unwrap_or_default())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn write_persisted(&mut self, notes: &[Note]) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(notes).map_err(PersistenceError::Serialize)?;
        self.backing
            .set_item(&self.config.storage_key, &encoded)
            .map_err(PersistenceError::Write)
    }

    fn save(&mut self, op: &'static str, next: Vec<Note>) -> StoreResult<()> {
        let started_at = Instant::now();

        match self.write_persisted(&next) {
            Ok(()) => {
                self.notes = next;
                info!(
                    "event=notes_save module=store status=ok op={} count={} duration_ms={}",
                    op,
                    self.notes.len(),
                    started_at.elapsed().as_millis()
                );
                if self.config.verify_writes {
                    self.verify_persisted(op);
                }
                Ok(())
            }
            Err(err) => {
                let err = NoteStoreError::from(err);
                error!(
                    "event=notes_save module=store status=error op={} duration_ms={} error_code={} error={}",
                    op,
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                if self.config.on_write_failure == WriteFailurePolicy::KeepAttempted {
                    self.notes = next;
                }
                Err(err)
            }
        }
    }

    fn verify_persisted(&self, op: &'static str) {
        match self.read_persisted() {
            Ok(persisted) if persisted == self.notes => {
                debug!(
                    "event=notes_verify module=store status=ok op={} count={}",
                    op,
                    persisted.len()
                );
            }
            Ok(persisted) => {
                warn!(
                    "event=notes_verify module=store status=mismatch op={} memory_count={} stored_count={}",
                    op,
                    self.notes.len(),
                    persisted.len()
                );
            }
            Err(err) => {
                warn!(
                    "event=notes_verify module=store status=error op={} error={}",
                    op, err
                );
            }
        }
    }
}
