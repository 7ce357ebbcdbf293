//! Error types surfaced by the note store.

use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, NoteStoreError>;

/// A read or write against the backing store failed.
#[derive(Debug)]
pub enum PersistenceError {
    Read(StorageError),
    Write(StorageError),
    /// The note list could not be encoded.
    Serialize(serde_json::Error),
    /// The stored value is not a valid note collection.
    Parse(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read notes: {err}"),
            Self::Write(err) => write!(f, "failed to save notes: {err}"),
            Self::Serialize(err) => write!(f, "failed to encode notes: {err}"),
            Self::Parse(err) => write!(f, "stored notes are malformed: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Serialize(err) | Self::Parse(err) => Some(err),
        }
    }
}

/// Error returned by mutating store operations.
#[derive(Debug)]
pub enum NoteStoreError {
    Persistence(PersistenceError),
    /// `add` refused an id that is already stored (`DuplicateIdPolicy::Reject`).
    DuplicateId(String),
}

impl NoteStoreError {
    /// Stable short code for FFI envelopes and log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Persistence(PersistenceError::Read(_)) => "notes_read_failed",
            Self::Persistence(PersistenceError::Write(_)) => "notes_write_failed",
            Self::Persistence(PersistenceError::Serialize(_)) => "notes_encode_failed",
            Self::Persistence(PersistenceError::Parse(_)) => "notes_parse_failed",
            Self::DuplicateId(_) => "duplicate_id",
        }
    }
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "note id already exists: {id}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<PersistenceError> for NoteStoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}
