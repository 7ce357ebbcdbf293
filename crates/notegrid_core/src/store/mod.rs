//! Note store: the canonical in-memory note list and its persistence.
//!
//! # Responsibility
//! - Own the ordered note list that UI collaborators render.
//! - Persist the whole list under one key after every mutation.
//!
//! # Invariants
//! - After a successful mutation, memory and storage hold the same list.
//! - New notes are prepended; edits never reorder.

mod error;
mod note_store;

pub use error::{NoteStoreError, PersistenceError, StoreResult};
pub use note_store::NoteStore;
