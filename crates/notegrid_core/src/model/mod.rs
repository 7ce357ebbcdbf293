//! Domain model for the note grid.
//!
//! # Responsibility
//! - Define the note record shared by the store, FFI and CLI layers.
//! - Define the partial update record merged over stored notes.
//!
//! # Invariants
//! - Every note is identified by an opaque, immutable `id` string.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
