//! Flutter-facing bindings for the NoteGrid core.

pub mod api;
