//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted `Note` shape (five string fields).
//! - Provide merge semantics for `NoteUpdate`.
//!
//! # Invariants
//! - `id` never changes after creation.
//! - Merged `title` and `content` are always whitespace-trimmed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to notes created from the grid's add button.
pub const STARTER_TITLE: &str = "New Note";
/// Placeholder body for freshly created notes.
pub const STARTER_CONTENT: &str = "Write your heart out...";
/// Card color used when the caller does not pick one.
pub const DEFAULT_COLOR: &str = "#000000";

/// One user-authored note.
///
/// Field names are part of the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Opaque unique identifier assigned at creation.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Display-formatted date, refreshed by the editor on each save.
    pub date: String,
    pub color: String,
}

impl Note {
    /// Creates a note with a generated UUID v4 identifier.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        date: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, content, date, color)
    }

    /// Creates a note with a caller-provided identifier.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        date: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            date: date.into(),
            color: color.into(),
        }
    }

    /// Builds the placeholder note the grid inserts on "add".
    pub fn starter(date: impl Into<String>) -> Self {
        Self::new(STARTER_TITLE, STARTER_CONTENT, date, DEFAULT_COLOR)
    }

    /// Applies `update` over this note.
    ///
    /// Present fields overwrite; `title` and `content` are trimmed. The `id`
    /// is never touched.
    pub fn merge(&mut self, update: &NoteUpdate) {
        if let Some(title) = &update.title {
            self.title = title.trim().to_string();
        }
        if let Some(content) = &update.content {
            self.content = content.trim().to_string();
        }
        if let Some(date) = &update.date {
            self.date = date.clone();
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
    }
}

/// Edit record matched against stored notes by `id`.
///
/// `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NoteUpdate {
    /// Starts an empty update for `id`.
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl From<Note> for NoteUpdate {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: Some(note.title),
            content: Some(note.content),
            date: Some(note.date),
            color: Some(note.color),
        }
    }
}

impl From<&Note> for NoteUpdate {
    fn from(note: &Note) -> Self {
        Self::from(note.clone())
    }
}
