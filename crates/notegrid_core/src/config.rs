//! Store configuration.
//!
//! # Responsibility
//! - Describe the storage key, date display format and the two policies the
//!   store applies on duplicate ids and failed writes.
//! - Parse configuration handed over from the host app as JSON.
//!
//! # Invariants
//! - Every field has a default; `{}` is a valid configuration.
//! - A config that passed `validate()` never makes date formatting panic.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter, Write};

/// Key the serialized note collection lives under.
pub const DEFAULT_STORAGE_KEY: &str = "notes";
/// Short locale-style date, e.g. `1/31/2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// What `add` does when a note with the same id already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// Insert anyway; the list may hold several notes with one id.
    #[default]
    Allow,
    /// Fail with `NoteStoreError::DuplicateId` and write nothing.
    Reject,
    /// Drop the existing entries, then prepend the new note.
    Replace,
}

/// What the in-memory list looks like after a failed write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteFailurePolicy {
    /// Memory keeps the attempted list; it may disagree with storage until
    /// the next successful write or reload.
    #[default]
    KeepAttempted,
    /// Memory keeps the list from before the call.
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub storage_key: String,
    /// chrono strftime pattern used for `Note::date`.
    pub date_format: String,
    pub duplicate_ids: DuplicateIdPolicy,
    pub on_write_failure: WriteFailurePolicy,
    /// Read the value back after every write and log mismatches.
    pub verify_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            duplicate_ids: DuplicateIdPolicy::default(),
            on_write_failure: WriteFailurePolicy::default(),
            verify_writes: false,
        }
    }
}

impl StoreConfig {
    /// Parses and validates a JSON config. Blank input yields the defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(trimmed).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        // Why: some specifiers (e.g. `%#z`) parse fine but are parse-only, so
        // chrono only reports them when formatting. Trial-format to catch them.
        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
            || try_format(&Local::now(), &self.date_format).is_none()
        {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        Ok(())
    }

    /// Formats `at` with the configured display format.
    ///
    /// Falls back to `DEFAULT_DATE_FORMAT` if the configured pattern cannot
    /// format, so an unvalidated config never panics here.
    pub fn format_date<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        try_format(at, &self.date_format)
            .or_else(|| try_format(at, DEFAULT_DATE_FORMAT))
            .unwrap_or_default()
    }

    /// Today's date in the local time zone, display-formatted.
    pub fn today(&self) -> String {
        self.format_date(&Local::now())
    }
}

fn try_format<Tz>(at: &DateTime<Tz>, pattern: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", at.format(pattern)).ok()?;
    Some(out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    EmptyStorageKey,
    InvalidDateFormat(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid store config: {message}"),
            Self::EmptyStorageKey => write!(f, "storage_key cannot be empty"),
            Self::InvalidDateFormat(format) => write!(f, "invalid date_format `{format}`"),
        }
    }
}

impl Error for ConfigError {}
