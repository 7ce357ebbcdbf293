//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notegrid_core` linkage without the Flutter runtime.
//! - Print the notes stored in a database file: `notegrid_cli [db_path]`.

use notegrid_core::{NoteStore, SqliteKeyValueStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Why: keep a tiny probe that exercises core wiring independently from
    // the Flutter/FFI runtime setup.
    println!("notegrid_core ping={}", notegrid_core::ping());
    println!("notegrid_core version={}", notegrid_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let backing = match SqliteKeyValueStore::open(&db_path) {
        Ok(backing) => backing,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = NoteStore::new(backing);
    let notes = store.load();
    println!("notes={}", notes.len());
    for note in notes {
        println!("{}\t{}\t{}\t{}", note.id, note.date, note.color, note.title);
    }
    ExitCode::SUCCESS
}
