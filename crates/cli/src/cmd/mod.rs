//! Subcommand implementations.
//!
//! Every command reports failures on stderr and exits with status 1.

pub mod agenda;
pub mod doctor;
pub mod filter;
pub mod legend;
pub mod new;
pub mod notes;
pub mod output;
pub mod roles;
pub mod schedule;
pub mod show;
pub mod tag;

use std::fmt::Display;
use std::path::Path;

use notetags_core::calendar::CalendarStore;
use notetags_core::config::{ConfigLoader, ResolvedConfig};
use notetags_core::grammar::{GrammarStore, TagGrammar};
use notetags_core::notes::{FsNoteStore, NoteStore};

use crate::logging;

/// Print `message` to stderr and exit with status 1.
pub fn fail(message: impl Display) -> ! {
    eprintln!("{message}");
    logging::flush();
    std::process::exit(1);
}

/// Load the configuration and install logging from it.
pub fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(cfg) => {
            logging::init(&cfg);
            cfg
        }
        Err(e) => fail(format_args!("Configuration error: {e}")),
    }
}

pub fn open_notes(cfg: &ResolvedConfig) -> FsNoteStore {
    FsNoteStore::open(&cfg.notes_dir)
        .unwrap_or_else(|e| fail(format_args!("Failed to open notes directory: {e}")))
}

/// Saved roles if any, else the profile's roles.
pub fn load_grammar(cfg: &ResolvedConfig) -> (GrammarStore, TagGrammar) {
    let store = GrammarStore::new(&cfg.notes_dir);
    match store.load(cfg.roles.as_slice()) {
        Ok(grammar) => (store, grammar),
        Err(e) => fail(format_args!("Failed to load roles: {e}")),
    }
}

pub fn open_calendar(cfg: &ResolvedConfig) -> CalendarStore {
    CalendarStore::open(&cfg.calendar_file)
        .unwrap_or_else(|e| fail(format_args!("Failed to open calendar: {e}")))
}

pub fn read_note(store: &FsNoteStore, title: &str) -> String {
    store.read_note(title).unwrap_or_else(|e| fail(e))
}

/// The 1-based `number`th line of `content`, with any trailing `\r` removed.
pub fn note_line(content: &str, number: usize) -> Option<&str> {
    let idx = number.checked_sub(1)?;
    content.split('\n').nth(idx).map(|l| l.strip_suffix('\r').unwrap_or(l))
}
