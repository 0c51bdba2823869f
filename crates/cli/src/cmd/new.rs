use notetags_core::config::ResolvedConfig;
use notetags_core::notes::{NoteCreation, NoteStore};

use super::{fail, open_notes};
use crate::NewArgs;

pub fn run(cfg: &ResolvedConfig, args: NewArgs) {
    let store = open_notes(cfg);
    match store.create_note(&args.title) {
        Ok(NoteCreation::Created) => {
            let path = store.note_path(&args.title).unwrap_or_else(|e| fail(e));
            println!("Created note: {}", args.title);
            println!("Path: {}", path.display());
        }
        Ok(NoteCreation::AlreadyExists) => {
            println!("Note already exists: {}", args.title);
        }
        Err(e) => fail(format_args!("Failed to create note: {e}")),
    }
}
