//! Note storage.
//!
//! The [`NoteStore`] trait is the boundary between the tag engine and where
//! notes actually live; [`FsNoteStore`] keeps them as markdown files.

mod fs_store;
mod store;
mod title;

pub use fs_store::FsNoteStore;
pub use store::{NoteCreation, NoteHierarchy, NoteResult, NoteStore, NoteStoreError};
pub use title::{canonical_title, display_name, header_line, relative_path, storage_segments};
