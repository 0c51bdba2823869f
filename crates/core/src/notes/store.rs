//! The note persistence contract.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use super::title::header_line;

#[derive(Debug, Error)]
pub enum NoteStoreError {
    #[error("invalid note title: '{0}'")]
    InvalidTitle(String),

    #[error("note '{0}' does not exist")]
    NotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk notes directory {0}: {1}")]
    Walk(String, #[source] walkdir::Error),
}

pub type NoteResult<T> = Result<T, NoteStoreError>;

/// Result of asking for a note to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteCreation {
    Created,
    /// The note was already there; nothing was written.
    AlreadyExists,
}

/// Notes grouped by their parent folder.
///
/// Keys are parent paths in display form (`""` for top-level notes,
/// `"Projects"`, `"Projects/Archive"`); values are child names in display form,
/// sorted. `"Parent"` + `"Child"` is the note titled `"Parent/Child"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteHierarchy {
    groups: BTreeMap<String, Vec<String>>,
}

impl NoteHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a folder, even if it holds no notes.
    pub fn add_parent(&mut self, parent: impl Into<String>) {
        self.groups.entry(parent.into()).or_default();
    }

    pub fn add_note(&mut self, parent: impl Into<String>, child: impl Into<String>) {
        let children = self.groups.entry(parent.into()).or_default();
        children.push(child.into());
        children.sort();
    }

    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn children(&self, parent: &str) -> &[String] {
        self.groups.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Full titles of every note, usable with [`NoteStore::read_note`].
    pub fn titles(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(parent, children)| {
                children.iter().map(move |child| {
                    if parent.is_empty() { child.clone() } else { format!("{parent}/{child}") }
                })
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }
}

/// Storage for hierarchical notes.
///
/// Titles may contain `/` to nest a note under a parent folder.
pub trait NoteStore {
    fn note_exists(&self, title: &str) -> bool;

    /// Full text of a note, header line included.
    fn read_note(&self, title: &str) -> NoteResult<String>;

    /// Overwrite an existing note. Never creates one.
    fn save_note(&self, title: &str, content: &str) -> NoteResult<()>;

    /// Create a note holding only its `# <title>` header.
    fn create_note(&self, title: &str) -> NoteResult<NoteCreation>;

    /// Display names of the top-level notes, sorted.
    fn list_notes(&self) -> NoteResult<Vec<String>>;

    fn list_notes_hierarchy(&self) -> NoteResult<NoteHierarchy>;

    /// A note is empty when missing, blank, or holding only its header line.
    fn is_note_empty(&self, title: &str) -> bool {
        match self.read_note(title) {
            Ok(content) => {
                let trimmed = content.trim();
                trimmed.is_empty() || trimmed == header_line(title)
            }
            Err(_) => true,
        }
    }
}
