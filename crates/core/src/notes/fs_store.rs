//! Notes as markdown files in nested directories.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use super::store::{NoteCreation, NoteHierarchy, NoteResult, NoteStore, NoteStoreError};
use super::title::{display_name, header_line, relative_path};

/// File-system backed [`NoteStore`].
#[derive(Debug, Clone)]
pub struct FsNoteStore {
    root: PathBuf,
}

impl FsNoteStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: &Path) -> NoteResult<Self> {
        fs::create_dir_all(root)
            .map_err(|source| NoteStoreError::Io { path: root.to_path_buf(), source })?;
        Ok(Self { root: root.to_path_buf() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the file backing `title`.
    pub fn note_path(&self, title: &str) -> NoteResult<PathBuf> {
        Ok(self.root.join(relative_path(title)?))
    }

    fn existing_path(&self, title: &str) -> NoteResult<PathBuf> {
        let path = self.note_path(title)?;
        if !path.is_file() {
            return Err(NoteStoreError::NotFound(title.to_string()));
        }
        Ok(path)
    }

    fn write_file(path: &Path, content: &str) -> NoteResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| NoteStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content)
            .map_err(|source| NoteStoreError::Io { path: path.to_path_buf(), source })
    }

    /// Parent key in display form for a directory relative to the root.
    fn parent_key(relative_dir: &Path) -> String {
        relative_dir
            .components()
            .map(|c| display_name(&c.as_os_str().to_string_lossy()))
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl NoteStore for FsNoteStore {
    fn note_exists(&self, title: &str) -> bool {
        self.note_path(title).is_ok_and(|p| p.is_file())
    }

    fn read_note(&self, title: &str) -> NoteResult<String> {
        let path = self.existing_path(title)?;
        debug!(title, path = %path.display(), "reading note");
        fs::read_to_string(&path).map_err(|source| NoteStoreError::Io { path, source })
    }

    fn save_note(&self, title: &str, content: &str) -> NoteResult<()> {
        let path = self.existing_path(title)?;
        debug!(title, bytes = content.len(), "saving note");
        Self::write_file(&path, content)
    }

    fn create_note(&self, title: &str) -> NoteResult<NoteCreation> {
        let path = self.note_path(title)?;
        if path.exists() {
            return Ok(NoteCreation::AlreadyExists);
        }

        Self::write_file(&path, &format!("{}\n\n", header_line(title)))?;
        info!(title, path = %path.display(), "created note");
        Ok(NoteCreation::Created)
    }

    fn list_notes(&self) -> NoteResult<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|source| NoteStoreError::Io { path: self.root.clone(), source })?;

        let mut notes = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|source| NoteStoreError::Io { path: self.root.clone(), source })?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(&path) {
                if let Some(stem) = path.file_stem() {
                    notes.push(display_name(&stem.to_string_lossy()));
                }
            }
        }
        notes.sort();
        Ok(notes)
    }

    fn list_notes_hierarchy(&self) -> NoteResult<NoteHierarchy> {
        let mut hierarchy = NoteHierarchy::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

        for entry in walker {
            let entry = entry
                .map_err(|e| NoteStoreError::Walk(self.root.display().to_string(), e))?;
            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);

            if entry.file_type().is_dir() {
                hierarchy.add_parent(Self::parent_key(relative));
            } else if is_markdown_file(path) {
                let parent = relative.parent().unwrap_or(Path::new(""));
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                hierarchy.add_note(Self::parent_key(parent), display_name(&stem));
            }
        }

        Ok(hierarchy)
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FsNoteStore) {
        let dir = TempDir::new().unwrap();
        let store = FsNoteStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_writes_header() {
        let (dir, store) = store();
        assert_eq!(store.create_note("Mi Lista").unwrap(), NoteCreation::Created);

        let content = fs::read_to_string(dir.path().join("mi_lista.md")).unwrap();
        assert_eq!(content, "# Mi Lista\n\n");
        assert!(store.is_note_empty("Mi Lista"));
    }

    #[test]
    fn test_create_existing_is_noop() {
        let (_dir, store) = store();
        store.create_note("Ideas").unwrap();
        store.save_note("Ideas", "# Ideas\n\nsomething").unwrap();

        assert_eq!(store.create_note("Ideas").unwrap(), NoteCreation::AlreadyExists);
        assert_eq!(store.read_note("Ideas").unwrap(), "# Ideas\n\nsomething");
    }

    #[test]
    fn test_title_lookup_is_case_and_space_insensitive() {
        let (_dir, store) = store();
        store.create_note("Weekly Plan").unwrap();
        assert!(store.note_exists("weekly plan"));
        assert!(store.note_exists("WEEKLY_PLAN"));
    }

    #[test]
    fn test_save_missing_note_fails() {
        let (dir, store) = store();
        let err = store.save_note("Ghost", "boo").unwrap_err();
        assert!(matches!(err, NoteStoreError::NotFound(t) if t == "Ghost"));
        assert!(!dir.path().join("ghost.md").exists());
    }

    #[test]
    fn test_read_missing_note_fails() {
        let (_dir, store) = store();
        assert!(matches!(store.read_note("Ghost"), Err(NoteStoreError::NotFound(_))));
        assert!(store.is_note_empty("Ghost"));
    }

    #[test]
    fn test_nested_note_creates_directories() {
        let (dir, store) = store();
        store.create_note("Projects/Alpha").unwrap();
        assert!(dir.path().join("projects/alpha.md").is_file());
        assert_eq!(store.read_note("Projects/Alpha").unwrap(), "# Projects/Alpha\n\n");
    }

    #[test]
    fn test_is_note_empty_with_content() {
        let (_dir, store) = store();
        store.create_note("Todo").unwrap();
        store.save_note("Todo", "# Todo\n\n[E:HA] pay rent").unwrap();
        assert!(!store.is_note_empty("Todo"));
    }

    #[test]
    fn test_list_notes_top_level_only() {
        let (dir, store) = store();
        store.create_note("shopping list").unwrap();
        store.create_note("Ideas").unwrap();
        store.create_note("Projects/Alpha").unwrap();
        fs::write(dir.path().join("readme.txt"), "not a note").unwrap();

        assert_eq!(store.list_notes().unwrap(), ["Ideas", "Shopping List"]);
    }

    #[test]
    fn test_hierarchy_groups_children_under_parents() {
        let (_dir, store) = store();
        store.create_note("Inbox").unwrap();
        store.create_note("Parent/Child").unwrap();
        store.create_note("Parent/Other Child").unwrap();
        store.create_note("Parent/Deep/Leaf").unwrap();

        let h = store.list_notes_hierarchy().unwrap();
        assert_eq!(h.children(""), ["Inbox"]);
        assert_eq!(h.children("Parent"), ["Child", "Other Child"]);
        assert_eq!(h.children("Parent/Deep"), ["Leaf"]);
        assert!(h.titles().contains(&"Parent/Child".to_string()));
    }

    #[test]
    fn test_hierarchy_uses_display_names_that_read_back() {
        let (_dir, store) = store();
        store.create_note("my projects/alpha plan").unwrap();

        let h = store.list_notes_hierarchy().unwrap();
        assert_eq!(h.parents().collect::<Vec<_>>(), ["", "My Projects"]);
        assert_eq!(h.children("My Projects"), ["Alpha Plan"]);
        for title in h.titles() {
            assert!(store.read_note(&title).is_ok(), "{title} should read back");
        }
    }

    #[test]
    fn test_hierarchy_skips_hidden_directories() {
        let (dir, store) = store();
        store.create_note("Visible").unwrap();
        fs::create_dir_all(dir.path().join(".notetags/state")).unwrap();
        fs::write(dir.path().join(".notetags/state/secret.md"), "# x").unwrap();

        let h = store.list_notes_hierarchy().unwrap();
        assert_eq!(h.titles(), ["Visible"]);
        assert!(h.parents().all(|p| !p.contains("notetags")));
    }

    #[test]
    fn test_invalid_title_is_rejected() {
        let (_dir, store) = store();
        assert!(matches!(store.create_note("../x"), Err(NoteStoreError::InvalidTitle(_))));
        assert!(!store.note_exists("../x"));
    }
}
