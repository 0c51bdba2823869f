//! Mapping between note titles and storage paths.
//!
//! `"Projects/Alpha Plan"` is stored at `projects/alpha_plan.md`: every `/`
//! separated segment is lowercased with spaces turned into underscores.

use std::path::PathBuf;

use super::store::NoteStoreError;

/// Storage key segments for a title.
pub fn storage_segments(title: &str) -> Result<Vec<String>, NoteStoreError> {
    let segments: Vec<String> =
        title.split('/').map(|part| part.replace(' ', "_").to_lowercase()).collect();

    let invalid = segments
        .iter()
        .any(|s| s.is_empty() || s == "." || s == ".." || s.contains('\\'));
    if invalid {
        return Err(NoteStoreError::InvalidTitle(title.to_string()));
    }
    Ok(segments)
}

/// Path of a note relative to the notes root.
pub fn relative_path(title: &str) -> Result<PathBuf, NoteStoreError> {
    let segments = storage_segments(title)?;
    let mut path = PathBuf::new();
    if let Some((file, dirs)) = segments.split_last() {
        for dir in dirs {
            path.push(dir);
        }
        path.push(format!("{file}.md"));
    }
    Ok(path)
}

/// Turn a storage key back into a readable name: `alpha_plan` -> `Alpha Plan`.
///
/// Letters following a non-letter are uppercased, all others lowercased.
pub fn display_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_word_start = true;
    for ch in key.replace('_', " ").chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// The one spelling of a title that every equivalent spelling maps to.
///
/// `"projects/tesis"` and `"Projects/Tesis"` name the same file and both
/// canonicalize to `"Projects/Tesis"`, which reads back through the store.
pub fn canonical_title(title: &str) -> Result<String, NoteStoreError> {
    let segments = storage_segments(title)?;
    Ok(segments.iter().map(|s| display_name(s)).collect::<Vec<_>>().join("/"))
}

/// The header line a new note starts with.
pub fn header_line(title: &str) -> String {
    format!("# {title}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_normalizes_segments() {
        assert_eq!(relative_path("Compras").unwrap(), PathBuf::from("compras.md"));
        assert_eq!(
            relative_path("Projects/Alpha Plan").unwrap(),
            PathBuf::from("projects/alpha_plan.md")
        );
    }

    #[test]
    fn test_invalid_titles() {
        for title in ["", "a//b", "../escape", "a/./b", "trailing/"] {
            assert!(
                matches!(relative_path(title), Err(NoteStoreError::InvalidTitle(_))),
                "{title:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_canonical_title_ignores_case_and_spacing() {
        assert_eq!(canonical_title("projects/tesis").unwrap(), "Projects/Tesis");
        assert_eq!(canonical_title("PROJECTS/Alpha_plan").unwrap(), "Projects/Alpha Plan");
        assert_eq!(
            canonical_title("Projects/Alpha Plan").unwrap(),
            canonical_title("projects/alpha plan").unwrap()
        );
        assert!(canonical_title("../x").is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("alpha_plan"), "Alpha Plan");
        assert_eq!(display_name("work-out"), "Work-Out");
        assert_eq!(display_name("diseño"), "Diseño");
    }
}
