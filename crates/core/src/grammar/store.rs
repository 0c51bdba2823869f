//! Persistence of the user-edited role list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tag_grammar::{GrammarError, TagGrammar};

type Result<T> = std::result::Result<T, GrammarError>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RoleState {
    #[serde(default)]
    version: u64,
    #[serde(default)]
    roles: Vec<String>,
}

/// Loads and saves the role list.
///
/// State is stored in `.notetags/state/roles.toml` under the notes directory.
#[derive(Debug)]
pub struct GrammarStore {
    state_path: PathBuf,
}

impl GrammarStore {
    const STATE_DIR: &'static str = ".notetags/state";
    const STATE_FILE: &'static str = "roles.toml";

    pub fn new(notes_dir: &Path) -> Self {
        Self { state_path: notes_dir.join(Self::STATE_DIR).join(Self::STATE_FILE) }
    }

    /// Load the saved grammar, or build one from `fallback_roles` if nothing
    /// has been saved yet.
    pub fn load<S: AsRef<str>>(&self, fallback_roles: &[S]) -> Result<TagGrammar> {
        if !self.state_path.exists() {
            debug!(path = %self.state_path.display(), "no saved roles, using configured roles");
            return TagGrammar::new(fallback_roles);
        }

        let content = fs::read_to_string(&self.state_path).map_err(|source| {
            GrammarError::Read { path: self.state_path.clone(), source }
        })?;
        let state: RoleState = toml::from_str(&content).map_err(|source| {
            GrammarError::Parse { path: self.state_path.clone(), source }
        })?;

        TagGrammar::with_version(state.roles, state.version)
    }

    pub fn save(&self, grammar: &TagGrammar) -> Result<()> {
        if let Some(parent) = self.state_path.parent() {
            fs::create_dir_all(parent).map_err(|source| GrammarError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let state =
            RoleState { version: grammar.version(), roles: grammar.roles().to_vec() };
        let content = toml::to_string_pretty(&state)?;
        fs::write(&self.state_path, content).map_err(|source| GrammarError::Write {
            path: self.state_path.clone(),
            source,
        })?;
        debug!(path = %self.state_path.display(), version = grammar.version(), "saved roles");
        Ok(())
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}
