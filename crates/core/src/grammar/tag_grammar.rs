//! The mutable role list plus the fixed vocabularies.

use std::path::PathBuf;

use thiserror::Error;

use super::prefix::PrefixIndex;
use super::types::{EisenhowerCategory, TaskType, UnknownKey};

/// Roles a fresh grammar starts with when nothing else is configured.
pub const DEFAULT_ROLES: &[&str] = &[
    "Programador",
    "Social",
    "Tesista",
    "General",
    "Asistente",
    "Work-out",
    "Estudiante",
    "Trabajo",
    "Diseñador",
    "TLP",
    "Ropa/Accesorios",
    "Cuidado",
];

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("role name cannot be empty")]
    EmptyRole,

    #[error("role '{0}' already exists")]
    DuplicateRole(String),

    #[error("role '{0}' not found")]
    UnknownRole(String),

    #[error("failed to read roles file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write roles file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roles file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize roles: {0}")]
    Serialize(#[from] toml::ser::Error),
}

type Result<T> = std::result::Result<T, GrammarError>;

/// Recognized tag vocabulary.
///
/// Only the role list can change. Every successful mutation bumps
/// [`TagGrammar::version`] so holders of derived data (rendered views,
/// cached classifications) can tell that they are stale.
#[derive(Debug, Clone)]
pub struct TagGrammar {
    roles: Vec<String>,
    index: PrefixIndex,
    version: u64,
}

impl TagGrammar {
    /// Build a grammar from an ordered role list.
    pub fn new<I, S>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_version(roles, 0)
    }

    /// Build a grammar restoring a previously persisted version counter.
    pub fn with_version<I, S>(roles: I, version: u64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut grammar =
            Self { roles: Vec::new(), index: PrefixIndex::default(), version };
        for role in roles {
            let name = normalize_role(role.as_ref())?;
            grammar.ensure_unique(&name, None)?;
            grammar.roles.push(name);
        }
        grammar.index = PrefixIndex::build(&grammar.roles);
        Ok(grammar)
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn add_role(&mut self, name: &str) -> Result<()> {
        let name = normalize_role(name)?;
        self.ensure_unique(&name, None)?;
        self.roles.push(name);
        self.touch();
        Ok(())
    }

    /// Rename a role in place, keeping its priority.
    pub fn rename_role(&mut self, old: &str, new: &str) -> Result<()> {
        let idx = self.position(old).ok_or_else(|| GrammarError::UnknownRole(old.into()))?;
        let new = normalize_role(new)?;
        self.ensure_unique(&new, Some(idx))?;
        self.roles[idx] = new;
        self.touch();
        Ok(())
    }

    pub fn remove_role(&mut self, name: &str) -> Result<()> {
        let idx =
            self.position(name).ok_or_else(|| GrammarError::UnknownRole(name.into()))?;
        self.roles.remove(idx);
        self.touch();
        Ok(())
    }

    /// Raise a role's matching priority by one slot.
    ///
    /// Returns `false` (and leaves the version alone) if it is already first.
    pub fn move_role_up(&mut self, name: &str) -> Result<bool> {
        let idx =
            self.position(name).ok_or_else(|| GrammarError::UnknownRole(name.into()))?;
        if idx == 0 {
            return Ok(false);
        }
        self.roles.swap(idx - 1, idx);
        self.touch();
        Ok(true)
    }

    /// Lower a role's matching priority by one slot.
    pub fn move_role_down(&mut self, name: &str) -> Result<bool> {
        let idx =
            self.position(name).ok_or_else(|| GrammarError::UnknownRole(name.into()))?;
        if idx + 1 >= self.roles.len() {
            return Ok(false);
        }
        self.roles.swap(idx, idx + 1);
        self.touch();
        Ok(true)
    }

    /// Match a role tag at the very start of `text`.
    ///
    /// Returns the role name and the byte length of its tag.
    pub fn match_role(&self, text: &str) -> Option<(&str, usize)> {
        self.index.find(text).map(|(pos, len)| (self.roles[pos].as_str(), len))
    }

    /// Match an `[E:<abbr>]` tag at the start of `text`.
    pub fn match_eisenhower(&self, text: &str) -> Option<(EisenhowerCategory, usize)> {
        EisenhowerCategory::ALL.into_iter().find_map(|category| {
            let tag = category.tag();
            text.starts_with(&tag).then(|| (category, tag.len()))
        })
    }

    /// Match a `[T:<key>]` tag at the start of `text`.
    pub fn match_task_type(&self, text: &str) -> Option<(TaskType, usize)> {
        TaskType::ALL.into_iter().find_map(|task_type| {
            let tag = task_type.tag();
            text.starts_with(&tag).then(|| (task_type, tag.len()))
        })
    }

    pub fn task_types(&self) -> &'static [TaskType] {
        &TaskType::ALL
    }

    /// Description of an Eisenhower key or abbreviation (`HACER_AHORA`, `HA`).
    pub fn describe_eisenhower(&self, key: &str) -> std::result::Result<&'static str, UnknownKey> {
        key.parse::<EisenhowerCategory>().map(EisenhowerCategory::description)
    }

    pub fn describe_task_type(&self, key: &str) -> std::result::Result<&'static str, UnknownKey> {
        key.parse::<TaskType>().map(TaskType::description)
    }

    /// One `(tag, description)` pair per quadrant, in abbreviation order.
    pub fn eisenhower_legend(&self) -> Vec<(String, &'static str)> {
        EisenhowerCategory::ALL.into_iter().map(|c| (c.tag(), c.description())).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.roles.iter().position(|r| r == name)
    }

    fn ensure_unique(&self, name: &str, skip: Option<usize>) -> Result<()> {
        let folded = name.to_lowercase();
        let clash = self
            .roles
            .iter()
            .enumerate()
            .any(|(i, r)| Some(i) != skip && r.to_lowercase() == folded);
        if clash {
            return Err(GrammarError::DuplicateRole(name.to_string()));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.index = PrefixIndex::build(&self.roles);
        self.version += 1;
    }
}

impl Default for TagGrammar {
    fn default() -> Self {
        Self {
            roles: DEFAULT_ROLES.iter().map(|r| r.to_string()).collect(),
            index: PrefixIndex::build(DEFAULT_ROLES),
            version: 0,
        }
    }
}

fn normalize_role(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GrammarError::EmptyRole);
    }
    Ok(name.to_string())
}
