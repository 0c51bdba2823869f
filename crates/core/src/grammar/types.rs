//! Fixed Eisenhower and task-type vocabularies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a category or type key is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} key: {key}")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub key: String,
}

/// One of the four urgency/importance quadrants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EisenhowerCategory {
    HacerAhora,
    Planificar,
    Delegar,
    Eliminar,
}

impl EisenhowerCategory {
    /// All categories in abbreviation order; prefixes are tried in this order.
    pub const ALL: [EisenhowerCategory; 4] = [
        EisenhowerCategory::HacerAhora,
        EisenhowerCategory::Planificar,
        EisenhowerCategory::Delegar,
        EisenhowerCategory::Eliminar,
    ];

    /// Canonical key, e.g. `HACER_AHORA`.
    pub fn key(self) -> &'static str {
        match self {
            EisenhowerCategory::HacerAhora => "HACER_AHORA",
            EisenhowerCategory::Planificar => "PLANIFICAR",
            EisenhowerCategory::Delegar => "DELEGAR",
            EisenhowerCategory::Eliminar => "ELIMINAR",
        }
    }

    /// Abbreviation used inside the `[E:<abbr>]` tag.
    pub fn abbreviation(self) -> &'static str {
        match self {
            EisenhowerCategory::HacerAhora => "HA",
            EisenhowerCategory::Planificar => "P",
            EisenhowerCategory::Delegar => "D",
            EisenhowerCategory::Eliminar => "E",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EisenhowerCategory::HacerAhora => "Urgente e Importante",
            EisenhowerCategory::Planificar => "Importante, no Urgente",
            EisenhowerCategory::Delegar => "Urgente, no Importante",
            EisenhowerCategory::Eliminar => "No Urgente, no Importante",
        }
    }

    /// The literal tag text, e.g. `[E:HA]`.
    pub fn tag(self) -> String {
        format!("[E:{}]", self.abbreviation())
    }

    pub fn from_abbreviation(abbr: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.abbreviation() == abbr)
    }
}

impl fmt::Display for EisenhowerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EisenhowerCategory {
    type Err = UnknownKey;

    /// Accepts the canonical key or the tag abbreviation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .or_else(|| Self::from_abbreviation(s))
            .ok_or_else(|| UnknownKey { kind: "eisenhower", key: s.to_string() })
    }
}

/// Nature of a line: idea, project or task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Idea,
    Proyecto,
    Tarea,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Idea, TaskType::Proyecto, TaskType::Tarea];

    pub fn key(self) -> &'static str {
        match self {
            TaskType::Idea => "IDEA",
            TaskType::Proyecto => "PROYECTO",
            TaskType::Tarea => "TAREA",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TaskType::Idea => "Idea",
            TaskType::Proyecto => "Proyecto",
            TaskType::Tarea => "Tarea",
        }
    }

    /// The literal tag text, e.g. `[T:TAREA]`.
    pub fn tag(self) -> String {
        format!("[T:{}]", self.key())
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TaskType {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| UnknownKey { kind: "task type", key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eisenhower_tags() {
        assert_eq!(EisenhowerCategory::HacerAhora.tag(), "[E:HA]");
        assert_eq!(EisenhowerCategory::Eliminar.tag(), "[E:E]");
    }

    #[test]
    fn test_eisenhower_from_str_accepts_key_and_abbreviation() {
        assert_eq!("PLANIFICAR".parse(), Ok(EisenhowerCategory::Planificar));
        assert_eq!("D".parse(), Ok(EisenhowerCategory::Delegar));
        assert!("URGENT".parse::<EisenhowerCategory>().is_err());
    }

    #[test]
    fn test_task_type_from_str() {
        assert_eq!("TAREA".parse(), Ok(TaskType::Tarea));
        assert!("tarea".parse::<TaskType>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_keys() {
        let json = serde_json::to_string(&EisenhowerCategory::HacerAhora).unwrap();
        assert_eq!(json, r#""HACER_AHORA""#);
        let json = serde_json::to_string(&TaskType::Proyecto).unwrap();
        assert_eq!(json, r#""PROYECTO""#);
    }
}
