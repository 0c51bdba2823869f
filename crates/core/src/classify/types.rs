//! Classification results.

use std::fmt;
use std::str::FromStr;

use crate::grammar::{EisenhowerCategory, TaskType};

/// The dimension a classification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Role,
    Eisenhower,
    TaskType,
    GeneralText,
}

impl TagKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TagKind::Role => "role",
            TagKind::Eisenhower => "eisenhower",
            TagKind::TaskType => "task_type",
            TagKind::GeneralText => "general_text",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "role" => Ok(TagKind::Role),
            "eisenhower" => Ok(TagKind::Eisenhower),
            "task_type" => Ok(TagKind::TaskType),
            "general_text" => Ok(TagKind::GeneralText),
            other => Err(format!("unknown tag kind: {other}")),
        }
    }
}

/// A single `(kind, name)` result of parsing a line's leading tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    Role(String),
    Eisenhower(EisenhowerCategory),
    TaskType(TaskType),
    /// A non-empty line without any recognized tag.
    GeneralText,
}

impl Classification {
    pub fn kind(&self) -> TagKind {
        match self {
            Classification::Role(_) => TagKind::Role,
            Classification::Eisenhower(_) => TagKind::Eisenhower,
            Classification::TaskType(_) => TagKind::TaskType,
            Classification::GeneralText => TagKind::GeneralText,
        }
    }

    /// Role name, category key or task-type key; `None` for general text.
    pub fn name(&self) -> Option<&str> {
        match self {
            Classification::Role(role) => Some(role),
            Classification::Eisenhower(category) => Some(category.key()),
            Classification::TaskType(task_type) => Some(task_type.key()),
            Classification::GeneralText => None,
        }
    }

    /// Tag used by the presentation layer to pick a color.
    ///
    /// `<role>`, `EISENHOWER_<key>`, `TASK_TYPE_<key>` or `general_text`.
    pub fn display_tag(&self) -> String {
        match self {
            Classification::Role(role) => role.clone(),
            Classification::Eisenhower(category) => format!("EISENHOWER_{}", category.key()),
            Classification::TaskType(task_type) => format!("TASK_TYPE_{}", task_type.key()),
            Classification::GeneralText => TagKind::GeneralText.as_str().to_string(),
        }
    }

    /// The literal tag text this classification was parsed from.
    pub fn tag_text(&self) -> Option<String> {
        match self {
            Classification::Role(role) => Some(format!("[{role}]")),
            Classification::Eisenhower(category) => Some(category.tag()),
            Classification::TaskType(task_type) => Some(task_type.tag()),
            Classification::GeneralText => None,
        }
    }

    pub fn is_general_text(&self) -> bool {
        matches!(self, Classification::GeneralText)
    }
}

/// A line split into its classified tag run and the remaining body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub tags: Vec<Classification>,
    /// Text after the last recognized tag, leading whitespace removed.
    pub body: &'a str,
}

impl ClassifiedLine<'_> {
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(|c| match c {
            Classification::Role(role) => Some(role.as_str()),
            _ => None,
        })
    }

    pub fn eisenhower(&self) -> Option<EisenhowerCategory> {
        self.tags.iter().find_map(|c| match c {
            Classification::Eisenhower(category) => Some(*category),
            _ => None,
        })
    }

    pub fn task_type(&self) -> Option<TaskType> {
        self.tags.iter().find_map(|c| match c {
            Classification::TaskType(task_type) => Some(*task_type),
            _ => None,
        })
    }
}
