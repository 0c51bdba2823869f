//! Filter criteria and results.

use std::collections::BTreeSet;
use std::fmt;

use crate::classify::Classification;
use crate::grammar::{EisenhowerCategory, TaskType};

/// A single `(kind, name)` criterion for [`super::NoteFilterEngine::filter_by_classification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    Role(String),
    Eisenhower(EisenhowerCategory),
    TaskType(TaskType),
}

impl TagFilter {
    pub fn matches(&self, classification: &Classification) -> bool {
        match (self, classification) {
            (TagFilter::Role(want), Classification::Role(got)) => want == got,
            (TagFilter::Eisenhower(want), Classification::Eisenhower(got)) => want == got,
            (TagFilter::TaskType(want), Classification::TaskType(got)) => want == got,
            _ => false,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TagFilter::Role(role) => role,
            TagFilter::Eisenhower(category) => category.key(),
            TagFilter::TaskType(task_type) => task_type.key(),
        }
    }
}

/// Active selections across the three tag dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub roles: BTreeSet<String>,
    pub eisenhower: BTreeSet<EisenhowerCategory>,
    pub task_types: BTreeSet<TaskType>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_eisenhower(mut self, category: EisenhowerCategory) -> Self {
        self.eisenhower.insert(category);
        self
    }

    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_types.insert(task_type);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.eisenhower.is_empty() && self.task_types.is_empty()
    }

    /// Number of selected values across all dimensions.
    pub fn len(&self) -> usize {
        self.roles.len() + self.eisenhower.len() + self.task_types.len()
    }

    pub fn selects(&self, classification: &Classification) -> bool {
        match classification {
            Classification::Role(role) => self.roles.contains(role),
            Classification::Eisenhower(category) => self.eisenhower.contains(category),
            Classification::TaskType(task_type) => self.task_types.contains(task_type),
            Classification::GeneralText => false,
        }
    }
}

/// Which dimension a full render prefers when picking a line's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Role,
    Eisenhower,
}

/// A line ready for display together with the tag that colors it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub tag: Classification,
}

impl DisplayLine {
    pub fn new(text: impl Into<String>, tag: Classification) -> Self {
        Self { text: text.into(), tag }
    }

    pub fn display_tag(&self) -> String {
        self.tag.display_tag()
    }
}

/// Outcome of a filter; "no matches" is a status, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterStatus {
    /// At least one line matched.
    Matched(usize),
    /// The criteria were valid but nothing matched.
    NoMatches(String),
    /// No criteria were active; the whole note is shown.
    Unfiltered,
}

impl fmt::Display for FilterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStatus::Matched(n) => write!(f, "{n} matching lines"),
            FilterStatus::NoMatches(message) => f.write_str(message),
            FilterStatus::Unfiltered => f.write_str("showing all lines"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub lines: Vec<DisplayLine>,
    pub status: FilterStatus,
}

impl FilterOutcome {
    pub(crate) fn from_lines(
        lines: Vec<DisplayLine>,
        empty_message: impl FnOnce() -> String,
    ) -> Self {
        let status = if lines.is_empty() {
            FilterStatus::NoMatches(empty_message())
        } else {
            FilterStatus::Matched(lines.len())
        };
        Self { lines, status }
    }

    pub fn has_matches(&self) -> bool {
        !self.lines.is_empty()
    }
}
