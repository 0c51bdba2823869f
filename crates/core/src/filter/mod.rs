//! Querying notes by their line classifications.

mod engine;
mod types;

pub use engine::NoteFilterEngine;
pub use types::{
    DisplayLine, FilterOutcome, FilterSelection, FilterStatus, RenderMode, TagFilter,
};
