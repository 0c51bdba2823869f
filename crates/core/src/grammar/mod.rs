//! Tag vocabulary.
//!
//! Roles are user-configurable and ordered; Eisenhower quadrants and task
//! types are fixed for the lifetime of a grammar.

mod prefix;
mod store;
mod tag_grammar;
mod types;

pub use prefix::PrefixIndex;
pub use store::GrammarStore;
pub use tag_grammar::{DEFAULT_ROLES, GrammarError, TagGrammar};
pub use types::{EisenhowerCategory, TaskType, UnknownKey};
