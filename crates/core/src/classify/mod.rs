//! Line classification.
//!
//! A line is classified by the tags it starts with: any number of role tags,
//! then at most one Eisenhower tag, then at most one task-type tag.

mod classifier;
mod types;

pub use classifier::{classify, classify_line, retag_line_with_role, strip_tags, tag_prefix_len};
pub use types::{Classification, ClassifiedLine, TagKind};
