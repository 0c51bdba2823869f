//! Sorted lookup of bracketed role tags.

use std::collections::BTreeMap;

/// Maps the literal tag text (`[Role]`) to the role's position in the grammar.
///
/// Lookups only check the candidate prefixes of a line that end in `]`, so
/// matching costs `O(k log n)` where `k` is the number of closing brackets
/// within the longest tag rather than a scan over every role.
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    tags: BTreeMap<String, usize>,
    longest: usize,
}

impl PrefixIndex {
    pub fn build<S: AsRef<str>>(roles: &[S]) -> Self {
        let mut tags = BTreeMap::new();
        let mut longest = 0;
        for (position, role) in roles.iter().enumerate() {
            let tag = format!("[{}]", role.as_ref());
            longest = longest.max(tag.len());
            tags.entry(tag).or_insert(position);
        }
        Self { tags, longest }
    }

    /// Find the role tag `text` starts with.
    ///
    /// When several tags are literal prefixes of `text` (only possible when a
    /// role name itself contains `]`), the one earliest in grammar order wins.
    /// Returns the role position and the byte length of the tag.
    pub fn find(&self, text: &str) -> Option<(usize, usize)> {
        if !text.starts_with('[') {
            return None;
        }

        text.match_indices(']')
            .map(|(i, _)| i + 1)
            .take_while(|end| *end <= self.longest)
            .filter_map(|end| self.tags.get(&text[..end]).map(|pos| (*pos, end)))
            .min_by_key(|(pos, _)| *pos)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
