//! Greedy left-to-right tag extraction.

use crate::grammar::{GrammarError, TagGrammar};

use super::types::{Classification, ClassifiedLine};

/// Classify a single line against `grammar`.
///
/// Empty and whitespace-only lines yield no classifications. A non-empty line
/// without any recognized leading tag yields exactly `[GeneralText]`.
pub fn classify(line: &str, grammar: &TagGrammar) -> Vec<Classification> {
    classify_line(line, grammar).tags
}

/// Classify a line and keep the untagged body alongside the tags.
pub fn classify_line<'a>(line: &'a str, grammar: &TagGrammar) -> ClassifiedLine<'a> {
    let trimmed = line.trim();
    let mut tags = Vec::new();

    let mut rest = skip_roles(trimmed, grammar, |role| {
        tags.push(Classification::Role(role.to_string()));
    });

    // One Eisenhower tag at most, then one task-type tag at most.
    if let Some((category, len)) = grammar.match_eisenhower(rest) {
        tags.push(Classification::Eisenhower(category));
        rest = rest[len..].trim_start();
    }
    if let Some((task_type, len)) = grammar.match_task_type(rest) {
        tags.push(Classification::TaskType(task_type));
        rest = rest[len..].trim_start();
    }

    if tags.is_empty() && !trimmed.is_empty() {
        tags.push(Classification::GeneralText);
    }

    ClassifiedLine { tags, body: rest }
}

/// The line body after its leading tag run.
pub fn strip_tags<'a>(line: &'a str, grammar: &TagGrammar) -> &'a str {
    classify_line(line, grammar).body
}

/// Byte offset where the body of `line` starts, past its tags and surrounding whitespace.
pub fn tag_prefix_len(line: &str, grammar: &TagGrammar) -> usize {
    let body = strip_tags(line, grammar);
    line.trim_end().len() - body.len()
}

/// Replace every leading role tag of `line` with a single `[role]` tag.
///
/// Eisenhower and task-type tags that follow the roles are kept as written.
pub fn retag_line_with_role(
    line: &str,
    role: &str,
    grammar: &TagGrammar,
) -> Result<String, GrammarError> {
    if !grammar.has_role(role) {
        return Err(GrammarError::UnknownRole(role.to_string()));
    }

    let rest = skip_roles(line.trim(), grammar, |_| {});
    Ok(format!("[{role}] {rest}").trim_end().to_string())
}

fn skip_roles<'a>(
    mut text: &'a str,
    grammar: &TagGrammar,
    mut on_role: impl FnMut(&str),
) -> &'a str {
    while let Some((role, len)) = grammar.match_role(text) {
        on_role(role);
        text = text[len..].trim_start();
    }
    text
}
