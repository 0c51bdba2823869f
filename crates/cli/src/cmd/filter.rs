//! Filter command: lines of a note by role, quadrant or task type.

use notetags_core::config::ResolvedConfig;
use notetags_core::filter::{
    FilterOutcome, FilterSelection, FilterStatus, NoteFilterEngine, TagFilter,
};
use notetags_core::grammar::{EisenhowerCategory, TagGrammar, TaskType, UnknownKey};
use serde::Serialize;

use super::output::{LineOutput, format_lines, print_json};
use super::{fail, load_grammar, open_notes, read_note};
use crate::FilterArgs;

#[derive(Serialize)]
struct FilterOutput<'a> {
    note: &'a str,
    status: String,
    lines: Vec<LineOutput>,
}

pub fn run(cfg: &ResolvedConfig, args: FilterArgs) {
    let store = open_notes(cfg);
    let (_, grammar) = load_grammar(cfg);
    let content = read_note(&store, &args.title);

    let criteria = parse_criteria(&args, &grammar).unwrap_or_else(|e| fail(e));
    let engine = NoteFilterEngine::new(&grammar).include_unmatched_general_text(!args.strict);

    let outcome = match criteria.as_slice() {
        [single] => engine.filter_by_classification(&content, single),
        many => engine.apply_multi_filter(&content, &selection(many)),
    };

    if args.json {
        print_json(&FilterOutput {
            note: &args.title,
            status: outcome.status.to_string(),
            lines: outcome.lines.iter().map(|l| LineOutput::new(l, &grammar)).collect(),
        });
        return;
    }
    print_outcome(&outcome, &grammar);
}

fn print_outcome(outcome: &FilterOutcome, grammar: &TagGrammar) {
    match &outcome.status {
        FilterStatus::NoMatches(message) => println!("({message})"),
        _ => print!("{}", format_lines(&outcome.lines, grammar, false)),
    }
}

/// Criteria in command-line order: roles, then quadrants, then task types.
fn parse_criteria(args: &FilterArgs, grammar: &TagGrammar) -> Result<Vec<TagFilter>, String> {
    let mut criteria = Vec::new();
    for role in &args.roles {
        if !grammar.has_role(role) {
            return Err(format!("unknown role '{role}' (see 'ntg roles list')"));
        }
        criteria.push(TagFilter::Role(role.clone()));
    }
    for key in &args.eisenhower {
        let category: EisenhowerCategory = parse_key(key).map_err(|e| e.to_string())?;
        criteria.push(TagFilter::Eisenhower(category));
    }
    for key in &args.task_types {
        let task_type: TaskType = parse_key(key).map_err(|e| e.to_string())?;
        criteria.push(TagFilter::TaskType(task_type));
    }
    Ok(criteria)
}

fn parse_key<T: std::str::FromStr<Err = UnknownKey>>(key: &str) -> Result<T, UnknownKey> {
    key.trim().to_uppercase().replace(['-', ' '], "_").parse()
}

fn selection(criteria: &[TagFilter]) -> FilterSelection {
    criteria.iter().fold(FilterSelection::new(), |selection, filter| match filter {
        TagFilter::Role(role) => selection.with_role(role.clone()),
        TagFilter::Eisenhower(category) => selection.with_eisenhower(*category),
        TagFilter::TaskType(task_type) => selection.with_task_type(*task_type),
    })
}
