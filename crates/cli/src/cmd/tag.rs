use notetags_core::classify::retag_line_with_role;
use notetags_core::config::ResolvedConfig;
use notetags_core::notes::NoteStore;
use tracing::info;

use super::{fail, load_grammar, note_line, open_notes, read_note};
use crate::TagArgs;

pub fn run(cfg: &ResolvedConfig, args: TagArgs) {
    let store = open_notes(cfg);
    let (_, grammar) = load_grammar(cfg);
    let content = read_note(&store, &args.title);

    let Some(line) = note_line(&content, args.line) else {
        fail(format_args!("'{}' has no line {}", args.title, args.line));
    };
    let retagged =
        retag_line_with_role(line, &args.role, &grammar).unwrap_or_else(|e| fail(e));

    let updated = replace_line(&content, args.line, &retagged);
    if let Err(e) = store.save_note(&args.title, &updated) {
        fail(format_args!("Failed to save note: {e}"));
    }
    info!(note = %args.title, line = args.line, role = %args.role, "retagged line");
    println!("{:>4}  {}", args.line, retagged);
}

/// `content` with its 1-based `number`th line swapped for `text`.
///
/// A trailing `\r` on the original line is kept.
fn replace_line(content: &str, number: usize, text: &str) -> String {
    content
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            if idx + 1 != number {
                return line.to_string();
            }
            if line.ends_with('\r') { format!("{text}\r") } else { text.to_string() }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
