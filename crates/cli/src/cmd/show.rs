use notetags_core::config::ResolvedConfig;
use notetags_core::filter::{NoteFilterEngine, RenderMode};

use super::output::format_lines;
use super::{load_grammar, open_notes, read_note};
use crate::{ShowArgs, ShowMode};

pub fn run(cfg: &ResolvedConfig, args: ShowArgs) {
    let store = open_notes(cfg);
    let (_, grammar) = load_grammar(cfg);
    let content = read_note(&store, &args.title);

    let mode = match args.mode {
        ShowMode::Role => RenderMode::Role,
        ShowMode::Eisenhower => RenderMode::Eisenhower,
    };
    let lines = NoteFilterEngine::new(&grammar).render_all(&content, mode);
    print!("{}", format_lines(&lines, &grammar, true));
}
