use notetags_core::config::ResolvedConfig;
use notetags_core::notes::{NoteHierarchy, NoteStore};

use super::{fail, open_notes};

pub fn run(cfg: &ResolvedConfig) {
    let store = open_notes(cfg);
    let hierarchy = store
        .list_notes_hierarchy()
        .unwrap_or_else(|e| fail(format_args!("Failed to list notes: {e}")));

    if hierarchy.is_empty() {
        println!("(no notes yet)");
        println!("Use 'ntg new <TITLE>' to create one.");
        return;
    }
    print!("{}", render_tree(&hierarchy));
}

/// Top-level notes first, then each folder followed by its notes indented.
fn render_tree(hierarchy: &NoteHierarchy) -> String {
    let mut out = String::new();
    for child in hierarchy.children("") {
        out.push_str(&format!("{child}\n"));
    }
    let mut folders: Vec<_> = hierarchy.iter().filter(|(p, _)| !p.is_empty()).collect();
    folders.sort_by_key(|&(p, _)| p.split('/').collect::<Vec<_>>());

    for (parent, children) in folders {
        let depth = parent.matches('/').count();
        let name = parent.rsplit('/').next().unwrap_or(parent);
        out.push_str(&format!("{}{name}/\n", "  ".repeat(depth)));
        for child in children {
            out.push_str(&format!("{}{child}\n", "  ".repeat(depth + 1)));
        }
    }
    out
}
