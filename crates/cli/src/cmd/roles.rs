//! Roles command: list and edit the role vocabulary.
//!
//! Edits are saved under the notes directory and take precedence over the
//! roles listed in the config profile from then on.

use notetags_core::config::ResolvedConfig;
use notetags_core::grammar::{GrammarError, TagGrammar};

use super::{fail, load_grammar};
use crate::{RolesArgs, RolesCommand};

pub fn run(cfg: &ResolvedConfig, args: RolesArgs) {
    let (store, mut grammar) = load_grammar(cfg);

    let command = args.command.unwrap_or(RolesCommand::List);
    let message = match apply(&mut grammar, &command) {
        Ok(Some(message)) => message,
        Ok(None) => {
            print_roles(&grammar);
            return;
        }
        Err(e) => fail(e),
    };

    if let Err(e) = store.save(&grammar) {
        fail(format_args!("Failed to save roles: {e}"));
    }
    println!("{message}");
}

/// Apply an edit; `None` for read-only commands.
fn apply(grammar: &mut TagGrammar, command: &RolesCommand) -> Result<Option<String>, GrammarError> {
    let message = match command {
        RolesCommand::List => return Ok(None),
        RolesCommand::Add { name } => {
            grammar.add_role(name)?;
            format!("Added role: {}", name.trim())
        }
        RolesCommand::Rename { old, new } => {
            grammar.rename_role(old, new)?;
            format!("Renamed role: {old} -> {}", new.trim())
        }
        RolesCommand::Remove { name } => {
            grammar.remove_role(name)?;
            format!("Removed role: {name}")
        }
        RolesCommand::Up { name } => moved(name, grammar.move_role_up(name)?, "top"),
        RolesCommand::Down { name } => moved(name, grammar.move_role_down(name)?, "bottom"),
    };
    Ok(Some(message))
}

fn moved(name: &str, did_move: bool, edge: &str) -> String {
    if did_move {
        format!("Moved role: {name}")
    } else {
        format!("Role already at the {edge}: {name}")
    }
}

fn print_roles(grammar: &TagGrammar) {
    if grammar.roles().is_empty() {
        println!("(no roles)");
        return;
    }
    for (idx, role) in grammar.roles().iter().enumerate() {
        println!("{:>3}. [{role}]", idx + 1);
    }
}
