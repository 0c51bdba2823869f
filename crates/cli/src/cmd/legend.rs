use notetags_core::config::ResolvedConfig;

use super::load_grammar;

pub fn run(cfg: &ResolvedConfig) {
    let (_, grammar) = load_grammar(cfg);

    println!("Eisenhower:");
    for (tag, description) in grammar.eisenhower_legend() {
        println!("  {tag:<8} {description}");
    }

    println!();
    println!("Task types:");
    for task_type in grammar.task_types() {
        println!("  {:<14} {}", task_type.tag(), task_type.description());
    }

    println!();
    println!("Tags go at the start of a line, roles first: [Trabajo][E:HA][T:TAREA] send report");
}
