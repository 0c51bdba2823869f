use notetags_core::config::{ConfigLoader, default_config_path};
use notetags_core::grammar::GrammarStore;
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            let roles = GrammarStore::new(&rc.notes_dir);
            println!("OK   ntg doctor");
            println!("version: {}", notetags_core::version());
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("notes_dir: {}", rc.notes_dir.display());
            println!("calendar_file: {}", rc.calendar_file.display());
            println!("roles_state: {}", roles.state_path().display());
            println!("roles: {}", rc.roles.join(", "));
            println!("logging.level: {}", rc.logging.level);
            if let Some(file) = &rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL ntg doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
