mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ntg", version, about = "Tagged notes, Eisenhower filters and a line calendar")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// Create a note (use '/' to nest it under a parent)
    New(NewArgs),

    /// List notes grouped by parent folder
    Notes,

    /// Print every line of a note with its display tag
    Show(ShowArgs),

    /// Print the lines of a note matching tag filters
    Filter(FilterArgs),

    /// Replace the role tags of one line of a note
    Tag(TagArgs),

    /// Manage the role vocabulary
    Roles(RolesArgs),

    /// Show the Eisenhower tags and their meaning
    Legend,

    /// Put a line of a note on the calendar
    Schedule(ScheduleArgs),

    /// List calendar events for a day
    Agenda(AgendaArgs),

    /// Move an event or change its duration
    Reschedule(RescheduleArgs),

    /// Remove an event from the calendar
    Unschedule(UnscheduleArgs),
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Note title, e.g. "Projects/Tesis"
    pub title: String,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ShowMode {
    #[default]
    Role,
    Eisenhower,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub title: String,

    /// Which tag to prefer when a line carries both a role and a quadrant
    #[arg(long, value_enum, default_value_t = ShowMode::Role)]
    pub mode: ShowMode,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    pub title: String,

    /// Keep lines tagged with this role (repeatable)
    #[arg(long = "role")]
    pub roles: Vec<String>,

    /// Keep lines in this quadrant, by key or abbreviation (repeatable)
    #[arg(long = "eisenhower")]
    pub eisenhower: Vec<String>,

    /// Keep lines of this task type (repeatable)
    #[arg(long = "task-type")]
    pub task_types: Vec<String>,

    /// Drop untagged lines instead of showing them as general text
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TagArgs {
    pub title: String,

    /// 1-based line number in the note
    pub line: usize,

    pub role: String,
}

#[derive(Debug, Args)]
pub struct RolesArgs {
    #[command(subcommand)]
    pub command: Option<RolesCommand>,
}

#[derive(Debug, Subcommand)]
pub enum RolesCommand {
    /// List roles in match order
    List,
    /// Append a role
    Add { name: String },
    /// Rename a role
    Rename { old: String, new: String },
    /// Remove a role
    Remove { name: String },
    /// Move a role one place earlier
    Up { name: String },
    /// Move a role one place later
    Down { name: String },
}

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    pub title: String,

    /// 1-based line number in the note
    pub line: usize,

    /// Start as "YYYY-MM-DD HH:MM"
    pub start: String,

    /// Duration in minutes
    #[arg(long, default_value_t = notetags_core::calendar::DEFAULT_DURATION_MINUTES)]
    pub duration: u32,
}

#[derive(Debug, Args)]
pub struct AgendaArgs {
    /// Day as "YYYY-MM-DD" (defaults to today)
    pub date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RescheduleArgs {
    pub id: String,

    /// New start as "YYYY-MM-DD HH:MM"
    #[arg(long)]
    pub at: Option<String>,

    /// New duration in minutes
    #[arg(long)]
    pub duration: Option<u32>,
}

#[derive(Debug, Args)]
pub struct UnscheduleArgs {
    pub id: String,
}

fn main() {
    let cli = Cli::parse();
    let config = || cmd::load_config(cli.config.as_deref(), cli.profile.as_deref());

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref()),
        Commands::New(args) => cmd::new::run(&config(), args),
        Commands::Notes => cmd::notes::run(&config()),
        Commands::Show(args) => cmd::show::run(&config(), args),
        Commands::Filter(args) => cmd::filter::run(&config(), args),
        Commands::Tag(args) => cmd::tag::run(&config(), args),
        Commands::Roles(args) => cmd::roles::run(&config(), args),
        Commands::Legend => cmd::legend::run(&config()),
        Commands::Schedule(args) => cmd::schedule::run(&config(), args),
        Commands::Agenda(args) => cmd::agenda::run(&config(), args),
        Commands::Reschedule(args) => cmd::schedule::reschedule(&config(), args),
        Commands::Unschedule(args) => cmd::schedule::unschedule(&config(), args),
    }
    logging::flush();
}
