//! Schedule, reschedule and unschedule note lines.

use notetags_core::calendar::{CalendarError, CalendarStore, EventId, format_start, parse_start};
use notetags_core::config::ResolvedConfig;
use notetags_core::notes::canonical_title;

use super::{fail, note_line, open_calendar, open_notes, read_note};
use crate::{RescheduleArgs, ScheduleArgs, UnscheduleArgs};

pub fn run(cfg: &ResolvedConfig, args: ScheduleArgs) {
    let store = open_notes(cfg);
    let content = read_note(&store, &args.title);

    let task_line = match note_line(&content, args.line).map(str::trim) {
        Some("") => fail(format_args!("line {} of '{}' is empty", args.line, args.title)),
        Some(line) => line,
        None => fail(format_args!("'{}' has no line {}", args.title, args.line)),
    };
    let start = parse_start(&args.start).unwrap_or_else(|e| {
        fail(format_args!("Invalid start '{}': {e} (expected YYYY-MM-DD HH:MM)", args.start))
    });

    // Event ids hash the title, so every spelling of it must hash the same.
    let title = canonical_title(&args.title).unwrap_or_else(|e| fail(e));
    let mut calendar = open_calendar(cfg);
    match calendar.add(&title, task_line, start, args.duration) {
        Ok(id) => {
            println!("Scheduled: {task_line}");
            println!("At: {} ({} min)", format_start(start), args.duration);
            println!("ID: {id}");
        }
        Err(CalendarError::DuplicateEvent(id)) => {
            fail(format_args!("Already scheduled at {} (ID: {id})", format_start(start)))
        }
        Err(e) => fail(format_args!("Failed to schedule: {e}")),
    }
}

pub fn reschedule(cfg: &ResolvedConfig, args: RescheduleArgs) {
    if args.at.is_none() && args.duration.is_none() {
        fail("Nothing to change: pass --at and/or --duration");
    }
    let start = args.at.as_deref().map(|s| {
        parse_start(s).unwrap_or_else(|e| {
            fail(format_args!("Invalid start '{s}': {e} (expected YYYY-MM-DD HH:MM)"))
        })
    });

    let mut calendar = open_calendar(cfg);
    let id = resolve_id(&calendar, &args.id).unwrap_or_else(|e| fail(e));
    if let Err(e) = calendar.update(&id, start, args.duration) {
        fail(format_args!("Failed to reschedule: {e}"));
    }

    if let Some(event) = calendar.get(&id) {
        println!(
            "Rescheduled: {} -> {} ({} min)",
            event.task_line,
            format_start(event.start_datetime),
            event.duration_minutes
        );
    }
}

pub fn unschedule(cfg: &ResolvedConfig, args: UnscheduleArgs) {
    let mut calendar = open_calendar(cfg);
    let id = resolve_id(&calendar, &args.id).unwrap_or_else(|e| fail(e));
    if let Err(e) = calendar.delete(&id) {
        fail(format_args!("Failed to unschedule: {e}"));
    }
    println!("Unscheduled: {id}");
}

/// Resolve a full id or a unique prefix of one.
fn resolve_id(calendar: &CalendarStore, input: &str) -> Result<EventId, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("event id is empty".to_string());
    }

    let mut matches = calendar.events().iter().filter(|e| e.id.as_str().starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(event), None) => Ok(event.id.clone()),
        (None, _) => Err(format!("event {input} not found")),
        (Some(_), Some(_)) => Err(format!("event id prefix '{input}' is ambiguous")),
    }
}
