//! Agenda command: one day of the calendar.

use chrono::{Local, NaiveDate};
use notetags_core::calendar::{CalendarEvent, parse_date};
use notetags_core::config::ResolvedConfig;
use tabled::{Table, Tabled, settings::Style};

use super::output::{EventOutput, print_json};
use super::{fail, open_calendar};
use crate::AgendaArgs;

/// Row for the agenda table.
#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Min")]
    duration: u32,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Line")]
    line: String,
}

impl From<&CalendarEvent> for EventRow {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            id: event.id.as_str().chars().take(8).collect(),
            time: format!(
                "{}-{}",
                event.start_datetime.format("%H:%M"),
                event.end().format("%H:%M")
            ),
            duration: event.duration_minutes,
            note: event.note_title.clone(),
            line: event.task_line.clone(),
        }
    }
}

pub fn run(cfg: &ResolvedConfig, args: AgendaArgs) {
    let date = match args.date.as_deref() {
        Some(s) => parse_date(s).unwrap_or_else(|e| {
            fail(format_args!("Invalid date '{s}': {e} (expected YYYY-MM-DD)"))
        }),
        None => Local::now().date_naive(),
    };

    let calendar = open_calendar(cfg);
    let events = calendar.query(date);

    if args.json {
        let out: Vec<EventOutput> = events.iter().map(|e| EventOutput::from(*e)).collect();
        print_json(&out);
        return;
    }
    print!("{}", render(date, &events));
}

fn render(date: NaiveDate, events: &[&CalendarEvent]) -> String {
    let heading = date.format("%A %Y-%m-%d");
    if events.is_empty() {
        return format!("{heading}\n(nothing scheduled)\n");
    }

    let rows: Vec<EventRow> = events.iter().map(|e| EventRow::from(*e)).collect();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    format!("{heading}\n{table}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use notetags_core::calendar::parse_start;

    #[test]
    fn test_render_empty_day() {
        let date = parse_date("2024-06-01").unwrap();
        assert_eq!(render(date, &[]), "Saturday 2024-06-01\n(nothing scheduled)\n");
    }

    #[test]
    fn test_row_shows_span_and_short_id() {
        let start = parse_start("2024-06-01 07:00").unwrap();
        let event = CalendarEvent::new("Gym", "[Work-out] legs", start, 45);
        let row = EventRow::from(&event);
        assert_eq!(row.time, "07:00-07:45");
        assert_eq!(row.id.len(), 8);
        assert!(event.id.as_str().starts_with(&row.id));

        let text = render(event.date(), &[&event]);
        assert!(text.contains("[Work-out] legs"));
        assert!(text.contains("07:00-07:45"));
    }
}
