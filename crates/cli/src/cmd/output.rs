//! Shared output formatting for note views and the calendar.

use notetags_core::calendar::{CalendarEvent, format_start};
use notetags_core::classify::{strip_tags, tag_prefix_len};
use notetags_core::filter::DisplayLine;
use notetags_core::grammar::TagGrammar;
use serde::Serialize;

/// Classified line for JSON output.
#[derive(Debug, Serialize)]
pub struct LineOutput {
    pub tag: String,
    pub kind: &'static str,
    pub text: String,
    /// The text without its leading tags.
    pub body: String,
}

impl LineOutput {
    pub fn new(line: &DisplayLine, grammar: &TagGrammar) -> Self {
        Self {
            tag: line.display_tag(),
            kind: line.tag.kind().as_str(),
            text: line.text.clone(),
            body: strip_tags(&line.text, grammar).to_string(),
        }
    }
}

/// Calendar event for JSON output.
#[derive(Debug, Serialize)]
pub struct EventOutput {
    pub id: String,
    pub note_title: String,
    pub task_line: String,
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
}

impl From<&CalendarEvent> for EventOutput {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            id: event.id.to_string(),
            note_title: event.note_title.clone(),
            task_line: event.task_line.clone(),
            start: format_start(event.start_datetime),
            end: format_start(event.end()),
            duration_minutes: event.duration_minutes,
        }
    }
}

/// Format lines as `DISPLAY_TAG  [tags]  body`, columns padded to a common width.
///
/// With `numbered`, each row starts with its 1-based position and blank lines
/// are kept as bare numbers.
pub fn format_lines(lines: &[DisplayLine], grammar: &TagGrammar, numbered: bool) -> String {
    let rows: Vec<Option<(String, &str, &str)>> = lines
        .iter()
        .map(|line| {
            let text = line.text.trim_end();
            if text.trim().is_empty() {
                return None;
            }
            let (tags, body) = text.split_at(tag_prefix_len(text, grammar));
            Some((line.display_tag(), tags.trim(), body.trim_start()))
        })
        .collect();

    let width = |column: fn(&(String, &str, &str)) -> usize| {
        rows.iter().flatten().map(column).max().unwrap_or(0)
    };
    let tag_width = width(|r| r.0.chars().count());
    let tags_width = width(|r| r.1.chars().count());

    let mut out = String::new();
    for (idx, row) in rows.iter().enumerate() {
        let mut cells = Vec::new();
        if numbered {
            cells.push(format!("{:>4}", idx + 1));
        }
        if let Some((tag, tags, body)) = row {
            cells.push(format!("{tag:<tag_width$}"));
            if tags_width > 0 {
                cells.push(format!("{tags:<tags_width$}"));
            }
            cells.push(body.to_string());
        }
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => super::fail(format_args!("Failed to serialize output: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notetags_core::classify::Classification;
    use notetags_core::grammar::EisenhowerCategory;

    fn grammar() -> TagGrammar {
        TagGrammar::new(["Trabajo"]).unwrap()
    }

    #[test]
    fn test_format_lines_numbered() {
        let hacer_ahora = Classification::Eisenhower(EisenhowerCategory::HacerAhora);
        let lines = vec![
            DisplayLine::new("# Week", Classification::GeneralText),
            DisplayLine::new("", Classification::GeneralText),
            DisplayLine::new("[E:HA] ship", hacer_ahora),
        ];

        let expected = concat!(
            "   1  general_text                    # Week\n",
            "   2\n",
            "   3  EISENHOWER_HACER_AHORA  [E:HA]  ship\n",
        );
        assert_eq!(format_lines(&lines, &grammar(), true), expected);
    }

    #[test]
    fn test_format_lines_splits_tags_from_body() {
        let lines = vec![
            DisplayLine::new("[Trabajo][E:P] a", Classification::Role("Trabajo".into())),
            DisplayLine::new("b", Classification::GeneralText),
        ];
        assert_eq!(
            format_lines(&lines, &grammar(), false),
            "Trabajo       [Trabajo][E:P]  a\ngeneral_text                  b\n"
        );
    }

    #[test]
    fn test_format_lines_without_tags_has_no_empty_column() {
        let lines = vec![DisplayLine::new("plain", Classification::GeneralText)];
        assert_eq!(format_lines(&lines, &grammar(), false), "general_text  plain\n");
    }

    #[test]
    fn test_line_output_carries_kind_and_body() {
        let line = DisplayLine::new("[Trabajo] a", Classification::Role("Trabajo".into()));
        let json = serde_json::to_value(LineOutput::new(&line, &grammar())).unwrap();
        assert_eq!(json["kind"], "role");
        assert_eq!(json["tag"], "Trabajo");
        assert_eq!(json["text"], "[Trabajo] a");
        assert_eq!(json["body"], "a");
    }
}
