//! Calendar event types.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Duration given to newly scheduled lines unless told otherwise.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// On-disk and user-facing datetime format, minute precision, 24-hour.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format of the date argument to per-day queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Content-derived event identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Digest of `"<note>-<line>-<YYYY-MM-DD HH:MM>"`, as lowercase hex MD5.
    pub fn derive(note_title: &str, task_line: &str, start: NaiveDateTime) -> Self {
        let seed = format!("{}-{}-{}", note_title, task_line, format_start(start));
        Self(format!("{:x}", md5::compute(seed.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A note line scheduled at a given minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub note_title: String,
    pub task_line: String,
    #[serde(with = "minute_format")]
    pub start_datetime: NaiveDateTime,
    pub duration_minutes: u32,
}

impl CalendarEvent {
    /// Build an event, truncating `start` to the minute and deriving its id.
    pub fn new(
        note_title: impl Into<String>,
        task_line: impl Into<String>,
        start: NaiveDateTime,
        duration_minutes: u32,
    ) -> Self {
        let note_title = note_title.into();
        let task_line = task_line.into();
        let start_datetime = truncate_to_minute(start);
        Self {
            id: EventId::derive(&note_title, &task_line, start_datetime),
            note_title,
            task_line,
            start_datetime,
            duration_minutes,
        }
    }

    /// Id an event for this line and start would get.
    pub fn id_for(note_title: &str, task_line: &str, start: NaiveDateTime) -> EventId {
        EventId::derive(note_title, task_line, truncate_to_minute(start))
    }

    pub fn date(&self) -> NaiveDate {
        self.start_datetime.date()
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start_datetime + Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Parse `YYYY-MM-DD HH:MM`.
pub fn parse_start(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

pub fn format_start(start: NaiveDateTime) -> String {
    start.format(DATETIME_FORMAT).to_string()
}

pub(crate) fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0).and_then(|d| d.with_nanosecond(0)).unwrap_or(dt)
}

mod minute_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_start(s).unwrap()
    }

    #[test]
    fn test_id_is_md5_of_identity_triple() {
        let id = EventId::derive("Trabajo", "[E:HA] enviar informe", at("2024-06-01 09:30"));
        let expected =
            format!("{:x}", md5::compute("Trabajo-[E:HA] enviar informe-2024-06-01 09:30"));
        assert_eq!(id.as_str(), expected);
        assert_eq!(id.as_str().len(), 32);
    }

    #[test]
    fn test_id_ignores_duration() {
        let a = CalendarEvent::new("N", "line", at("2024-06-01 09:30"), 15);
        let b = CalendarEvent::new("N", "line", at("2024-06-01 09:30"), 90);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_new_truncates_seconds() {
        let start = NaiveDateTime::parse_from_str("2024-06-01 09:30:45", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let event = CalendarEvent::new("N", "line", start, 60);
        assert_eq!(format_start(event.start_datetime), "2024-06-01 09:30");
        assert_eq!(event.id, EventId::derive("N", "line", at("2024-06-01 09:30")));
    }

    #[test]
    fn test_id_for_matches_new_event() {
        let event = CalendarEvent::new("N", "line", at("2024-06-01 09:30"), 60);
        assert_eq!(CalendarEvent::id_for("N", "line", at("2024-06-01 09:30")), event.id);
    }

    #[test]
    fn test_end_adds_duration() {
        let event = CalendarEvent::new("N", "line", at("2024-06-01 23:30"), 45);
        assert_eq!(event.end(), at("2024-06-02 00:15"));
        assert_eq!(event.date(), parse_date("2024-06-01").unwrap());
    }

    #[test]
    fn test_json_shape() {
        let event = CalendarEvent::new("Note", "task", at("2024-06-01 14:00"), 60);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["note_title"], "Note");
        assert_eq!(json["task_line"], "task");
        assert_eq!(json["start_datetime"], "2024-06-01 14:00");
        assert_eq!(json["duration_minutes"], 60);
        assert_eq!(json["id"], event.id.as_str());
    }

    #[test]
    fn test_rejects_bad_datetime_text() {
        assert!(parse_start("2024-06-01T14:00").is_err());
        assert!(parse_start("01/06/2024 14:00").is_err());
        let bad = r#"{"id":"x","note_title":"n","task_line":"t",
            "start_datetime":"soon","duration_minutes":5}"#;
        assert!(serde_json::from_str::<CalendarEvent>(bad).is_err());
    }
}
