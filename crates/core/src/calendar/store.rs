//! JSON-file backed collection of scheduled events.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::types::{CalendarEvent, EventId, truncate_to_minute};

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("this line is already scheduled for that date and time")]
    DuplicateEvent(EventId),

    #[error("event {0} not found")]
    NotFound(EventId),

    #[error("failed to read calendar {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write calendar {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize calendar: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, CalendarError>;

/// Scheduled note lines, persisted as one JSON array.
///
/// The whole file is rewritten after every mutation. Events are kept in
/// insertion order; per-day queries sort by start time.
#[derive(Debug)]
pub struct CalendarStore {
    path: PathBuf,
    events: Vec<CalendarEvent>,
}

impl CalendarStore {
    /// Load the calendar at `path`.
    ///
    /// A missing file is an empty calendar. So is a file that cannot be
    /// parsed: its contents are dropped with a warning and replaced on the
    /// next write.
    pub fn open(path: &Path) -> Result<Self> {
        let events = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Vec<CalendarEvent>>(&content) {
                Ok(events) => events,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "calendar file is corrupt, starting empty"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(CalendarError::Read { path: path.to_path_buf(), source });
            }
        };

        debug!(path = %path.display(), count = events.len(), "loaded calendar");
        Ok(Self { path: path.to_path_buf(), events })
    }

    /// Schedule `task_line` from `note_title` at `start`.
    ///
    /// Scheduling the same line of the same note at the same minute twice is
    /// rejected, whatever the duration.
    pub fn add(
        &mut self,
        note_title: &str,
        task_line: &str,
        start: NaiveDateTime,
        duration_minutes: u32,
    ) -> Result<EventId> {
        let event = CalendarEvent::new(note_title, task_line, start, duration_minutes);
        if self.position(&event.id).is_some() {
            return Err(CalendarError::DuplicateEvent(event.id));
        }

        let id = event.id.clone();
        self.events.push(event);
        if let Err(e) = self.save() {
            self.events.pop();
            return Err(e);
        }

        info!(%id, note = note_title, "scheduled line");
        Ok(id)
    }

    /// Events starting on `date`, earliest first.
    pub fn query(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut events: Vec<_> = self.events.iter().filter(|e| e.date() == date).collect();
        events.sort_by_key(|e| e.start_datetime);
        events
    }

    /// Change the start and/or duration of an event.
    ///
    /// The id is left as it was, even when the start moves: it keeps naming
    /// the slot the line was originally scheduled in.
    pub fn update(
        &mut self,
        id: &EventId,
        new_start: Option<NaiveDateTime>,
        new_duration: Option<u32>,
    ) -> Result<()> {
        let idx = self.position(id).ok_or_else(|| CalendarError::NotFound(id.clone()))?;

        let previous = self.events[idx].clone();
        let event = &mut self.events[idx];
        if let Some(start) = new_start {
            event.start_datetime = truncate_to_minute(start);
        }
        if let Some(duration) = new_duration {
            event.duration_minutes = duration;
        }

        if let Err(e) = self.save() {
            self.events[idx] = previous;
            return Err(e);
        }
        debug!(%id, "updated event");
        Ok(())
    }

    pub fn delete(&mut self, id: &EventId) -> Result<()> {
        let idx = self.position(id).ok_or_else(|| CalendarError::NotFound(id.clone()))?;

        let removed = self.events.remove(idx);
        if let Err(e) = self.save() {
            self.events.insert(idx, removed);
            return Err(e);
        }
        debug!(%id, "deleted event");
        Ok(())
    }

    pub fn get(&self, id: &EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn position(&self, id: &EventId) -> Option<usize> {
        self.events.iter().position(|e| &e.id == id)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| CalendarError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.events)?;
        fs::write(&self.path, json).map_err(|source| CalendarError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = self.events.len(), "saved calendar");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::types::{DEFAULT_DURATION_MINUTES, format_start, parse_date, parse_start};
    use tempfile::{TempDir, tempdir};

    fn at(s: &str) -> NaiveDateTime {
        parse_start(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn open() -> (TempDir, CalendarStore) {
        let tmp = tempdir().unwrap();
        let store = CalendarStore::open(&tmp.path().join("calendar_events.json")).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (_tmp, store) = open();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_persists() {
        let (_tmp, mut store) = open();
        let id = store.add("Trabajo", "[E:HA] informe", at("2024-06-01 09:30"), 60).unwrap();

        let reloaded = CalendarStore::open(store.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        let event = reloaded.get(&id).unwrap();
        assert_eq!(event.task_line, "[E:HA] informe");
        assert_eq!(event.duration_minutes, DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn test_duplicate_rejected_even_with_other_duration() {
        let (_tmp, mut store) = open();
        store.add("N", "line", at("2024-06-01 09:30"), 60).unwrap();

        let err = store.add("N", "line", at("2024-06-01 09:30"), 15).unwrap_err();
        assert!(matches!(err, CalendarError::DuplicateEvent(_)));
        assert_eq!(store.len(), 1);

        // A different minute is a different slot.
        store.add("N", "line", at("2024-06-01 09:31"), 60).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_query_filters_by_date_and_sorts() {
        let (_tmp, mut store) = open();
        store.add("N", "afternoon", at("2024-06-01 14:00"), 60).unwrap();
        store.add("N", "other day", at("2024-06-02 08:00"), 60).unwrap();
        store.add("N", "morning", at("2024-06-01 09:30"), 60).unwrap();

        let times: Vec<_> = store
            .query(day("2024-06-01"))
            .iter()
            .map(|e| format_start(e.start_datetime))
            .collect();
        assert_eq!(times, ["2024-06-01 09:30", "2024-06-01 14:00"]);
        assert!(store.query(day("2024-06-03")).is_empty());
    }

    #[test]
    fn test_update_moves_event_between_days_and_keeps_id() {
        let (_tmp, mut store) = open();
        let id = store.add("N", "line", at("2024-06-01 09:30"), 60).unwrap();

        store.update(&id, Some(at("2024-06-02 10:00")), None).unwrap();

        assert!(store.query(day("2024-06-01")).is_empty());
        let moved = store.query(day("2024-06-02"));
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, id);
        assert_ne!(moved[0].id, EventId::derive("N", "line", at("2024-06-02 10:00")));
        assert_eq!(moved[0].duration_minutes, 60);
    }

    #[test]
    fn test_stale_id_lets_a_fresh_add_take_the_new_slot() {
        let (_tmp, mut store) = open();
        let id = store.add("N", "line", at("2024-06-01 09:30"), 60).unwrap();
        store.update(&id, Some(at("2024-06-02 10:00")), None).unwrap();

        // The moved event still answers to its original slot, so adding the
        // line at the new time is not treated as a duplicate.
        store.add("N", "line", at("2024-06-02 10:00"), 60).unwrap();
        assert_eq!(store.query(day("2024-06-02")).len(), 2);
        assert!(matches!(
            store.add("N", "line", at("2024-06-01 09:30"), 60),
            Err(CalendarError::DuplicateEvent(_))
        ));
    }

    #[test]
    fn test_update_duration_only() {
        let (_tmp, mut store) = open();
        let id = store.add("N", "line", at("2024-06-01 09:30"), 60).unwrap();
        store.update(&id, None, Some(25)).unwrap();

        let reloaded = CalendarStore::open(store.path()).unwrap();
        let event = reloaded.get(&id).unwrap();
        assert_eq!(event.duration_minutes, 25);
        assert_eq!(event.start_datetime, at("2024-06-01 09:30"));
    }

    #[test]
    fn test_update_missing_event() {
        let (_tmp, mut store) = open();
        let err = store.update(&EventId::from("nope"), None, Some(5)).unwrap_err();
        assert!(matches!(err, CalendarError::NotFound(_)));
    }

    #[test]
    fn test_delete() {
        let (_tmp, mut store) = open();
        let keep = store.add("N", "keep", at("2024-06-01 09:30"), 60).unwrap();
        let gone = store.add("N", "gone", at("2024-06-01 10:30"), 60).unwrap();

        store.delete(&gone).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(&keep).is_some());

        let reloaded = CalendarStore::open(store.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_delete_missing_leaves_collection_unchanged() {
        let (_tmp, mut store) = open();
        store.add("N", "line", at("2024-06-01 09:30"), 60).unwrap();

        let err = store.delete(&EventId::from("missing")).unwrap_err();
        assert!(matches!(err, CalendarError::NotFound(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("calendar_events.json");
        fs::write(&path, "[{not json").unwrap();

        let mut store = CalendarStore::open(&path).unwrap();
        assert!(store.is_empty());

        store.add("N", "line", at("2024-06-01 09:30"), 60).unwrap();
        assert_eq!(CalendarStore::open(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_reads_file_written_by_hand() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("calendar_events.json");
        fs::write(
            &path,
            r#"[
    {
        "id": "abc",
        "note_title": "Gym",
        "task_line": "[Work-out] legs",
        "start_datetime": "2024-06-01 07:00",
        "duration_minutes": 45
    }
]"#,
        )
        .unwrap();

        let store = CalendarStore::open(&path).unwrap();
        let event = store.get(&EventId::from("abc")).unwrap();
        assert_eq!(event.note_title, "Gym");
        assert_eq!(event.end(), at("2024-06-01 07:45"));
    }
}
