//! Scheduling of note lines.
//!
//! Each event points at one line of one note and a start minute. Its id is an
//! MD5 digest of that triple, which is what makes duplicate scheduling
//! detectable.

mod store;
mod types;

pub use store::{CalendarError, CalendarStore};
pub use types::{
    CalendarEvent, DATE_FORMAT, DATETIME_FORMAT, DEFAULT_DURATION_MINUTES, EventId,
    format_start, parse_date, parse_start,
};
