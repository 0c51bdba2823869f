//! Core library for notetags.
//!
//! Notes are plain markdown files whose lines may start with bracketed tags:
//! role tags (`[Programador]`), an Eisenhower quadrant (`[E:HA]`) and a task
//! type (`[T:TAREA]`). This crate parses those tags, filters notes by them and
//! keeps a small calendar of scheduled note lines.

pub mod calendar;
pub mod classify;
pub mod config;
pub mod filter;
pub mod grammar;
pub mod notes;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
