//! The departure query engine.
//!
//! Turns "now, these stops" into a bounded, chronologically ordered list
//! of upcoming departures: builds the time window, retrieves raw rows,
//! filters them through the calendar resolver, merges and sorts with
//! wraparound awareness, then joins in display metadata and formats the
//! rider-facing strings.

mod config;
mod format;
mod query;
mod window;

pub use config::BoardConfig;
pub use format::{countdown, formatted_clock_time};
pub use query::{Departure, DepartureQueryEngine, QueryError, ScheduleEntry};
pub use window::{DepartureWindow, WindowMode};
