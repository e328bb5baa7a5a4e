//! Offline next-departure resolution for GTFS transit datasets.
//!
//! Answers: "which buses leave this stop (or these stops) soon?" against a
//! read-only relational snapshot of a GTFS feed, honouring weekly service
//! patterns, calendar exceptions, and the hour-overflow notation GTFS uses
//! for trips that run past midnight.

pub mod calendar;
pub mod domain;
pub mod engine;
pub mod store;
pub mod task;
