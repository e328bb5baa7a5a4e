//! The "now" snapshot a departure query is anchored to.

use chrono::{NaiveDateTime, Timelike, Weekday};

use super::{MalformedTime, ServiceDate};

/// A point in time: calendar date plus wall-clock time of day.
///
/// Queries never read the system clock themselves; the caller captures one
/// `Moment` and every window bound, calendar check, and countdown in that
/// query is derived from it. Unlike [`super::ServiceTime`], the hour here
/// is a real wall-clock hour and never exceeds 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    date: ServiceDate,
    hour: u32,
    minute: u32,
    second: u32,
}

impl Moment {
    /// Build a moment from a date and wall-clock components.
    pub fn new(date: ServiceDate, hour: u32, minute: u32, second: u32) -> Result<Self, MalformedTime> {
        if hour > 23 {
            return Err(MalformedTime::wall_clock_hour());
        }
        // Reuse the component validation; hour 0-23 always fits.
        let time = super::ServiceTime::new(hour, minute, second)?;
        Ok(Self {
            date,
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
        })
    }

    /// Capture a moment from a host-supplied local datetime.
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            date: ServiceDate::new(dt.date()),
            hour: dt.time().hour(),
            minute: dt.time().minute(),
            second: dt.time().second(),
        }
    }

    pub fn date(&self) -> ServiceDate {
        self.date
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    /// Day of the week, derived from the date.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}
