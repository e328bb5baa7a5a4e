//! Schedule times in the GTFS hour-overflow convention.
//!
//! `stop_times.departure_time` stores zero-padded `HHMMSS` where the hour
//! may exceed 23: a trip that left at 23:50 and reaches its last stop at
//! 01:05 records that stop as `250500`, so it still sorts after the same
//! service day's evening departures. The overflow form is kept as-is for
//! storage and range comparison; anything user-facing normalizes first.

use std::fmt;

/// Error returned when parsing an invalid schedule time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed schedule time: {reason}")]
pub struct MalformedTime {
    reason: &'static str,
}

impl MalformedTime {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    pub(crate) fn wall_clock_hour() -> Self {
        Self::new("wall-clock hour must be 0-23")
    }
}

/// A time of day in the hour-overflow convention (hour 0–99).
///
/// # Examples
///
/// ```
/// use departure_board::domain::ServiceTime;
///
/// let evening = ServiceTime::parse_hhmmss("235900").unwrap();
/// assert_eq!(evening.hour(), 23);
///
/// // Post-midnight trip, numbered on the previous service day.
/// let late = ServiceTime::parse_hhmmss("250500").unwrap();
/// assert_eq!(late.hour(), 25);
/// assert_eq!(late.to_string(), "250500");
/// assert_eq!(late.clock_display(false), "1:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceTime {
    hour: u32,
    minute: u32,
    second: u32,
}

impl ServiceTime {
    /// Build a time from components. The hour may exceed 23 but must fit
    /// the two-digit wire form.
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, MalformedTime> {
        if hour > 99 {
            return Err(MalformedTime::new("hour must fit two digits"));
        }
        if minute > 59 {
            return Err(MalformedTime::new("minute must be 0-59"));
        }
        if second > 59 {
            return Err(MalformedTime::new("second must be 0-59"));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Parse a zero-padded `HHMMSS` string. The hour may be 24 or more.
    pub fn parse_hhmmss(s: &str) -> Result<Self, MalformedTime> {
        let bytes = s.as_bytes();
        if bytes.len() != 6 {
            return Err(MalformedTime::new("expected HHMMSS format"));
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(MalformedTime::new("expected only ASCII digits"));
        }

        let field = |i: usize| -> u32 {
            (bytes[i] - b'0') as u32 * 10 + (bytes[i + 1] - b'0') as u32
        };
        Self::new(field(0), field(2), field(4))
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

    /// Seconds since midnight of the owning service day, without
    /// normalizing overflow hours.
    pub fn seconds_from_midnight(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }

    /// Seconds from `anchor_secs` to this time, wrapping negative
    /// differences forward by 24 hours.
    ///
    /// This is the chronological sort key for departures: anchored at the
    /// window's lower bound, a `000500` departure queried shortly before
    /// midnight lands *after* `235900`, never before it.
    pub fn seconds_after(&self, anchor_secs: i64) -> i64 {
        let mut delta = i64::from(self.seconds_from_midnight()) - anchor_secs;
        if delta < 0 {
            delta += 24 * 3600;
        }
        delta
    }

    /// Render for display, dropping seconds and normalizing the hour into
    /// [0,24). 24-hour form is `H:MM`; 12-hour form appends ` am`/` pm`,
    /// with noon and later rendered as pm and hour 0 as `0:MM am`.
    pub fn clock_display(&self, twelve_hour: bool) -> String {
        let mut hour = self.hour;
        while hour >= 24 {
            hour -= 24;
        }

        if !twelve_hour {
            return format!("{}:{:02}", hour, self.minute);
        }

        if hour > 12 {
            format!("{}:{:02} pm", hour - 12, self.minute)
        } else if hour == 12 {
            format!("12:{:02} pm", self.minute)
        } else {
            format!("{}:{:02} am", hour, self.minute)
        }
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServiceTime({:02}{:02}{:02})",
            self.hour, self.minute, self.second
        )
    }
}

impl fmt::Display for ServiceTime {
    /// Renders the zero-padded `HHMMSS` wire form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{:02}{:02}",
            self.hour, self.minute, self.second
        )
    }
}
