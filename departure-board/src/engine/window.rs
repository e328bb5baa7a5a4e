//! Departure window construction.
//!
//! A query window is a pair of zero-padded `HHMMSS` bounds compared
//! lexicographically against stored departure text, plus the effective
//! calendar date for service-running checks. Three mutually exclusive
//! modes cover the day boundary:
//!
//! - **Late-night carryover** — shortly after midnight, look back at trips
//!   still numbered past 24:00:00 on the *previous* service day. Bounds
//!   use the hours-past-24 notation; the effective date is yesterday.
//! - **Next-day** — an overnight horizon reaching past midnight queries
//!   the following day's early departures from 00:00:00; the effective
//!   date is tomorrow.
//! - **Same-day** — the ordinary case: from one minute past "now" to the
//!   horizon, on today's date. The one-minute bump keeps a departure in
//!   the current minute from re-appearing as "upcoming" while the vehicle
//!   is already at the stop.

use crate::domain::{MalformedDate, Moment, ServiceDate};

/// Which of the three window shapes a query used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    LateNightCarryover,
    NextDay,
    SameDay,
}

/// A concrete query window: text bounds plus the effective service date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureWindow {
    mode: WindowMode,
    lower: String,
    upper: String,
    service_date: ServiceDate,
    anchor_secs: i64,
}

impl DepartureWindow {
    /// Build the window for `now`.
    ///
    /// Mode selection: `early_morning` forces the same-day shape;
    /// otherwise `now.hour <= look_ahead_hours` selects the carryover
    /// shape and anything later the next-day shape. With a small
    /// `now.hour + look_ahead_hours` the next-day upper bound goes
    /// negative and the window simply matches nothing; callers pick
    /// `early_morning` for daytime queries.
    pub fn for_moment(
        now: &Moment,
        look_ahead_hours: u32,
        early_morning: bool,
    ) -> Result<Self, MalformedDate> {
        let hour = i64::from(now.hour());
        let look_ahead = i64::from(look_ahead_hours);
        let (minute, second) = (now.minute(), now.second());

        if hour <= look_ahead && !early_morning {
            let lower_hour = hour + 24;
            Ok(Self {
                mode: WindowMode::LateNightCarryover,
                lower: format!("{:02}{:02}{:02}", lower_hour, minute + 1, second),
                upper: format!("{:02}{:02}{:02}", hour + look_ahead + 24, minute, second),
                service_date: now
                    .date()
                    .pred()
                    .ok_or_else(|| MalformedDate::new("no previous calendar day"))?,
                anchor_secs: lower_hour * 3600 + i64::from(minute + 1) * 60 + i64::from(second),
            })
        } else if !early_morning {
            Ok(Self {
                mode: WindowMode::NextDay,
                lower: "000000".to_owned(),
                upper: format!("{:02}{:02}{:02}", hour + look_ahead - 24, minute, second),
                service_date: now
                    .date()
                    .succ()
                    .ok_or_else(|| MalformedDate::new("no next calendar day"))?,
                anchor_secs: 0,
            })
        } else {
            Ok(Self {
                mode: WindowMode::SameDay,
                lower: format!("{:02}{:02}{:02}", hour, minute + 1, second),
                upper: format!("{:02}{:02}{:02}", hour + look_ahead, minute, second),
                service_date: now.date(),
                anchor_secs: hour * 3600 + i64::from(minute + 1) * 60 + i64::from(second),
            })
        }
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Lower bound, inclusive, in departure-text form.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Upper bound, inclusive, in departure-text form.
    pub fn upper(&self) -> &str {
        &self.upper
    }

    /// The calendar date service-running checks use for rows in this
    /// window (yesterday, tomorrow, or today depending on the mode).
    pub fn service_date(&self) -> ServiceDate {
        self.service_date
    }

    /// The lower bound in seconds, the anchor departures are sorted
    /// against.
    pub fn anchor_secs(&self) -> i64 {
        self.anchor_secs
    }
}
