//! Service dates in the GTFS 8-digit form.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

/// Error returned when parsing an invalid service date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed service date: {reason}")]
pub struct MalformedDate {
    reason: &'static str,
}

impl MalformedDate {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A calendar date carried in the GTFS `YYYYMMDD` convention.
///
/// Used for `calendar` validity ranges, `calendar_dates` exceptions, and
/// the effective date of a departure query. Ordering is chronological.
///
/// # Examples
///
/// ```
/// use departure_board::domain::ServiceDate;
///
/// let date = ServiceDate::parse_compact("20250704").unwrap();
/// assert_eq!(date.compact(), "20250704");
/// assert_eq!(date.weekday(), chrono::Weekday::Fri);
///
/// assert!(ServiceDate::parse_compact("2025-07-04").is_err());
/// assert!(ServiceDate::parse_compact("20250231").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceDate(NaiveDate);

impl ServiceDate {
    /// Wrap an already-validated calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a date from year/month/day components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse an 8-digit `YYYYMMDD` string.
    pub fn parse_compact(s: &str) -> Result<Self, MalformedDate> {
        let bytes = s.as_bytes();
        if bytes.len() != 8 {
            return Err(MalformedDate::new("expected 8 digits (YYYYMMDD)"));
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(MalformedDate::new("expected only ASCII digits"));
        }

        // Slicing is safe: all-ASCII input.
        let year: i32 = s[0..4]
            .parse()
            .map_err(|_| MalformedDate::new("invalid year"))?;
        let month: u32 = s[4..6]
            .parse()
            .map_err(|_| MalformedDate::new("invalid month"))?;
        let day: u32 = s[6..8]
            .parse()
            .map_err(|_| MalformedDate::new("invalid day"))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| MalformedDate::new("no such calendar date"))
    }

    /// Render back to the 8-digit `YYYYMMDD` form.
    pub fn compact(&self) -> String {
        format!(
            "{:04}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }

    /// Day of the week this date falls on.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The previous calendar day, if representable.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The next calendar day, if representable.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Debug for ServiceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceDate({})", self.compact())
    }
}

impl fmt::Display for ServiceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact())
    }
}
