//! Typed row records for store query results.
//!
//! Each query result gets its own record with named fields; nothing in the
//! core shuttles heterogeneous string tuples around.

use crate::domain::{ServiceDate, ServiceId, ServiceTime, StopId, TripId, WeekdayPattern};

/// One row of the `calendar` table: a service pattern with its validity
/// range and weekly flags. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCalendarEntry {
    pub service_id: ServiceId,
    pub start_date: ServiceDate,
    pub end_date: ServiceDate,
    pub weekdays: WeekdayPattern,
}

impl ServiceCalendarEntry {
    /// Whether `date` falls inside the validity range (inclusive).
    pub fn in_range(&self, date: ServiceDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// GTFS calendar exception codes: 1 adds service on a date, 2 removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Added,
    Removed,
}

/// Error for an exception code outside {1, 2}.
///
/// Invalid codes are reported, never crash a query, and never grant an
/// override.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid calendar exception type {code} for service {service}")]
pub struct InvalidExceptionType {
    pub code: i64,
    pub service: ServiceId,
}

/// One row of `calendar_dates`: a date-specific service override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarException {
    pub service_id: ServiceId,
    pub date: ServiceDate,
    /// Raw exception code as stored; validated via [`Self::exception_type`].
    pub code: i64,
}

impl CalendarException {
    /// Classify the raw code, surfacing unknown codes as errors.
    pub fn exception_type(&self) -> Result<ExceptionType, InvalidExceptionType> {
        match self.code {
            1 => Ok(ExceptionType::Added),
            2 => Ok(ExceptionType::Removed),
            code => Err(InvalidExceptionType {
                code,
                service: self.service_id.clone(),
            }),
        }
    }
}

/// One raw departure event from `stop_times`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTimeRow {
    pub trip_id: TripId,
    pub departure: ServiceTime,
    pub stop_id: StopId,
}

/// One row of the full schedule listing for a stop: `stop_times` joined
/// with `trips` and `routes`, ordered by departure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub departure: ServiceTime,
    pub trip_id: TripId,
    pub route_short_name: String,
    pub trip_headsign: String,
}

/// Display fields joined from `routes` and `trips` for one trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripDisplayInfo {
    pub route_long_name: String,
    pub route_short_name: String,
    pub trip_headsign: String,
}

impl TripDisplayInfo {
    /// The destination text shown to riders: the headsign when present,
    /// otherwise the route's long name.
    pub fn destination(&self) -> &str {
        if self.trip_headsign.is_empty() {
            &self.route_long_name
        } else {
            &self.trip_headsign
        }
    }
}
