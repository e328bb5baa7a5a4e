//! Read-only access to a GTFS dataset snapshot.
//!
//! The core never owns dataset files; the host hands it an opened store and
//! closes it on dataset switch. [`TransitStore`] is the full contract the
//! resolver and query engine need; [`SqliteStore`] implements it against the
//! usual SQLite import of a feed, and [`MockStore`] backs tests.

mod error;
mod mock;
mod sqlite;
mod types;

pub use error::StoreError;
pub use mock::MockStore;
pub use sqlite::SqliteStore;
pub use types::{
    CalendarException, ExceptionType, InvalidExceptionType, ScheduleRow, ServiceCalendarEntry,
    StopTimeRow, TripDisplayInfo,
};

use crate::domain::{ServiceDate, ServiceId, StopId, TripId};

/// Read-only contract over the relational tables the core queries.
///
/// Implementations are synchronous: each call blocks until the storage
/// layer answers, and no call carries a timeout of its own. Long-running
/// work built on top of a store is cancelled between calls, never inside
/// one.
pub trait TransitStore {
    /// The service pattern a trip is bound to (`trips.service_id`).
    ///
    /// `Ok(None)` means the trip does not exist — callers treat that as
    /// dataset corruption, not as "no service".
    fn service_for_trip(&self, trip: &TripId) -> Result<Option<ServiceId>, StoreError>;

    /// The weekly calendar row for a service, if one exists. Services that
    /// live only in `calendar_dates` have none.
    fn calendar_entry(&self, service: &ServiceId) -> Result<Option<ServiceCalendarEntry>, StoreError>;

    /// The calendar exception for (service, date), if any. At most one per
    /// pair is expected; extras are ignored.
    fn exception_on(
        &self,
        service: &ServiceId,
        date: ServiceDate,
    ) -> Result<Option<CalendarException>, StoreError>;

    /// Distinct departure rows at the given stops whose stored departure
    /// text falls within `[lower, upper]`.
    ///
    /// Bounds are zero-padded `HHMMSS` strings in the same hour-overflow
    /// convention the table uses, so plain lexicographic comparison is the
    /// correct containment test. Rows come back ordered by departure text.
    fn departures_in_window(
        &self,
        stops: &[StopId],
        lower: &str,
        upper: &str,
    ) -> Result<Vec<StopTimeRow>, StoreError>;

    /// Route/trip display fields for one trip (`routes` joined via `trips`).
    /// Fetched lazily, only for rows that survive filtering.
    fn trip_display(&self, trip: &TripId) -> Result<Option<TripDisplayInfo>, StoreError>;

    /// Every distinct departure at a stop with its display fields, ordered
    /// by departure text. Backs the full schedule listing; trips without a
    /// `trips`/`routes` join row do not appear.
    fn schedule_for_stop(&self, stop: &StopId) -> Result<Vec<ScheduleRow>, StoreError>;
}
