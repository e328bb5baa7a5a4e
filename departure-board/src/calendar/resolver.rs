//! Trip/date → operating-days resolution.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{ServiceDate, ServiceId, TripId};
use crate::store::{ExceptionType, ServiceCalendarEntry, StoreError, TransitStore};

use super::cache::CalendarCache;

/// Operating-days marker for services that exist only as added exception
/// dates, with no weekly calendar row to take a pattern string from.
pub const HOLIDAY_SCHEDULE: &str = "Special Schedule (Holiday)";

/// Errors from calendar resolution.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// `stop_times` references a trip with no `trips` row. Dataset
    /// corruption — deliberately distinct from a "does not run" verdict.
    #[error("trip {0} has no service binding (dataset corrupt?)")]
    UnknownTrip(TripId),

    /// The underlying store failed; aborts the surrounding operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves whether a trip runs on a date, and on which weekdays.
///
/// One resolver serves one opened dataset. Verdicts and trip bindings are
/// memoized without expiry; switching datasets means dropping the resolver
/// and building a fresh one, caches included.
pub struct CalendarResolver<S> {
    store: Arc<S>,
    cache: CalendarCache,
}

impl<S: TransitStore> CalendarResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            cache: CalendarCache::new(),
        }
    }

    /// The days a trip's service operates, or `None` when it does not run.
    ///
    /// With `limit_to_weekday` set, the verdict is for `date` specifically:
    /// exception overrides are applied first, then the validity range and
    /// weekly pattern. Unset, the answer is the informational full-week
    /// pattern, regardless of `date` and its exceptions.
    ///
    /// The two modes are memoized in separate spaces keyed by the trip's
    /// service and `date`; repeated calls answer from cache without
    /// touching the store.
    pub fn resolve_operating_days(
        &self,
        trip: &TripId,
        date: ServiceDate,
        limit_to_weekday: bool,
    ) -> Result<Option<String>, CalendarError> {
        let service = self.service_binding(trip)?;

        if let Some(verdict) = self.cache.verdict(limit_to_weekday, &service, date) {
            debug!(%service, %date, limit_to_weekday, "calendar verdict from cache");
            return Ok(verdict.map(|days| days.to_string()));
        }

        let entry = self.store.calendar_entry(&service)?;
        let mut days = match entry {
            Some(entry) => self.base_days(&entry, date, limit_to_weekday)?,
            None => None,
        };

        // Some services live only in calendar_dates, with no calendar row
        // (or the date falls outside the row's validity range). An added
        // exception still makes the trip run that day.
        if days.is_none()
            && self.checked_exception(&service, date)? == Some(ExceptionType::Added)
        {
            days = Some(HOLIDAY_SCHEDULE.to_owned());
        }

        self.cache.store_verdict(
            limit_to_weekday,
            &service,
            date,
            days.as_deref().map(Arc::from),
        );
        Ok(days)
    }

    /// Verdict from the weekly calendar row.
    fn base_days(
        &self,
        entry: &ServiceCalendarEntry,
        date: ServiceDate,
        limit_to_weekday: bool,
    ) -> Result<Option<String>, CalendarError> {
        // The informational pattern ignores the validity range and any
        // date-specific exceptions.
        if !limit_to_weekday {
            return Ok(Some(entry.weekdays.days_string()));
        }

        // Outside the validity range the row says nothing about this date;
        // the exception-only fallback still gets its chance.
        if !entry.in_range(date) {
            return Ok(None);
        }

        match self.checked_exception(&entry.service_id, date)? {
            Some(ExceptionType::Removed) => return Ok(None),
            Some(ExceptionType::Added) => return Ok(Some(entry.weekdays.days_string())),
            None => {}
        }

        if entry.weekdays.runs_on(date.weekday()) {
            Ok(Some(entry.weekdays.days_string()))
        } else {
            Ok(None)
        }
    }

    /// The exception for (service, date), with unknown codes reported and
    /// treated as no override.
    fn checked_exception(
        &self,
        service: &ServiceId,
        date: ServiceDate,
    ) -> Result<Option<ExceptionType>, CalendarError> {
        let Some(exception) = self.store.exception_on(service, date)? else {
            return Ok(None);
        };
        match exception.exception_type() {
            Ok(kind) => Ok(Some(kind)),
            Err(err) => {
                error!(%err, %date, "ignoring calendar exception with unknown type");
                Ok(None)
            }
        }
    }

    /// Trip → service via the binding cache; one store query per trip per
    /// resolver lifetime.
    fn service_binding(&self, trip: &TripId) -> Result<ServiceId, CalendarError> {
        if let Some(service) = self.cache.service_for_trip(trip) {
            return Ok(service);
        }

        let Some(service) = self.store.service_for_trip(trip)? else {
            return Err(CalendarError::UnknownTrip(trip.clone()));
        };
        self.cache.store_trip_service(trip, &service);
        Ok(service)
    }
}
