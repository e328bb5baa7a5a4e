//! In-memory transit store for tests.
//!
//! Built row by row with a small builder API, mirroring the shape of the
//! SQLite tables. Counts every query so tests can assert cache behavior,
//! and can be flipped to "unavailable" to exercise store-failure paths.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::domain::{ServiceDate, ServiceId, ServiceTime, StopId, TripId, WeekdayPattern};

use super::error::StoreError;
use super::types::{
    CalendarException, ScheduleRow, ServiceCalendarEntry, StopTimeRow, TripDisplayInfo,
};
use super::TransitStore;

/// In-memory [`TransitStore`] with a query counter.
#[derive(Default)]
pub struct MockStore {
    trips: HashMap<TripId, ServiceId>,
    calendars: HashMap<ServiceId, ServiceCalendarEntry>,
    exceptions: HashMap<(ServiceId, ServiceDate), i64>,
    stop_times: Vec<(StopId, String, TripId)>,
    displays: HashMap<TripId, TripDisplayInfo>,
    unavailable: bool,
    queries: Mutex<usize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a trip to a service pattern (`trips` row).
    pub fn with_trip(mut self, trip: &str, service: &str) -> Self {
        self.trips
            .insert(TripId::new(trip), ServiceId::new(service));
        self
    }

    /// Add a `calendar` row.
    pub fn with_calendar(
        mut self,
        service: &str,
        start: &str,
        end: &str,
        weekdays: WeekdayPattern,
    ) -> Self {
        let service_id = ServiceId::new(service);
        self.calendars.insert(
            service_id.clone(),
            ServiceCalendarEntry {
                service_id,
                start_date: ServiceDate::parse_compact(start).expect("valid YYYYMMDD start date"),
                end_date: ServiceDate::parse_compact(end).expect("valid YYYYMMDD end date"),
                weekdays,
            },
        );
        self
    }

    /// Add a `calendar_dates` row with a raw exception code.
    pub fn with_exception(mut self, service: &str, date: &str, code: i64) -> Self {
        self.exceptions.insert(
            (
                ServiceId::new(service),
                ServiceDate::parse_compact(date).expect("valid YYYYMMDD exception date"),
            ),
            code,
        );
        self
    }

    /// Add a `stop_times` row; the departure stays as raw text so tests can
    /// seed malformed values.
    pub fn with_stop_time(mut self, stop: &str, departure: &str, trip: &str) -> Self {
        self.stop_times
            .push((StopId::new(stop), departure.to_owned(), TripId::new(trip)));
        self
    }

    /// Add route/trip display fields for a trip.
    pub fn with_display(mut self, trip: &str, long_name: &str, short_name: &str, headsign: &str) -> Self {
        self.displays.insert(
            TripId::new(trip),
            TripDisplayInfo {
                route_long_name: long_name.to_owned(),
                route_short_name: short_name.to_owned(),
                trip_headsign: headsign.to_owned(),
            },
        );
        self
    }

    /// Make every subsequent query fail with [`StoreError::Unavailable`].
    pub fn with_unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Number of store queries issued so far.
    pub fn query_count(&self) -> usize {
        *self
            .queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_query(&self) -> Result<(), StoreError> {
        *self
            .queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;
        if self.unavailable {
            return Err(StoreError::Unavailable("mock store offline".into()));
        }
        Ok(())
    }
}

impl TransitStore for MockStore {
    fn service_for_trip(&self, trip: &TripId) -> Result<Option<ServiceId>, StoreError> {
        self.record_query()?;
        Ok(self.trips.get(trip).cloned())
    }

    fn calendar_entry(
        &self,
        service: &ServiceId,
    ) -> Result<Option<ServiceCalendarEntry>, StoreError> {
        self.record_query()?;
        Ok(self.calendars.get(service).cloned())
    }

    fn exception_on(
        &self,
        service: &ServiceId,
        date: ServiceDate,
    ) -> Result<Option<CalendarException>, StoreError> {
        self.record_query()?;
        Ok(self
            .exceptions
            .get(&(service.clone(), date))
            .map(|&code| CalendarException {
                service_id: service.clone(),
                date,
                code,
            }))
    }

    fn departures_in_window(
        &self,
        stops: &[StopId],
        lower: &str,
        upper: &str,
    ) -> Result<Vec<StopTimeRow>, StoreError> {
        self.record_query()?;

        let mut matches: Vec<&(StopId, String, TripId)> = self
            .stop_times
            .iter()
            .filter(|(stop, departure, _)| {
                stops.contains(stop) && departure.as_str() >= lower && departure.as_str() <= upper
            })
            .collect();

        // select distinct ... order by departure_time
        matches.sort_by(|a, b| (&a.1, &a.2, &a.0).cmp(&(&b.1, &b.2, &b.0)));
        matches.dedup();

        let mut rows = Vec::new();
        for (stop, departure, trip) in matches {
            match ServiceTime::parse_hhmmss(departure) {
                Ok(time) => rows.push(StopTimeRow {
                    trip_id: trip.clone(),
                    departure: time,
                    stop_id: stop.clone(),
                }),
                Err(err) => warn!(
                    %err,
                    %trip,
                    %departure,
                    "dropping stop_times row with malformed departure time"
                ),
            }
        }
        Ok(rows)
    }

    fn trip_display(&self, trip: &TripId) -> Result<Option<TripDisplayInfo>, StoreError> {
        self.record_query()?;
        Ok(self.displays.get(trip).cloned())
    }

    fn schedule_for_stop(&self, stop: &StopId) -> Result<Vec<ScheduleRow>, StoreError> {
        self.record_query()?;

        let mut matches: Vec<(&String, &TripId, &TripDisplayInfo)> = self
            .stop_times
            .iter()
            .filter(|(row_stop, _, _)| row_stop == stop)
            .filter_map(|(_, departure, trip)| {
                // join semantics: rows without display info drop out
                self.displays.get(trip).map(|display| (departure, trip, display))
            })
            .collect();

        matches.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        matches.dedup();

        let mut rows = Vec::new();
        for (departure, trip, display) in matches {
            match ServiceTime::parse_hhmmss(departure) {
                Ok(time) => rows.push(ScheduleRow {
                    departure: time,
                    trip_id: trip.clone(),
                    route_short_name: display.route_short_name.clone(),
                    trip_headsign: display.trip_headsign.clone(),
                }),
                Err(err) => warn!(
                    %err,
                    %trip,
                    %departure,
                    "dropping schedule row with malformed departure time"
                ),
            }
        }
        Ok(rows)
    }
}
