//! SQLite-backed transit store.
//!
//! Queries the conventional SQLite import of a GTFS feed. The connection
//! is opened read-only; datasets are immutable for the lifetime of a
//! session and a new store is opened on dataset switch.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OpenFlags, OptionalExtension, params, params_from_iter};
use tracing::warn;

use crate::domain::{ServiceDate, ServiceId, ServiceTime, StopId, TripId, WeekdayPattern};

use super::error::StoreError;
use super::types::{
    CalendarException, ScheduleRow, ServiceCalendarEntry, StopTimeRow, TripDisplayInfo,
};
use super::TransitStore;

/// Read-only store over a GTFS SQLite dataset.
///
/// The connection sits behind a mutex so the store can be shared with a
/// background query task; invocations are serialized by contract, so the
/// lock is uncontended in practice.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a dataset file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an existing connection (in-memory datasets, tests).
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }
}

impl TransitStore for SqliteStore {
    fn service_for_trip(&self, trip: &TripId) -> Result<Option<ServiceId>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached("select service_id from trips where trip_id = ?1")?;
        let service = stmt
            .query_row(params![trip.as_str()], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(service.map(ServiceId::from))
    }

    fn calendar_entry(
        &self,
        service: &ServiceId,
    ) -> Result<Option<ServiceCalendarEntry>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "select start_date, end_date, \
             sunday, monday, tuesday, wednesday, thursday, friday, saturday \
             from calendar where service_id = ?1",
        )?;
        let raw = stmt
            .query_row(params![service.as_str()], |row| {
                let start: String = row.get(0)?;
                let end: String = row.get(1)?;
                let mut flags = [false; 7];
                for (i, flag) in flags.iter_mut().enumerate() {
                    *flag = row.get::<_, i64>(i + 2)? != 0;
                }
                Ok((start, end, flags))
            })
            .optional()?;

        let Some((start, end, [sun, mon, tue, wed, thu, fri, sat])) = raw else {
            return Ok(None);
        };

        let (Ok(start_date), Ok(end_date)) = (
            ServiceDate::parse_compact(&start),
            ServiceDate::parse_compact(&end),
        ) else {
            warn!(
                service = %service,
                %start,
                %end,
                "calendar row has malformed validity dates; treating service as uncalendared"
            );
            return Ok(None);
        };

        Ok(Some(ServiceCalendarEntry {
            service_id: service.clone(),
            start_date,
            end_date,
            weekdays: WeekdayPattern::from_bools(sun, mon, tue, wed, thu, fri, sat),
        }))
    }

    fn exception_on(
        &self,
        service: &ServiceId,
        date: ServiceDate,
    ) -> Result<Option<CalendarException>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "select exception_type from calendar_dates where date = ?1 and service_id = ?2",
        )?;
        let code = stmt
            .query_row(params![date.compact(), service.as_str()], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;
        Ok(code.map(|code| CalendarException {
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
        if stops.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.conn()?;
        let placeholders = vec!["?"; stops.len()].join(", ");
        let sql = format!(
            "select distinct trip_id, departure_time, stop_id from stop_times \
             where stop_id in ({placeholders}) \
             and departure_time >= ? and departure_time <= ? \
             order by departure_time"
        );
        let mut stmt = conn.prepare_cached(&sql)?;

        let args = stops
            .iter()
            .map(|stop| stop.as_str().to_owned())
            .chain([lower.to_owned(), upper.to_owned()]);
        let mapped = stmt.query_map(params_from_iter(args), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut rows = Vec::new();
        for row in mapped {
            let (trip, departure, stop) = row?;
            match ServiceTime::parse_hhmmss(&departure) {
                Ok(time) => rows.push(StopTimeRow {
                    trip_id: TripId::from(trip),
                    departure: time,
                    stop_id: StopId::from(stop),
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
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "select route_long_name, route_short_name, trip_headsign from routes \
             join trips on routes.route_id = trips.route_id where trip_id = ?1",
        )?;
        let info = stmt
            .query_row(params![trip.as_str()], |row| {
                Ok(TripDisplayInfo {
                    route_long_name: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    route_short_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    trip_headsign: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })
            .optional()?;
        Ok(info)
    }

    fn schedule_for_stop(&self, stop: &StopId) -> Result<Vec<ScheduleRow>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "select distinct departure_time, trips.trip_id, routes.route_short_name, trip_headsign \
             from stop_times \
             join trips on stop_times.trip_id = trips.trip_id \
             join routes on routes.route_id = trips.route_id \
             where stop_id = ?1 order by departure_time",
        )?;
        let mapped = stmt.query_map(params![stop.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            ))
        })?;

        let mut rows = Vec::new();
        for row in mapped {
            let (departure, trip, route_short_name, trip_headsign) = row?;
            match ServiceTime::parse_hhmmss(&departure) {
                Ok(time) => rows.push(ScheduleRow {
                    departure: time,
                    trip_id: TripId::from(trip),
                    route_short_name,
                    trip_headsign,
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
