//! Next-departure queries.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, error};

use crate::calendar::{CalendarError, CalendarResolver};
use crate::domain::{Moment, ServiceDate, ServiceTime, StopId, TripId};
use crate::store::{StopTimeRow, StoreError, TransitStore};

use super::config::BoardConfig;
use super::format::countdown;
use super::window::DepartureWindow;

/// Errors that abort a departure query.
///
/// A query that merely finds nothing returns `Ok(None)`; an error here
/// means the caller should *not* present an empty board.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// No stops were supplied. Rejected before any store access.
    #[error("no stops supplied")]
    EmptyStops,

    /// The effective date fell off the calendar (window construction).
    #[error(transparent)]
    Date(#[from] crate::domain::MalformedDate),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One upcoming departure, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Scheduled departure in the stored hour-overflow form.
    pub departure: ServiceTime,

    /// Days the trip's service operates ("Mon Tue Wed Thu Fri ", or the
    /// special-schedule marker).
    pub operating_days: String,

    pub trip_id: TripId,
    pub stop_id: StopId,

    /// Route short name when configured and available, else the stop id.
    pub route_label: String,

    /// Headsign, or the route long name when the trip has none.
    pub destination: String,

    /// "Departs in …" countdown, anchored at the query's `now`.
    pub countdown: String,
}

/// One row of the full schedule listing for a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Scheduled departure in the stored hour-overflow form.
    pub departure: ServiceTime,

    /// Days the trip's service operates.
    pub operating_days: String,

    pub route_short_name: String,
    pub headsign: String,
}

/// Resolves upcoming departures for one opened dataset.
///
/// Owns the calendar resolver (and with it the session caches); both are
/// discarded together when the host switches datasets.
pub struct DepartureQueryEngine<S> {
    store: Arc<S>,
    calendar: CalendarResolver<S>,
    config: BoardConfig,
}

impl<S: TransitStore> DepartureQueryEngine<S> {
    pub fn new(store: Arc<S>, config: BoardConfig) -> Self {
        Self {
            calendar: CalendarResolver::new(store.clone()),
            store,
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The calendar resolver, also exposed to callers that want the
    /// operating-days answer on its own.
    pub fn calendar(&self) -> &CalendarResolver<S> {
        &self.calendar
    }

    /// Upcoming departures at one stop, soonest first.
    ///
    /// `Ok(None)` means no departures inside the window — a legitimate
    /// empty board, distinct from any `Err`.
    pub fn next_departures(
        &self,
        now: &Moment,
        stop: &StopId,
        early_morning: bool,
    ) -> Result<Option<Vec<Departure>>, QueryError> {
        self.query(now, std::slice::from_ref(stop), early_morning, false)
    }

    /// The full day's schedule at a stop.
    ///
    /// With `limit_to_date` set, only departures whose trip runs on `date`
    /// appear; unset, every scheduled departure appears annotated with its
    /// informational weekly pattern. Unlike the windowed queries, an empty
    /// listing is an ordinary empty vec.
    pub fn stop_schedule(
        &self,
        stop: &StopId,
        date: ServiceDate,
        limit_to_date: bool,
    ) -> Result<Vec<ScheduleEntry>, QueryError> {
        let rows = self.store.schedule_for_stop(stop)?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let days = match self
                .calendar
                .resolve_operating_days(&row.trip_id, date, limit_to_date)
            {
                Ok(Some(days)) => days,
                Ok(None) => continue,
                Err(CalendarError::UnknownTrip(trip)) => {
                    error!(%trip, "schedule row references unknown trip, dropping");
                    continue;
                }
                Err(CalendarError::Store(err)) => return Err(err.into()),
            };

            entries.push(ScheduleEntry {
                departure: row.departure,
                operating_days: days,
                route_short_name: row.route_short_name,
                headsign: row.trip_headsign,
            });
        }
        Ok(entries)
    }

    /// Upcoming departures across a stop set, merged into one
    /// chronological sequence with the per-stop cap applied to each stop
    /// independently.
    pub fn next_departures_multi(
        &self,
        now: &Moment,
        stops: &[StopId],
        early_morning: bool,
    ) -> Result<Option<Vec<Departure>>, QueryError> {
        self.query(now, stops, early_morning, true)
    }

    fn query(
        &self,
        now: &Moment,
        stops: &[StopId],
        early_morning: bool,
        per_stop_caps: bool,
    ) -> Result<Option<Vec<Departure>>, QueryError> {
        if stops.is_empty() {
            return Err(QueryError::EmptyStops);
        }

        let cap = self.config.departures_per_stop;
        let window = DepartureWindow::for_moment(now, self.config.look_ahead_hours, early_morning)?;
        debug!(
            mode = ?window.mode(),
            lower = window.lower(),
            upper = window.upper(),
            date = %window.service_date(),
            "querying departure window"
        );

        let rows = self
            .store
            .departures_in_window(stops, window.lower(), window.upper())?;

        // Filter through the calendar, tracking per-stop survivor counts
        // for the multi-stop form so an exhausted stop stops costing
        // resolver calls.
        let mut survivors: Vec<(StopTimeRow, String)> = Vec::new();
        let mut remaining: HashSet<&StopId> = stops.iter().collect();
        let mut counts: HashMap<StopId, usize> = HashMap::new();
        let mut contributing_stops = 0usize;

        for row in rows {
            if per_stop_caps {
                if remaining.is_empty() {
                    break;
                }
                if !remaining.contains(&row.stop_id) {
                    continue;
                }
            }

            let days = match self
                .calendar
                .resolve_operating_days(&row.trip_id, window.service_date(), true)
            {
                Ok(Some(days)) => days,
                Ok(None) => continue,
                Err(CalendarError::UnknownTrip(trip)) => {
                    error!(%trip, "stop_times row references unknown trip, dropping");
                    continue;
                }
                Err(CalendarError::Store(err)) => return Err(err.into()),
            };

            if per_stop_caps {
                let count = counts.entry(row.stop_id.clone()).or_insert(0);
                if *count == 0 {
                    contributing_stops += 1;
                }
                *count += 1;
                if *count >= cap {
                    remaining.remove(&row.stop_id);
                }
            }

            survivors.push((row, days));
        }

        if survivors.is_empty() {
            return Ok(None);
        }

        // True chronological order anchored at the window's lower bound;
        // never the raw text order.
        survivors.sort_by_key(|(row, _)| row.departure.seconds_after(window.anchor_secs()));

        let keep = if per_stop_caps {
            cap * contributing_stops
        } else {
            cap
        };
        survivors.truncate(keep);

        // Join display metadata only for rows that made the cut.
        let mut results = Vec::with_capacity(survivors.len());
        for (row, days) in survivors {
            let Some(display) = self.store.trip_display(&row.trip_id)? else {
                error!(trip = %row.trip_id, "no route/trip display row, dropping departure");
                continue;
            };

            let route_label =
                if display.route_short_name.is_empty() || !self.config.prefer_route_number {
                    row.stop_id.to_string()
                } else {
                    display.route_short_name.clone()
                };

            results.push(Departure {
                countdown: countdown(now, &row.departure),
                destination: display.destination().to_owned(),
                departure: row.departure,
                operating_days: days,
                trip_id: row.trip_id,
                stop_id: row.stop_id,
                route_label,
            });
        }

        if results.is_empty() {
            return Ok(None);
        }
        Ok(Some(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceDate, ServiceId, WeekdayPattern};
    use crate::store::{
        CalendarException, MockStore, ScheduleRow, ServiceCalendarEntry, TripDisplayInfo,
    };

    fn moment(date: &str, h: u32, m: u32, s: u32) -> Moment {
        Moment::new(ServiceDate::parse_compact(date).unwrap(), h, m, s).unwrap()
    }

    fn weekdays() -> WeekdayPattern {
        WeekdayPattern::from_bools(false, true, true, true, true, true, false)
    }

    /// Weekday service "WD" through 2024, one stop, one trip per departure.
    fn board_store(rows: &[(&str, &str, &str)]) -> MockStore {
        let mut store = MockStore::new().with_calendar("WD", "20240101", "20241231", weekdays());
        for (stop, departure, trip) in rows {
            store = store
                .with_trip(trip, "WD")
                .with_stop_time(stop, departure, trip)
                .with_display(trip, "Mainline", "13", "Laurelwood");
        }
        store
    }

    fn engine(store: MockStore, config: BoardConfig) -> DepartureQueryEngine<MockStore> {
        DepartureQueryEngine::new(Arc::new(store), config)
    }

    fn stop(s: &str) -> StopId {
        StopId::new(s)
    }

    #[test]
    fn same_day_board() {
        // Friday 08:00, one-hour horizon, weekday trip at 08:20.
        let engine = engine(
            board_store(&[("s1", "082000", "t1")]),
            BoardConfig::default(),
        );
        let now = moment("20240315", 8, 0, 0);

        let board = engine
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        assert_eq!(board.len(), 1);

        let departure = &board[0];
        assert_eq!(departure.departure.to_string(), "082000");
        assert_eq!(departure.countdown, "Departs in 20 minutes");
        assert_eq!(departure.operating_days, "Mon Tue Wed Thu Fri ");
        assert_eq!(departure.destination, "Laurelwood");
        assert_eq!(departure.trip_id, TripId::new("t1"));
    }

    #[test]
    fn same_day_excludes_current_minute_and_horizon() {
        let engine = engine(
            board_store(&[
                ("s1", "080000", "t1"), // the current minute
                ("s1", "083000", "t2"),
                ("s1", "091500", "t3"), // past the horizon
            ]),
            BoardConfig::default(),
        );
        let now = moment("20240315", 8, 0, 0);

        let board = engine
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].trip_id, TripId::new("t2"));
    }

    #[test]
    fn late_night_carryover_uses_yesterday() {
        // Saturday 01:00 with a 2-hour horizon: the 25:05 trip belongs to
        // Friday's service day, and Friday's weekday flag admits it.
        let engine = engine(
            board_store(&[("s1", "250500", "t1")]),
            BoardConfig {
                look_ahead_hours: 2,
                ..BoardConfig::default()
            },
        );
        let now = moment("20240316", 1, 0, 0);

        let board = engine
            .next_departures(&now, &stop("s1"), false)
            .unwrap()
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].departure.hour(), 25);
        assert_eq!(board[0].countdown, "Departs in 5 minutes");
    }

    #[test]
    fn carryover_respects_yesterdays_calendar() {
        // Monday 01:00: hour 25 rows belong to Sunday, and the weekday
        // pattern does not run Sundays.
        let engine = engine(
            board_store(&[("s1", "250500", "t1")]),
            BoardConfig {
                look_ahead_hours: 2,
                ..BoardConfig::default()
            },
        );
        let now = moment("20240318", 1, 0, 0);

        assert!(engine.next_departures(&now, &stop("s1"), false).unwrap().is_none());
    }

    #[test]
    fn next_day_window_uses_tomorrow() {
        // Friday 23:30 with a 2-hour horizon reaches into Saturday, which
        // the weekday pattern excludes; a Saturday-only service runs.
        let store = MockStore::new()
            .with_calendar("WD", "20240101", "20241231", weekdays())
            .with_calendar(
                "SAT",
                "20240101",
                "20241231",
                WeekdayPattern::from_bools(false, false, false, false, false, false, true),
            )
            .with_trip("wd-trip", "WD")
            .with_trip("sat-trip", "SAT")
            .with_stop_time("s1", "003000", "wd-trip")
            .with_stop_time("s1", "004500", "sat-trip")
            .with_display("wd-trip", "Mainline", "13", "Laurelwood")
            .with_display("sat-trip", "Night Owl", "N1", "Downtown");
        let engine = engine(
            store,
            BoardConfig {
                look_ahead_hours: 2,
                ..BoardConfig::default()
            },
        );
        let now = moment("20240315", 23, 30, 0);

        let board = engine
            .next_departures(&now, &stop("s1"), false)
            .unwrap()
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].trip_id, TripId::new("sat-trip"));
        assert_eq!(board[0].destination, "Downtown");
    }

    /// Store that returns a fixed row set regardless of the window, for
    /// exercising the sort on row mixes a single window cannot produce.
    struct ScriptedStore {
        inner: MockStore,
        rows: Vec<StopTimeRow>,
    }

    impl TransitStore for ScriptedStore {
        fn service_for_trip(
            &self,
            trip: &TripId,
        ) -> Result<Option<ServiceId>, StoreError> {
            self.inner.service_for_trip(trip)
        }

        fn calendar_entry(
            &self,
            service: &ServiceId,
        ) -> Result<Option<ServiceCalendarEntry>, StoreError> {
            self.inner.calendar_entry(service)
        }

        fn exception_on(
            &self,
            service: &ServiceId,
            date: ServiceDate,
        ) -> Result<Option<CalendarException>, StoreError> {
            self.inner.exception_on(service, date)
        }

        fn departures_in_window(
            &self,
            _stops: &[StopId],
            _lower: &str,
            _upper: &str,
        ) -> Result<Vec<StopTimeRow>, StoreError> {
            Ok(self.rows.clone())
        }

        fn trip_display(&self, trip: &TripId) -> Result<Option<TripDisplayInfo>, StoreError> {
            self.inner.trip_display(trip)
        }

        fn schedule_for_stop(&self, stop: &StopId) -> Result<Vec<ScheduleRow>, StoreError> {
            self.inner.schedule_for_stop(stop)
        }
    }

    #[test]
    fn ordering_is_chronological_not_lexicographic() {
        // Queried at 23:00, a 00:05 departure is later than 23:59 even
        // though its raw text sorts first.
        let rows = ["000500", "235900"]
            .iter()
            .enumerate()
            .map(|(i, departure)| StopTimeRow {
                trip_id: TripId::new(format!("t{i}")),
                departure: ServiceTime::parse_hhmmss(departure).unwrap(),
                stop_id: stop("s1"),
            })
            .collect();
        let store = ScriptedStore {
            inner: board_store(&[("s1", "000500", "t0"), ("s1", "235900", "t1")]),
            rows,
        };
        let engine = DepartureQueryEngine::new(Arc::new(store), BoardConfig::default());
        let now = moment("20240315", 23, 0, 0);

        let board = engine
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        let order: Vec<String> = board.iter().map(|d| d.departure.to_string()).collect();
        assert_eq!(order, ["235900", "000500"]);
    }

    #[test]
    fn single_stop_cap_keeps_the_soonest() {
        let engine = engine(
            board_store(&[
                ("s1", "084500", "t1"),
                ("s1", "080500", "t2"),
                ("s1", "083000", "t3"),
                ("s1", "081000", "t4"),
                ("s1", "082000", "t5"),
            ]),
            BoardConfig::default(),
        );
        let now = moment("20240315", 8, 0, 0);

        let board = engine
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        let order: Vec<String> = board.iter().map(|d| d.departure.to_string()).collect();
        assert_eq!(order, ["080500", "081000", "082000"]);
    }

    #[test]
    fn multi_stop_caps_apply_per_stop() {
        let engine = engine(
            board_store(&[
                ("s1", "080500", "tA"),
                ("s2", "081000", "tD"),
                ("s1", "082000", "tB"),
                ("s1", "083000", "tC"),
            ]),
            BoardConfig {
                departures_per_stop: 2,
                ..BoardConfig::default()
            },
        );
        let now = moment("20240315", 8, 0, 0);
        let stops = [stop("s1"), stop("s2")];

        let board = engine
            .next_departures_multi(&now, &stops, true)
            .unwrap()
            .unwrap();

        // s1 is capped at 2; the merged sequence stays chronological.
        let order: Vec<(String, String)> = board
            .iter()
            .map(|d| (d.stop_id.to_string(), d.departure.to_string()))
            .collect();
        assert_eq!(
            order,
            [
                ("s1".into(), "080500".into()),
                ("s2".into(), "081000".into()),
                ("s1".into(), "082000".into()),
            ]
        );

        for s in &stops {
            let per_stop = board.iter().filter(|d| &d.stop_id == s).count();
            assert!(per_stop <= 2);
        }
    }

    #[test]
    fn exhausted_stop_short_circuits_resolution() {
        // Once s1 has its one departure, the later s1 row must be skipped
        // before any calendar work: the exact store-query count proves it.
        let store = Arc::new(
            board_store(&[("s1", "080500", "t1")])
                .with_stop_time("s1", "083000", "ghost"),
        );
        let engine = DepartureQueryEngine::new(
            store.clone(),
            BoardConfig {
                departures_per_stop: 1,
                ..BoardConfig::default()
            },
        );
        let now = moment("20240315", 8, 0, 0);

        let board = engine
            .next_departures_multi(&now, &[stop("s1")], true)
            .unwrap()
            .unwrap();
        assert_eq!(board.len(), 1);

        // window query + (service, calendar, exception) for t1 + display.
        assert_eq!(store.query_count(), 5);
    }

    #[test]
    fn queried_stop_without_rows_does_not_inflate_truncation() {
        let engine = engine(
            board_store(&[("s1", "080500", "t1"), ("s1", "081000", "t2")]),
            BoardConfig {
                departures_per_stop: 1,
                ..BoardConfig::default()
            },
        );
        let now = moment("20240315", 8, 0, 0);

        let board = engine
            .next_departures_multi(&now, &[stop("s1"), stop("s2")], true)
            .unwrap()
            .unwrap();
        // Only s1 contributed, so the cap is 1 × 1.
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn empty_stop_set_rejected_before_any_query() {
        let store = Arc::new(board_store(&[]));
        let engine = DepartureQueryEngine::new(store.clone(), BoardConfig::default());
        let now = moment("20240315", 8, 0, 0);

        let err = engine.next_departures_multi(&now, &[], true).unwrap_err();
        assert!(matches!(err, QueryError::EmptyStops));
        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn empty_board_is_none_not_error() {
        let engine = engine(board_store(&[]), BoardConfig::default());
        let now = moment("20240315", 8, 0, 0);

        assert!(engine.next_departures(&now, &stop("s1"), true).unwrap().is_none());
    }

    #[test]
    fn unavailable_store_is_an_error_not_an_empty_board() {
        let engine = engine(board_store(&[]).with_unavailable(), BoardConfig::default());
        let now = moment("20240315", 8, 0, 0);

        let err = engine.next_departures(&now, &stop("s1"), true).unwrap_err();
        assert!(matches!(err, QueryError::Store(_)));
    }

    #[test]
    fn unknown_trip_row_is_dropped_not_fatal() {
        let engine = engine(
            board_store(&[("s1", "082000", "t1")]).with_stop_time("s1", "081000", "phantom"),
            BoardConfig::default(),
        );
        let now = moment("20240315", 8, 0, 0);

        let board = engine
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].trip_id, TripId::new("t1"));
    }

    #[test]
    fn route_label_preference() {
        let now = moment("20240315", 8, 0, 0);

        // Default: the stop id labels the row even when a short name exists.
        let engine_default = engine(
            board_store(&[("s1", "082000", "t1")]),
            BoardConfig::default(),
        );
        let board = engine_default
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        assert_eq!(board[0].route_label, "s1");

        // Preferring route numbers uses the short name.
        let engine_routes = engine(
            board_store(&[("s1", "082000", "t1")]),
            BoardConfig {
                prefer_route_number: true,
                ..BoardConfig::default()
            },
        );
        let board = engine_routes
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        assert_eq!(board[0].route_label, "13");

        // An empty short name falls back to the stop id regardless.
        let store = MockStore::new()
            .with_calendar("WD", "20240101", "20241231", weekdays())
            .with_trip("t1", "WD")
            .with_stop_time("s1", "082000", "t1")
            .with_display("t1", "Mainline", "", "Laurelwood");
        let engine_no_short = DepartureQueryEngine::new(
            Arc::new(store),
            BoardConfig {
                prefer_route_number: true,
                ..BoardConfig::default()
            },
        );
        let board = engine_no_short
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        assert_eq!(board[0].route_label, "s1");
    }

    #[test]
    fn empty_headsign_falls_back_to_long_name() {
        let store = MockStore::new()
            .with_calendar("WD", "20240101", "20241231", weekdays())
            .with_trip("t1", "WD")
            .with_stop_time("s1", "082000", "t1")
            .with_display("t1", "Mainline", "13", "");
        let engine = DepartureQueryEngine::new(Arc::new(store), BoardConfig::default());
        let now = moment("20240315", 8, 0, 0);

        let board = engine
            .next_departures(&now, &stop("s1"), true)
            .unwrap()
            .unwrap();
        assert_eq!(board[0].destination, "Mainline");
    }

    #[test]
    fn surviving_row_without_display_join_is_dropped() {
        let store = MockStore::new()
            .with_calendar("WD", "20240101", "20241231", weekdays())
            .with_trip("t1", "WD")
            .with_stop_time("s1", "082000", "t1");
        let engine = DepartureQueryEngine::new(Arc::new(store), BoardConfig::default());
        let now = moment("20240315", 8, 0, 0);

        assert!(engine.next_departures(&now, &stop("s1"), true).unwrap().is_none());
    }

    #[test]
    fn stop_schedule_limited_to_date() {
        let engine = engine(
            board_store(&[("s1", "082000", "t1"), ("s1", "174500", "t2")]),
            BoardConfig::default(),
        );

        // Friday: both weekday departures, in time order.
        let friday = engine
            .stop_schedule(&stop("s1"), ServiceDate::parse_compact("20240315").unwrap(), true)
            .unwrap();
        let order: Vec<String> = friday.iter().map(|e| e.departure.to_string()).collect();
        assert_eq!(order, ["082000", "174500"]);
        assert_eq!(friday[0].route_short_name, "13");
        assert_eq!(friday[0].headsign, "Laurelwood");

        // Saturday: nothing runs, and that is an empty list, not an error.
        let saturday = engine
            .stop_schedule(&stop("s1"), ServiceDate::parse_compact("20240316").unwrap(), true)
            .unwrap();
        assert!(saturday.is_empty());
    }

    #[test]
    fn stop_schedule_informational_ignores_the_date() {
        let engine = engine(
            board_store(&[("s1", "082000", "t1")]),
            BoardConfig::default(),
        );

        // Saturday, but the informational listing still shows the weekly
        // pattern.
        let listing = engine
            .stop_schedule(&stop("s1"), ServiceDate::parse_compact("20240316").unwrap(), false)
            .unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].operating_days, "Mon Tue Wed Thu Fri ");
    }

    #[test]
    fn removed_exception_filters_the_row() {
        let engine = engine(
            board_store(&[("s1", "082000", "t1")]).with_exception("WD", "20240315", 2),
            BoardConfig::default(),
        );
        let now = moment("20240315", 8, 0, 0);

        assert!(engine.next_departures(&now, &stop("s1"), true).unwrap().is_none());
    }

    #[test]
    fn invalid_exception_type_is_survivable() {
        // Saturday with a bogus exception code: no weekday flag, no valid
        // override, so the trip is excluded without failing the query.
        let engine = engine(
            board_store(&[("s1", "082000", "t1")]).with_exception("WD", "20240316", 3),
            BoardConfig::default(),
        );
        let now = moment("20240316", 8, 0, 0);

        assert!(engine.next_departures(&now, &stop("s1"), true).unwrap().is_none());
    }
}
