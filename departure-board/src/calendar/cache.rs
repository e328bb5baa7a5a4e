//! Memoization for calendar resolution.
//!
//! Datasets are immutable for a session, so verdicts never expire: the
//! caches are unbounded and invalidated only by dropping the resolver on
//! dataset switch (discard-and-recreate, no fine-grained eviction). The
//! two operating-days spaces are kept separate: the date-limited and
//! full-pattern answers for the same (service, date) mean different
//! things, not the same value at different times.
//!
//! `moka` sync caches are concurrency-safe, so a host may fan enrichment
//! lookups out across threads without extra locking.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;

use crate::domain::{ServiceDate, ServiceId, TripId};

/// Key for the operating-days memo spaces.
type DayKey = (ServiceId, ServiceDate);

/// Memoized verdict: the operating-days string, or `None` for "does not
/// run". Negative verdicts are cached too; they cost the same lookups.
type DayVerdict = Option<Arc<str>>;

/// Caches owned by one resolver instance.
pub struct CalendarCache {
    /// Verdicts for `limit_to_weekday == true` (will it run on this date).
    limited: MokaCache<DayKey, DayVerdict>,

    /// Verdicts for `limit_to_weekday == false` (the informational pattern).
    full: MokaCache<DayKey, DayVerdict>,

    /// Trip → service bindings; a binding never changes within a session.
    trip_services: MokaCache<TripId, ServiceId>,
}

impl CalendarCache {
    /// Create empty caches. Population is lazy, on first query.
    pub fn new() -> Self {
        Self {
            limited: MokaCache::builder().build(),
            full: MokaCache::builder().build(),
            trip_services: MokaCache::builder().build(),
        }
    }

    pub fn verdict(&self, limited: bool, service: &ServiceId, date: ServiceDate) -> Option<DayVerdict> {
        self.space(limited).get(&(service.clone(), date))
    }

    pub fn store_verdict(
        &self,
        limited: bool,
        service: &ServiceId,
        date: ServiceDate,
        verdict: DayVerdict,
    ) {
        self.space(limited).insert((service.clone(), date), verdict);
    }

    pub fn service_for_trip(&self, trip: &TripId) -> Option<ServiceId> {
        self.trip_services.get(trip)
    }

    pub fn store_trip_service(&self, trip: &TripId, service: &ServiceId) {
        self.trip_services.insert(trip.clone(), service.clone());
    }

    fn space(&self, limited: bool) -> &MokaCache<DayKey, DayVerdict> {
        if limited { &self.limited } else { &self.full }
    }
}

impl Default for CalendarCache {
    fn default() -> Self {
        Self::new()
    }
}
