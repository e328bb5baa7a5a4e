//! Identifier newtypes for transit entities.
//!
//! GTFS identifiers are opaque feed-defined strings. Each gets its own
//! type so a trip id cannot be passed where a stop id is expected.
//! `Arc<str>` keeps clones cheap; identifiers are used heavily as cache
//! keys.

use std::fmt;
use std::sync::Arc;

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }
    };
}

identifier! {
    /// A stop identifier (`stops.stop_id`).
    StopId
}

identifier! {
    /// A trip identifier (`trips.trip_id`). One scheduled run of a vehicle.
    TripId
}

identifier! {
    /// A service-pattern identifier (`calendar.service_id`).
    ServiceId
}

identifier! {
    /// A route identifier (`routes.route_id`).
    RouteId
}
