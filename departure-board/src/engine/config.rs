//! Board configuration supplied by the host.

use serde::{Deserialize, Serialize};

/// Knobs the surrounding system supplies (rider preferences, typically).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// How many departures to keep per stop.
    pub departures_per_stop: usize,

    /// Search horizon in hours from "now".
    pub look_ahead_hours: u32,

    /// Render clock times as `h:mm am/pm` instead of 24-hour `h:mm`.
    pub twelve_hour_clock: bool,

    /// Label results with the route's short name when it has one, instead
    /// of the stop id.
    pub prefer_route_number: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            departures_per_stop: 3,
            look_ahead_hours: 1,
            twelve_hour_clock: false,
            prefer_route_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.departures_per_stop, 3);
        assert_eq!(config.look_ahead_hours, 1);
        assert!(!config.twelve_hour_clock);
        assert!(!config.prefer_route_number);
    }

    #[test]
    fn roundtrips_through_serde() {
        let config = BoardConfig {
            departures_per_stop: 5,
            look_ahead_hours: 2,
            twelve_hour_clock: true,
            prefer_route_number: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: BoardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
