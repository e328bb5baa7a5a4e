//! Weekly operating patterns from the `calendar` table.

use chrono::Weekday;

/// Day abbreviations in calendar-column order (Sunday first), matching the
/// rendered operating-days string.
const ABBREV: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Which days of the week a service pattern operates.
///
/// # Examples
///
/// ```
/// use departure_board::domain::WeekdayPattern;
/// use chrono::Weekday;
///
/// let weekdays = WeekdayPattern::from_bools(false, true, true, true, true, true, false);
/// assert!(weekdays.runs_on(Weekday::Mon));
/// assert!(!weekdays.runs_on(Weekday::Sun));
/// assert_eq!(weekdays.days_string(), "Mon Tue Wed Thu Fri ");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeekdayPattern {
    flags: u8,
}

impl WeekdayPattern {
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Build from per-day flags in calendar-column order (Sunday first).
    pub fn from_bools(
        sun: bool,
        mon: bool,
        tue: bool,
        wed: bool,
        thu: bool,
        fri: bool,
        sat: bool,
    ) -> Self {
        let mut pattern = Self::new();
        for (i, set) in [sun, mon, tue, wed, thu, fri, sat].into_iter().enumerate() {
            if set {
                pattern.flags |= 1 << i;
            }
        }
        pattern
    }

    pub fn set(&mut self, day: Weekday) {
        self.flags |= 1 << day.num_days_from_sunday();
    }

    pub fn runs_on(&self, day: Weekday) -> bool {
        self.flags & (1 << day.num_days_from_sunday()) != 0
    }

    /// True when no day is flagged.
    pub fn is_empty(&self) -> bool {
        self.flags == 0
    }

    /// The joined abbreviation string shown to riders, Sunday first, each
    /// day followed by a space: `"Mon Wed Fri "`.
    pub fn days_string(&self) -> String {
        let mut days = String::new();
        for (i, abbrev) in ABBREV.iter().enumerate() {
            if self.flags & (1 << i) != 0 {
                days.push_str(abbrev);
                days.push(' ');
            }
        }
        days
    }
}
