//! Rider-facing string formatting.

use tracing::debug;

use crate::domain::{Moment, ServiceTime};

/// The "departs in …" countdown from `now` to a scheduled departure.
///
/// The hour delta is normalized into [0,24) (a departure numbered past 24
/// or on the far side of midnight still yields a non-negative phrase); the
/// minute delta may borrow from it. Wording is singular/plural per unit,
/// with "and" joining only before a singular minute.
///
/// # Examples
///
/// ```
/// use departure_board::domain::{Moment, ServiceDate, ServiceTime};
/// use departure_board::engine::countdown;
///
/// let date = ServiceDate::parse_compact("20240315").unwrap();
/// let now = Moment::new(date, 8, 0, 0).unwrap();
///
/// let soon = ServiceTime::parse_hhmmss("082000").unwrap();
/// assert_eq!(countdown(&now, &soon), "Departs in 20 minutes");
///
/// let later = ServiceTime::parse_hhmmss("090000").unwrap();
/// assert_eq!(countdown(&now, &later), "Departs in 1 hour 0 minutes");
/// ```
pub fn countdown(now: &Moment, departure: &ServiceTime) -> String {
    let mut hour_diff = i64::from(departure.hour()) - i64::from(now.hour());
    while hour_diff >= 24 {
        hour_diff -= 24;
    }
    if hour_diff < 0 {
        hour_diff += 24;
    }

    let minute_diff = i64::from(departure.minute()) - i64::from(now.minute());
    let total_diff = hour_diff * 60 + minute_diff;

    if total_diff == minute_diff {
        // Same hour: minutes alone tell the story.
        return format!("Departs in {minute_diff} {}", minutes_word(minute_diff));
    }

    if minute_diff <= 0 {
        // Negative minutes borrow from the hour component.
        let hours = total_diff / 60;
        let minutes = total_diff % 60;
        return phrase(hours, minutes);
    }

    phrase(hour_diff, minute_diff)
}

fn phrase(hours: i64, minutes: i64) -> String {
    if hours == 0 {
        return format!("Departs in {minutes} {}", minutes_word(minutes));
    }
    let joiner = if minutes == 1 { "and " } else { "" };
    format!(
        "Departs in {hours} {} {joiner}{minutes} {}",
        hours_word(hours),
        minutes_word(minutes)
    )
}

fn hours_word(n: i64) -> &'static str {
    if n == 1 { "hour" } else { "hours" }
}

fn minutes_word(n: i64) -> &'static str {
    if n == 1 { "minute" } else { "minutes" }
}

/// Format a stored departure time for display.
///
/// Parses the zero-padded `HHMMSS` form (hour possibly ≥ 24) and renders
/// it through [`ServiceTime::clock_display`]. Unparsable input degrades to
/// the raw text with a colon inserted, so a corrupt row still shows
/// *something* rather than killing the board.
pub fn formatted_clock_time(raw: &str, twelve_hour: bool) -> String {
    match ServiceTime::parse_hhmmss(raw) {
        Ok(time) => time.clock_display(twelve_hour),
        Err(err) => {
            debug!(%err, %raw, "unparsable departure text, displaying raw");
            match (raw.get(..2), raw.get(2..4)) {
                (Some(hh), Some(mm)) => format!("{hh}:{mm}"),
                _ => raw.to_owned(),
            }
        }
    }
}
