//! Does this trip run on that date?
//!
//! [`CalendarResolver`] answers from the `calendar`/`calendar_dates`
//! tables, applying date-specific exception overrides before the weekly
//! pattern, and memoizes every verdict for the life of the resolver.

mod cache;
mod resolver;

pub use cache::CalendarCache;
pub use resolver::{CalendarError, CalendarResolver, HOLIDAY_SCHEDULE};
