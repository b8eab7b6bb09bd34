//! Cleaning schedule of a short-term rental, derived from its iCalendar feed.
//!
//! - `ics` reads the feed into `Reservation`s
//! - `schedule` turns checkouts into `CleaningEvent`s and flags idle gaps
//! - `period` buckets past cleanings into half-month periods
//! - `feed` retrieves and caches the feed

pub mod config;
pub mod date;
pub mod error;
pub mod feed;
pub mod ics;
pub mod locale;
pub mod period;
pub mod schedule;

pub use error::{DateError, TurnoverError, TurnoverResult};
pub use feed::{CalendarData, FeedClient, FeedSource};
pub use ics::{ParsedFeed, RejectReason, RejectedBlock, Reservation, parse_feed, parse_reservations};
pub use locale::Locale;
pub use period::{HalfMonth, HalfMonthPeriod, assign_cleanings, cleaning_history, half_month_periods};
pub use schedule::{CleaningEvent, gap_alerts, next_cleaning, past_cleanings, upcoming_cleanings};
