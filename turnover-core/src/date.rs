//! Floating calendar dates.
//!
//! Every date in turnover is a `NaiveDate`: a year/month/day triple with no
//! time of day and no timezone. Differences are counted in whole days, so two
//! readings taken on the same calendar day always compare equal.

use chrono::NaiveDate;

use crate::error::DateError;

/// Parse the calendar date out of an iCalendar `DATE` or `DATE-TIME` value.
///
/// Only the first 8 characters (`YYYYMMDD`) are looked at; anything after
/// them (`T110000Z`, a TZID-local time, ...) is discarded without timezone
/// conversion.
pub fn parse_ical_date(raw: &str) -> Result<NaiveDate, DateError> {
    let head: String = raw.chars().take(8).collect();
    if head.chars().count() < 8 {
        return Err(DateError::TooShort(raw.to_string()));
    }
    // chrono tolerates signs and padding inside numeric fields
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::Invalid(raw.to_string()));
    }

    NaiveDate::parse_from_str(&head, "%Y%m%d").map_err(|_| DateError::Invalid(raw.to_string()))
}

/// Parse a `YYYY-MM-DD` string (as used on the command line and in the API).
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| DateError::Format(s.to_string()))
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
