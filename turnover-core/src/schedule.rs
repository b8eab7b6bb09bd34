//! Cleaning events derived from reservations.
//!
//! A cleaning happens on every checkout date. For upcoming cleanings we also
//! look at the idle nights between one checkout and the next check-in: if the
//! gap is near, a last-minute booking may land in it and require an extra,
//! unplanned cleaning.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::date::days_between;
use crate::ics::Reservation;

/// Gaps are only flagged for checkouts at most this many days away.
pub const GAP_ALERT_HORIZON_DAYS: i64 = 10;

/// Hour at which a cleaning is shown to start.
pub const CLEANING_HOUR: u32 = 11;

/// Display window for a cleaning.
pub const CLEANING_WINDOW: &str = "11:00 - 15:00";

/// A cleaning triggered by a reservation checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningEvent {
    /// Checkout date at [`CLEANING_HOUR`], floating.
    pub date: NaiveDateTime,
    pub days_from_now: i64,
    pub is_today: bool,
    pub is_tomorrow: bool,
    pub has_gap_after: bool,
    /// Nights between this checkout and the next check-in. 0 means back-to-back.
    pub gap_days: i64,
}

impl CleaningEvent {
    fn new(checkout: NaiveDate, today: NaiveDate) -> Self {
        let days_from_now = days_between(today, checkout);
        CleaningEvent {
            date: cleaning_time(checkout),
            days_from_now,
            is_today: days_from_now == 0,
            is_tomorrow: days_from_now == 1,
            has_gap_after: false,
            gap_days: 0,
        }
    }

    /// The checkout date this cleaning belongs to.
    pub fn checkout(&self) -> NaiveDate {
        self.date.date()
    }

    /// The day the gap closes: the next check-in, or the checkout of a guest
    /// filling the whole gap.
    pub fn gap_date(&self) -> NaiveDate {
        self.checkout() + Duration::days(self.gap_days)
    }
}

fn cleaning_time(checkout: NaiveDate) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(CLEANING_HOUR, 0, 0).unwrap_or_default();
    checkout.and_time(time)
}

/// Cleanings for every reservation checking out `today` or later, in checkout
/// order, annotated with gap information.
///
/// Reservations sharing a checkout date keep their relative input order.
pub fn upcoming_cleanings(reservations: &[Reservation], today: NaiveDate) -> Vec<CleaningEvent> {
    let mut future: Vec<&Reservation> = reservations.iter().filter(|r| r.end >= today).collect();
    future.sort_by_key(|r| r.end);

    future
        .iter()
        .enumerate()
        .map(|(i, reservation)| {
            let mut event = CleaningEvent::new(reservation.end, today);
            if let Some(next) = future.get(i + 1) {
                event.gap_days = days_between(reservation.end, next.start);
                event.has_gap_after =
                    event.gap_days >= 1 && event.days_from_now <= GAP_ALERT_HORIZON_DAYS;
            }
            event
        })
        .collect()
}

/// Cleanings for every reservation that checked out before `today`, most
/// recent first. Gap fields are always unset for past cleanings.
pub fn past_cleanings(reservations: &[Reservation], today: NaiveDate) -> Vec<CleaningEvent> {
    let mut past: Vec<&Reservation> = reservations.iter().filter(|r| r.end < today).collect();
    past.sort_by_key(|r| std::cmp::Reverse(r.end));

    past.iter()
        .map(|reservation| CleaningEvent::new(reservation.end, today))
        .collect()
}

/// Upcoming cleanings followed by a gap, no further than `max_days_ahead`
/// days away. Gaps are only flagged up to [`GAP_ALERT_HORIZON_DAYS`], so a
/// larger `max_days_ahead` returns the same alerts as the horizon itself.
pub fn gap_alerts(cleanings: &[CleaningEvent], max_days_ahead: i64) -> Vec<&CleaningEvent> {
    cleanings
        .iter()
        .filter(|c| c.has_gap_after && c.days_from_now <= max_days_ahead)
        .collect()
}

/// The next cleaning to do, if any, and the cleanings after it.
pub fn next_cleaning(cleanings: &[CleaningEvent]) -> Option<(&CleaningEvent, &[CleaningEvent])> {
    let index = cleanings.iter().position(|c| c.days_from_now >= 0)?;
    Some((&cleanings[index], &cleanings[index + 1..]))
}
