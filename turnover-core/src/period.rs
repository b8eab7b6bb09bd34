//! Half-month reporting periods for past cleanings.
//!
//! Cleanings are reported in fixed halves of a month: the 1st to the 15th,
//! and the 16th to the last day of the month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ics::Reservation;
use crate::locale::Locale;
use crate::schedule::{CleaningEvent, past_cleanings};

/// Number of periods in the history view (one year).
pub const HISTORY_PERIODS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Half {
    First,
    Second,
}

/// One half of a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfMonth {
    pub year: i32,
    pub month: u32,
    pub half: Half,
}

impl HalfMonth {
    pub fn containing(date: NaiveDate) -> Self {
        HalfMonth {
            year: date.year(),
            month: date.month(),
            half: if date.day() <= 15 { Half::First } else { Half::Second },
        }
    }

    pub fn previous(self) -> Self {
        match self.half {
            Half::Second => HalfMonth {
                half: Half::First,
                ..self
            },
            Half::First if self.month == 1 => HalfMonth {
                year: self.year - 1,
                month: 12,
                half: Half::Second,
            },
            Half::First => HalfMonth {
                month: self.month - 1,
                half: Half::Second,
                ..self
            },
        }
    }

    fn first_day(self) -> u32 {
        match self.half {
            Half::First => 1,
            Half::Second => 16,
        }
    }

    fn last_day(self) -> u32 {
        match self.half {
            Half::First => 15,
            Half::Second => u32::from(boundary(self.year, self.month, 1).num_days_in_month()),
        }
    }

    pub fn start_date(self) -> NaiveDate {
        boundary(self.year, self.month, self.first_day())
    }

    pub fn end_date(self) -> NaiveDate {
        boundary(self.year, self.month, self.last_day())
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        HalfMonth::containing(date) == self
    }

    /// e.g. "16-31 December 2025" or "1-15 enero 2026"
    pub fn label(self, locale: Locale) -> String {
        format!(
            "{}-{} {} {}",
            self.first_day(),
            self.last_day(),
            locale.month_name(self.start_date()),
            self.year
        )
    }
}

// Month is always 1-12 and the day within the month, so this can only fail
// for years outside chrono's range.
fn boundary(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("half-month boundary within chrono's date range")
}

/// A reporting period with the past cleanings that fall inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfMonthPeriod {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cleanings: Vec<CleaningEvent>,
}

impl HalfMonthPeriod {
    fn new(half: HalfMonth, locale: Locale) -> Self {
        HalfMonthPeriod {
            label: half.label(locale),
            start_date: half.start_date(),
            end_date: half.end_date(),
            cleanings: Vec::new(),
        }
    }

    /// Whether `date` falls within the period, both boundary days included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_empty(&self) -> bool {
        self.cleanings.is_empty()
    }
}

/// `count` consecutive empty periods, most recent first, the first one being
/// the half-month that contains `today`.
pub fn half_month_periods(today: NaiveDate, count: usize, locale: Locale) -> Vec<HalfMonthPeriod> {
    std::iter::successors(Some(HalfMonth::containing(today)), |half| Some(half.previous()))
        .take(count)
        .map(|half| HalfMonthPeriod::new(half, locale))
        .collect()
}

/// Put each cleaning in the period containing its checkout date. Cleanings
/// outside every period are left out.
pub fn assign_cleanings(
    mut periods: Vec<HalfMonthPeriod>,
    cleanings: &[CleaningEvent],
) -> Vec<HalfMonthPeriod> {
    for cleaning in cleanings {
        let checkout = cleaning.checkout();
        if let Some(period) = periods.iter_mut().find(|p| p.contains(checkout)) {
            period.cleanings.push(cleaning.clone());
        }
    }
    periods
}

/// Past cleanings of the last `count` half-months, most recent first.
/// [`HISTORY_PERIODS`] gives the usual one-year view.
pub fn cleaning_history(
    reservations: &[Reservation],
    today: NaiveDate,
    count: usize,
    locale: Locale,
) -> Vec<HalfMonthPeriod> {
    let periods = half_month_periods(today, count, locale);
    assign_cleanings(periods, &past_cleanings(reservations, today))
}

pub fn total_cleanings(periods: &[HalfMonthPeriod]) -> usize {
    periods.iter().map(|p| p.cleanings.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(uid: &str, start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation {
            summary: "Reserved".to_string(),
            start,
            end,
            uid: uid.to_string(),
        }
    }

    #[test]
    fn test_half_month_boundaries() {
        let first = HalfMonth::containing(date(2024, 2, 15));
        assert_eq!(first.half, Half::First);
        assert_eq!(first.start_date(), date(2024, 2, 1));
        assert_eq!(first.end_date(), date(2024, 2, 15));

        let second = HalfMonth::containing(date(2024, 2, 16));
        assert_eq!(second.half, Half::Second);
        assert_eq!(second.end_date(), date(2024, 2, 29));
        assert_eq!(HalfMonth::containing(date(2025, 2, 20)).end_date(), date(2025, 2, 28));
        assert_eq!(HalfMonth::containing(date(2025, 4, 30)).end_date(), date(2025, 4, 30));
    }

    #[test]
    fn test_previous_crosses_year() {
        let january = HalfMonth::containing(date(2026, 1, 3));
        let december = january.previous();
        assert_eq!(december.start_date(), date(2025, 12, 16));
        assert_eq!(december.end_date(), date(2025, 12, 31));
        assert_eq!(december.previous().end_date(), date(2025, 12, 15));
        assert_eq!(HalfMonth::containing(date(2026, 3, 1)).previous().end_date(), date(2026, 2, 28));
    }

    #[test]
    fn test_labels() {
        let half = HalfMonth::containing(date(2025, 12, 20));
        assert_eq!(half.label(Locale::English), "16-31 December 2025");
        assert_eq!(half.previous().label(Locale::Spanish), "1-15 diciembre 2025");
    }

    #[test]
    fn test_periods_end_at_current_half_most_recent_first() {
        let periods = half_month_periods(date(2025, 12, 17), HISTORY_PERIODS, Locale::English);

        assert_eq!(periods.len(), 24);
        assert_eq!(periods[0].start_date, date(2025, 12, 16));
        assert_eq!(periods[0].end_date, date(2025, 12, 31));
        assert_eq!(periods[1].start_date, date(2025, 12, 1));
        assert_eq!(periods[23].start_date, date(2025, 1, 1));
        assert_eq!(periods[23].end_date, date(2025, 1, 15));
        assert!(periods.iter().all(HalfMonthPeriod::is_empty));
    }

    #[test]
    fn test_periods_cover_a_year_exactly_once() {
        let periods = half_month_periods(date(2024, 12, 31), HISTORY_PERIODS, Locale::English);

        // Consecutive periods touch without overlapping.
        for pair in periods.windows(2) {
            assert_eq!(pair[1].end_date + Duration::days(1), pair[0].start_date);
        }

        let mut day = date(2024, 1, 1);
        while day <= date(2024, 12, 31) {
            let matches = periods.iter().filter(|p| p.contains(day)).count();
            assert_eq!(matches, 1, "{day} should be in exactly one period");
            day += Duration::days(1);
        }
    }

    #[test]
    fn test_assign_cleanings_includes_boundary_days() {
        let today = date(2025, 12, 17);
        let reservations = vec![
            reservation("a", date(2025, 12, 12), date(2025, 12, 15)),
            reservation("b", date(2025, 12, 15), date(2025, 12, 16)),
            reservation("c", date(2025, 11, 27), date(2025, 12, 1)),
            reservation("d", date(2025, 11, 25), date(2025, 11, 30)),
            reservation("future", date(2025, 12, 18), date(2025, 12, 20)),
        ];

        let periods = cleaning_history(&reservations, today, HISTORY_PERIODS, Locale::English);

        let checkouts = |i: usize| -> Vec<NaiveDate> {
            periods[i].cleanings.iter().map(|c| c.checkout()).collect()
        };
        assert_eq!(checkouts(0), vec![date(2025, 12, 16)]);
        assert_eq!(checkouts(1), vec![date(2025, 12, 15), date(2025, 12, 1)]);
        assert_eq!(checkouts(2), vec![date(2025, 11, 30)]);
        assert_eq!(total_cleanings(&periods), 4);
    }

    #[test]
    fn test_cleanings_older_than_history_are_dropped() {
        let reservations = vec![reservation("old", date(2023, 5, 1), date(2023, 5, 4))];
        let periods = cleaning_history(&reservations, date(2025, 12, 17), HISTORY_PERIODS, Locale::English);
        assert_eq!(periods.len(), HISTORY_PERIODS);
        assert_eq!(total_cleanings(&periods), 0);
    }

    #[test]
    fn test_empty_history_still_has_all_periods() {
        let periods = cleaning_history(&[], date(2025, 6, 1), HISTORY_PERIODS, Locale::Spanish);
        assert_eq!(periods.len(), HISTORY_PERIODS);
        assert_eq!(periods[0].label, "1-15 junio 2025");
    }

    #[test]
    fn test_cleaning_history_honors_count() {
        let reservations = vec![
            reservation("recent", date(2025, 12, 2), date(2025, 12, 5)),
            reservation("summer", date(2025, 7, 1), date(2025, 7, 4)),
        ];
        let periods = cleaning_history(&reservations, date(2025, 12, 17), 4, Locale::English);

        assert_eq!(periods.len(), 4);
        assert_eq!(periods[3].start_date, date(2025, 11, 1));
        assert_eq!(total_cleanings(&periods), 1);
    }

    #[test]
    fn test_period_serializes_camel_case() {
        let periods = half_month_periods(date(2025, 12, 17), 1, Locale::English);
        let json = serde_json::to_value(&periods[0]).unwrap();
        assert_eq!(json["startDate"], "2025-12-16");
        assert_eq!(json["endDate"], "2025-12-31");
        assert_eq!(json["label"], "16-31 December 2025");
    }
}
