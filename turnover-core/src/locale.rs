//! Human-readable date labels in English and Spanish.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl Locale {
    /// Parse a locale code such as `en`, `es` or `es-ES`.
    pub fn from_code(code: &str) -> Option<Locale> {
        let lang = code.split(['-', '_']).next()?.to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::English),
            "es" => Some(Locale::Spanish),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Spanish => "es",
        }
    }

    fn chrono_locale(self) -> chrono::Locale {
        match self {
            Locale::English => chrono::Locale::en_US,
            Locale::Spanish => chrono::Locale::es_ES,
        }
    }

    /// Format `date` with a strftime pattern using this locale's names.
    pub fn format(self, date: NaiveDate, pattern: &str) -> String {
        date.format_localized(pattern, self.chrono_locale()).to_string()
    }

    /// Full name of the month `date` falls in, e.g. "December" or "diciembre".
    pub fn month_name(self, date: NaiveDate) -> String {
        self.format(date, "%B")
    }

    /// e.g. "Saturday, 20 December 2025" or "sábado, 20 de diciembre de 2025"
    pub fn long_date(self, date: NaiveDate) -> String {
        let pattern = match self {
            Locale::English => "%A, %-d %B %Y",
            Locale::Spanish => "%A, %-d de %B de %Y",
        };
        self.format(date, pattern)
    }

    /// e.g. "Sat, 20 Dec" or "sáb, 20 dic"
    pub fn short_date(self, date: NaiveDate) -> String {
        self.format(date, "%a, %-d %b")
    }

    /// Relative label for a cleaning `days_from_now` days away. Only the
    /// coming week gets one.
    pub fn day_label(self, days_from_now: i64) -> Option<String> {
        match (self, days_from_now) {
            (Locale::English, 0) => Some("Today".to_string()),
            (Locale::English, 1) => Some("Tomorrow".to_string()),
            (Locale::English, 2..=6) => Some(format!("In {days_from_now} days")),
            (Locale::Spanish, 0) => Some("Hoy".to_string()),
            (Locale::Spanish, 1) => Some("Mañana".to_string()),
            (Locale::Spanish, 2..=6) => Some(format!("En {days_from_now} días")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_date() {
        let d = date(2025, 12, 20);
        assert_eq!(Locale::English.long_date(d), "Saturday, 20 December 2025");
        assert_eq!(Locale::Spanish.long_date(d), "sábado, 20 de diciembre de 2025");
    }

    #[test]
    fn test_short_date() {
        let d = date(2025, 12, 20);
        assert_eq!(Locale::English.short_date(d), "Sat, 20 Dec");
        assert_eq!(Locale::Spanish.short_date(d), "sáb, 20 dic");
    }

    #[test]
    fn test_single_digit_days_are_not_padded() {
        let d = date(2026, 1, 5);
        assert_eq!(Locale::English.long_date(d), "Monday, 5 January 2026");
        assert_eq!(Locale::Spanish.long_date(d), "lunes, 5 de enero de 2026");
        assert_eq!(Locale::English.short_date(d), "Mon, 5 Jan");
    }

    #[test]
    fn test_month_name() {
        let d = date(2025, 6, 1);
        assert_eq!(Locale::English.month_name(d), "June");
        assert_eq!(Locale::Spanish.month_name(d), "junio");
    }

    #[test]
    fn test_day_label() {
        assert_eq!(Locale::English.day_label(0).as_deref(), Some("Today"));
        assert_eq!(Locale::Spanish.day_label(1).as_deref(), Some("Mañana"));
        assert_eq!(Locale::Spanish.day_label(6).as_deref(), Some("En 6 días"));
        assert_eq!(Locale::English.day_label(7), None);
        assert_eq!(Locale::English.day_label(-2), None);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("es-ES"), Some(Locale::Spanish));
        assert_eq!(Locale::from_code("EN"), Some(Locale::English));
        assert_eq!(Locale::from_code("fr"), None);
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Locale::Spanish).unwrap(), "\"es\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::English);
    }
}
