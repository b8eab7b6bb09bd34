//! Terminal rendering for turnover-core types.
//!
//! Extension trait that adds colored output with owo_colors. Labels follow
//! the selected locale.

use owo_colors::OwoColorize;
use turnover_core::schedule::CLEANING_WINDOW;
use turnover_core::{CleaningEvent, HalfMonthPeriod, Locale, RejectedBlock, Reservation};

pub trait Render {
    fn render(&self, locale: Locale) -> String;
}

impl Render for CleaningEvent {
    fn render(&self, locale: Locale) -> String {
        let date = locale.long_date(self.checkout());
        let date = if self.is_today {
            date.green().bold().to_string()
        } else {
            date.bold().to_string()
        };

        let mut line = format!("{}  {}", date, CLEANING_WINDOW.dimmed());
        if let Some(label) = locale.day_label(self.days_from_now) {
            line.push_str(&format!("  {}", label.cyan()));
        }
        if self.has_gap_after {
            line.push_str(&format!("  {}", gap_text(self, locale).yellow()));
        }
        line
    }
}

/// "2 open nights until Mon, 22 Dec"
pub fn gap_text(cleaning: &CleaningEvent, locale: Locale) -> String {
    let until = locale.short_date(cleaning.gap_date());
    match (locale, cleaning.gap_days) {
        (Locale::English, 1) => format!("1 open night until {until}"),
        (Locale::English, n) => format!("{n} open nights until {until}"),
        (Locale::Spanish, 1) => format!("1 noche libre hasta {until}"),
        (Locale::Spanish, n) => format!("{n} noches libres hasta {until}"),
    }
}

impl Render for HalfMonthPeriod {
    fn render(&self, locale: Locale) -> String {
        let count = self.cleanings.len();
        let noun = match (locale, count) {
            (Locale::English, 1) => "cleaning",
            (Locale::English, _) => "cleanings",
            (Locale::Spanish, 1) => "limpieza",
            (Locale::Spanish, _) => "limpiezas",
        };
        let header = format!("{}  {}", self.label.bold(), format!("{count} {noun}").dimmed());

        let mut lines = vec![header];
        for cleaning in &self.cleanings {
            lines.push(format!("   {}", locale.short_date(cleaning.checkout())));
        }
        lines.join("\n")
    }
}

impl Render for Reservation {
    fn render(&self, _locale: Locale) -> String {
        format!(
            "{} -> {}  {}  {}",
            self.start,
            self.end.bold(),
            self.summary,
            format!("[{}]", self.uid).dimmed()
        )
    }
}

impl Render for RejectedBlock {
    fn render(&self, _locale: Locale) -> String {
        let uid = self.uid.as_deref().unwrap_or("no UID");
        format!("#{} {}: {}", self.index, uid, self.reason.red())
    }
}
