use anyhow::Result;
use owo_colors::OwoColorize;
use turnover_core::{CleaningEvent, Locale, gap_alerts, next_cleaning, upcoming_cleanings};

use super::Context;
use crate::render::Render;

/// Cleanings listed after the next one.
pub const UPCOMING_LIST_LIMIT: usize = 10;

pub async fn run(ctx: &Context, json: bool, limit: usize) -> Result<()> {
    let data = ctx.load().await?;
    let cleanings = upcoming_cleanings(&data.reservations, ctx.today());

    if json {
        println!("{}", serde_json::to_string_pretty(&cleanings)?);
        return Ok(());
    }

    print!("{}", render_upcoming(&cleanings, ctx.locale, ctx.config.gap_alert_days(), limit));
    Ok(())
}

/// The upcoming view: next cleaning, up to `limit` of the following ones,
/// and a gap summary.
pub fn render_upcoming(
    cleanings: &[CleaningEvent],
    locale: Locale,
    gap_alert_days: i64,
    limit: usize,
) -> String {
    let Some((next, following)) = next_cleaning(cleanings) else {
        let empty = match locale {
            Locale::English => "No upcoming cleanings",
            Locale::Spanish => "No hay limpiezas programadas",
        };
        return format!("{}\n", empty.dimmed());
    };

    let heading = match locale {
        Locale::English => "Next cleaning",
        Locale::Spanish => "Próxima limpieza",
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n  {}\n\n", heading.bold(), next.render(locale)));

    if !following.is_empty() && limit > 0 {
        let shown = following.len().min(limit);
        let heading = match locale {
            Locale::English => format!("Following {shown}"),
            Locale::Spanish => format!("Siguientes {shown}"),
        };
        out.push_str(&format!("{}\n", heading.bold()));
        for cleaning in following.iter().take(limit) {
            out.push_str(&format!("  {}\n", cleaning.render(locale)));
        }
    }

    let alerts = gap_alerts(cleanings, gap_alert_days).len();
    if alerts > 0 {
        let summary = match (locale, alerts) {
            (Locale::English, 1) => "1 gap could get a last-minute booking".to_string(),
            (Locale::English, n) => format!("{n} gaps could get a last-minute booking"),
            (Locale::Spanish, 1) => "1 hueco podría recibir una reserva de última hora".to_string(),
            (Locale::Spanish, n) => format!("{n} huecos podrían recibir una reserva de última hora"),
        };
        out.push_str(&format!("\n{}\n", summary.yellow()));
    }

    out
}
