use anyhow::Result;
use owo_colors::OwoColorize;
use turnover_core::schedule::GAP_ALERT_HORIZON_DAYS;
use turnover_core::{Locale, gap_alerts, upcoming_cleanings};

use super::Context;
use crate::render::gap_text;

pub async fn run(ctx: &Context, within: Option<i64>) -> Result<()> {
    let data = ctx.load().await?;
    let today = ctx.today();
    let cleanings = upcoming_cleanings(&data.reservations, today);
    let days = within.map_or(ctx.config.gap_alert_days(), |d| d.min(GAP_ALERT_HORIZON_DAYS));
    let alerts = gap_alerts(&cleanings, days);

    if alerts.is_empty() {
        let empty = match ctx.locale {
            Locale::English => "No gaps in the coming days",
            Locale::Spanish => "No hay huecos en los próximos días",
        };
        println!("{}", empty.dimmed());
        return Ok(());
    }

    for alert in alerts {
        let checkout = ctx.locale.short_date(alert.checkout());
        println!("{}  {}", checkout.bold(), gap_text(alert, ctx.locale).yellow());
    }

    Ok(())
}
