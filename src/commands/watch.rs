use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use turnover_core::upcoming_cleanings;

use super::Context;
use super::upcoming::{UPCOMING_LIST_LIMIT, render_upcoming};

const MIN_INTERVAL_SECS: u64 = 10;

pub async fn run(ctx: &Context, interval: Option<u64>) -> Result<()> {
    let secs = interval
        .unwrap_or(ctx.config.refresh_interval_secs)
        .max(MIN_INTERVAL_SECS);
    let interval = Duration::from_secs(secs);

    loop {
        // Each cycle gets a fresh feed and a fresh reference date.
        ctx.client.invalidate().await;
        let today = ctx.today();

        // Clear screen, cursor home.
        print!("\x1b[2J\x1b[H");
        match ctx.client.load().await {
            Ok(data) => {
                let cleanings = upcoming_cleanings(&data.reservations, today);
                let gap_alert_days = ctx.config.gap_alert_days();
                print!(
                    "{}",
                    render_upcoming(&cleanings, ctx.locale, gap_alert_days, UPCOMING_LIST_LIMIT)
                );
                let updated = data.fetched_at.with_timezone(&chrono::Local).format("%H:%M:%S");
                println!("\n{}", format!("Updated {updated}, every {secs}s. Ctrl-C to stop.").dimmed());
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                println!("{}", format!("Could not load the calendar: {e}").red());
                println!("{}", format!("Retrying in {secs}s").dimmed());
            }
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    Ok(())
}
