use anyhow::Result;
use owo_colors::OwoColorize;
use turnover_core::period::total_cleanings;
use turnover_core::{Locale, cleaning_history};

use super::Context;
use crate::render::Render;

pub async fn run(ctx: &Context, all: bool, json: bool) -> Result<()> {
    let data = ctx.load().await?;
    let today = ctx.today();

    let periods = cleaning_history(&data.reservations, today, ctx.config.history_periods, ctx.locale);

    if json {
        println!("{}", serde_json::to_string_pretty(&periods)?);
        return Ok(());
    }

    let total = total_cleanings(&periods);
    let summary = match (ctx.locale, total) {
        (Locale::English, 1) => "1 past cleaning".to_string(),
        (Locale::English, n) => format!("{n} past cleanings"),
        (Locale::Spanish, 1) => "1 limpieza registrada".to_string(),
        (Locale::Spanish, n) => format!("{n} limpiezas registradas"),
    };
    println!("{}", summary.bold());

    for period in periods.iter().filter(|p| all || !p.is_empty()) {
        println!();
        println!("{}", period.render(ctx.locale));
    }

    Ok(())
}
