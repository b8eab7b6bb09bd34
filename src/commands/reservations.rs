use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::Render;

pub async fn run(ctx: &Context, show_rejected: bool) -> Result<()> {
    let data = ctx.load().await?;

    if data.reservations.is_empty() {
        println!("{}", "No reservations in the feed".dimmed());
    }
    for reservation in &data.reservations {
        println!("{}", reservation.render(ctx.locale));
    }

    if show_rejected && !data.rejected.is_empty() {
        println!();
        println!("{}", "Dropped blocks:".dimmed());
        for block in &data.rejected {
            println!("   {}", block.render(ctx.locale));
        }
    } else if !data.rejected.is_empty() {
        let hint = format!(
            "({} blocks dropped, see --rejected)",
            data.rejected.len()
        );
        println!("{}", hint.dimmed());
    }

    Ok(())
}
