mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use turnover_core::config::Config;
use turnover_core::date::parse_iso_date;
use turnover_core::{FeedClient, Locale};

use crate::commands::Context;
use crate::commands::upcoming::UPCOMING_LIST_LIMIT;

#[derive(Parser)]
#[command(name = "turnover")]
#[command(about = "Cleaning schedule for a short-term rental, from its iCalendar feed")]
struct Cli {
    /// Read the feed from a local .ics file instead of the configured URL
    #[arg(long, global = true, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Feed URL (overrides feed_url from the config)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Label language: en or es
    #[arg(long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upcoming cleanings, next one first
    Upcoming {
        /// Print the cleanings as JSON
        #[arg(long)]
        json: bool,

        /// How many cleanings to list after the next one
        #[arg(long, default_value_t = UPCOMING_LIST_LIMIT)]
        limit: usize,
    },
    /// Idle gaps after upcoming cleanings that could get a last-minute booking
    Gaps {
        /// Only cleanings at most this many days away (defaults to gap_alert_days, at most 10)
        #[arg(long)]
        within: Option<i64>,
    },
    /// Past cleanings grouped by half-month
    History {
        /// Also show periods without cleanings
        #[arg(long)]
        all: bool,

        /// Print the periods as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reservations read from the feed
    Reservations {
        /// Also list VEVENT blocks that were dropped, with the reason
        #[arg(long)]
        rejected: bool,
    },
    /// Keep the upcoming cleanings on screen, refreshing periodically
    Watch {
        /// Seconds between refreshes (defaults to refresh_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Show the config location and feed
    Config {
        /// Write a commented default config file
        #[arg(long)]
        init: bool,
    },
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    parse_iso_date(s).map_err(|e| e.to_string())
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::from_code(s).ok_or_else(|| format!("Unsupported locale '{}'. Use en or es", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    if let Commands::Config { init } = cli.command {
        let source = config.feed_source(cli.file, cli.url.as_deref()).ok();
        return commands::config::run(&config, source.as_ref(), init);
    }

    let source = config.feed_source(cli.file, cli.url.as_deref())?;
    let client = FeedClient::new(source, config.cache_ttl()).context("Failed to create HTTP client")?;
    let ctx = Context {
        locale: cli.locale.unwrap_or(config.locale),
        pinned_today: cli.today,
        config,
        client,
    };

    match cli.command {
        Commands::Upcoming { json, limit } => commands::upcoming::run(&ctx, json, limit).await,
        Commands::Gaps { within } => commands::gaps::run(&ctx, within).await,
        Commands::History { all, json } => commands::history::run(&ctx, all, json).await,
        Commands::Reservations { rejected } => commands::reservations::run(&ctx, rejected).await,
        Commands::Watch { interval } => commands::watch::run(&ctx, interval).await,
        Commands::Config { .. } => unreachable!("handled before the feed is set up"),
    }
}
