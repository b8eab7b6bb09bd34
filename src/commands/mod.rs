pub mod config;
pub mod gaps;
pub mod history;
pub mod reservations;
pub mod upcoming;
pub mod watch;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use turnover_core::config::Config;
use turnover_core::{CalendarData, FeedClient, Locale};

use crate::utils::tui::create_spinner;

/// Everything a command needs, set up once in `main`.
pub struct Context {
    pub config: Config,
    pub client: FeedClient,
    pub locale: Locale,
    /// Set by `--today`; otherwise the local calendar date is used.
    pub pinned_today: Option<NaiveDate>,
}

impl Context {
    /// The reference date for one derivation. Call once per pass.
    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Fetch and parse the feed, with a spinner while waiting.
    pub async fn load(&self) -> Result<CalendarData> {
        let spinner = create_spinner(format!("Fetching {}", self.client.source()));
        let result = self.client.load().await;
        spinner.finish_and_clear();

        result.context("Could not load the calendar")
    }
}
