use std::sync::Arc;

use anyhow::{Context, Result};
use turnover_core::config::Config;
use turnover_core::{FeedClient, Locale};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    feed: Arc<FeedClient>,
    pub locale: Locale,
    pub gap_alert_days: i64,
    pub history_periods: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let source = config.feed_source(None, None)?;
        let client = FeedClient::new(source, config.cache_ttl()).context("Failed to create HTTP client")?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: FeedClient, config: &Config) -> Self {
        AppState {
            feed: Arc::new(client),
            locale: config.locale,
            gap_alert_days: config.gap_alert_days(),
            history_periods: config.history_periods,
        }
    }

    pub fn feed(&self) -> &FeedClient {
        &self.feed
    }
}
