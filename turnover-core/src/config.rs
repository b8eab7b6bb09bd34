//! turnover configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{TurnoverError, TurnoverResult};
use crate::feed::FeedSource;
use crate::locale::Locale;
use crate::period::HISTORY_PERIODS;
use crate::schedule::GAP_ALERT_HORIZON_DAYS;

/// Environment variable overriding `feed_url`.
pub const FEED_URL_ENV: &str = "TURNOVER_FEED_URL";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4097;

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_refresh_interval_secs() -> u64 {
    300
}

fn default_gap_alert_days() -> i64 {
    GAP_ALERT_HORIZON_DAYS
}

fn default_history_periods() -> usize {
    HISTORY_PERIODS
}

/// Configuration at ~/.config/turnover/config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// iCalendar export URL of the listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    #[serde(default)]
    pub locale: Locale,

    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// How often `turnover watch` re-polls the feed
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Gap alerts are listed for cleanings at most this many days away.
    /// Gaps are never flagged beyond [`GAP_ALERT_HORIZON_DAYS`], so larger
    /// values act as the horizon; read it through [`Config::gap_alert_days`].
    #[serde(default = "default_gap_alert_days")]
    pub gap_alert_days: i64,

    #[serde(default = "default_history_periods")]
    pub history_periods: usize,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            feed_url: None,
            locale: Locale::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            gap_alert_days: default_gap_alert_days(),
            history_periods: default_history_periods(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> TurnoverResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TurnoverError::Config("Could not determine config directory".into()))?
            .join("turnover");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file (defaults when it doesn't exist), then apply the
    /// environment override for the feed URL.
    pub fn load() -> TurnoverResult<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(url) = std::env::var(FEED_URL_ENV) {
            if !url.trim().is_empty() {
                config.feed_url = Some(url);
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> TurnoverResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| TurnoverError::Config(format!("{}: {e}", path.display())))?;

        if config.gap_alert_days > GAP_ALERT_HORIZON_DAYS {
            tracing::warn!(
                gap_alert_days = config.gap_alert_days,
                max = GAP_ALERT_HORIZON_DAYS,
                "gap_alert_days is above the gap horizon, using the horizon"
            );
        }
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// `gap_alert_days`, capped at [`GAP_ALERT_HORIZON_DAYS`].
    pub fn gap_alert_days(&self) -> i64 {
        self.gap_alert_days.min(GAP_ALERT_HORIZON_DAYS)
    }

    /// The feed to read: explicit overrides first, then `feed_url`.
    pub fn feed_source(
        &self,
        file_override: Option<PathBuf>,
        url_override: Option<&str>,
    ) -> TurnoverResult<FeedSource> {
        if let Some(path) = file_override {
            return Ok(FeedSource::File(path));
        }
        match url_override.or(self.feed_url.as_deref()) {
            Some(url) => Ok(FeedSource::url(url)),
            None => Err(TurnoverError::Config(format!(
                "No feed configured. Set feed_url in the config file or {FEED_URL_ENV}"
            ))),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TurnoverResult<()> {
        let contents = format!(
            "\
# turnover configuration

# iCalendar export link of the listing:
# feed_url = \"https://www.airbnb.com/calendar/ical/<listing>.ics?s=<secret>\"

# Labels language (\"en\" or \"es\"):
# locale = \"en\"

# Seconds a fetched feed is reused:
# cache_ttl_secs = {}

# Seconds between refreshes in `turnover watch`:
# refresh_interval_secs = {}

# Only flag gaps after cleanings this many days away (at most {}):
# gap_alert_days = {}

# Half-month periods in the history view:
# history_periods = {}

# [server]
# host = \"{}\"
# port = {}
",
            default_cache_ttl_secs(),
            default_refresh_interval_secs(),
            GAP_ALERT_HORIZON_DAYS,
            default_gap_alert_days(),
            default_history_periods(),
            DEFAULT_HOST,
            DEFAULT_PORT,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TurnoverError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TurnoverError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
