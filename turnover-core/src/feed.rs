//! Retrieval of the reservation feed.
//!
//! The feed is fetched over HTTP (or read from a local file) and kept in
//! memory for a few minutes, so repeated requests don't hammer the booking
//! platform.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{TurnoverError, TurnoverResult};
use crate::ics::{RejectedBlock, Reservation, parse_feed};

/// How long a fetched feed is reused.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the iCalendar feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    /// A remote feed. `webcal://` links are fetched over HTTPS.
    pub fn url(raw: &str) -> Self {
        let url = match raw.strip_prefix("webcal://") {
            Some(rest) => format!("https://{rest}"),
            None => raw.to_string(),
        };
        FeedSource::Url(url)
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Url(url) => write!(f, "{url}"),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reservations of one feed retrieval, sorted by checkout date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarData {
    pub reservations: Vec<Reservation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedBlock>,
    pub fetched_at: DateTime<Utc>,
}

impl CalendarData {
    pub fn from_text(text: &str, fetched_at: DateTime<Utc>) -> Self {
        let feed = parse_feed(text);
        let mut reservations = feed.reservations;
        reservations.sort_by_key(|r| r.end);

        if !feed.rejected.is_empty() {
            tracing::debug!(count = feed.rejected.len(), "feed contained unusable VEVENT blocks");
        }

        CalendarData {
            reservations,
            rejected: feed.rejected,
            fetched_at,
        }
    }
}

struct CachedFeed {
    text: String,
    fetched_at: DateTime<Utc>,
    loaded: Instant,
}

/// Fetches the feed and caches the last successful response.
pub struct FeedClient {
    http: reqwest::Client,
    source: FeedSource,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedFeed>>,
}

impl FeedClient {
    pub fn new(source: FeedSource, cache_ttl: Duration) -> TurnoverResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("turnover/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self::with_http(http, source, cache_ttl))
    }

    /// Use an already configured HTTP client.
    pub fn with_http(http: reqwest::Client, source: FeedSource, cache_ttl: Duration) -> Self {
        FeedClient {
            http,
            source,
            cache_ttl,
            cache: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Raw feed text and the time it was retrieved. Served from cache while
    /// younger than the TTL.
    pub async fn fetch_text(&self) -> TurnoverResult<(String, DateTime<Utc>)> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if cached.loaded.elapsed() < self.cache_ttl {
                tracing::trace!(source = %self.source, "serving cached feed");
                return Ok((cached.text.clone(), cached.fetched_at));
            }
        }

        let text = self.retrieve().await?;
        let fetched_at = Utc::now();
        tracing::debug!(source = %self.source, bytes = text.len(), "feed retrieved");

        *cache = Some(CachedFeed {
            text: text.clone(),
            fetched_at,
            loaded: Instant::now(),
        });

        Ok((text, fetched_at))
    }

    /// Fetch (or reuse) the feed and parse it.
    pub async fn load(&self) -> TurnoverResult<CalendarData> {
        let (text, fetched_at) = self.fetch_text().await?;
        Ok(CalendarData::from_text(&text, fetched_at))
    }

    /// Drop the cached feed so the next load retrieves it again.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    async fn retrieve(&self) -> TurnoverResult<String> {
        match &self.source {
            FeedSource::Url(url) => {
                let response = self.http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(TurnoverError::Fetch(format!("HTTP {status} from {url}")));
                }
                Ok(response.text().await?)
            }
            FeedSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| TurnoverError::Fetch(format!("{}: {e}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const FEED: &str = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\nDTSTART;VALUE=DATE:20251222\nDTEND;VALUE=DATE:20251225\nUID:b\nEND:VEVENT\n\
BEGIN:VEVENT\nDTSTART;VALUE=DATE:20251215\nDTEND;VALUE=DATE:20251218\nUID:a\nEND:VEVENT\n\
BEGIN:VEVENT\nDTSTART;VALUE=DATE:20251215\nUID:broken\nEND:VEVENT\n\
END:VCALENDAR\n";

    fn feed_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    /// Answer the first connection on a local port with `status` and `body`.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/calendar\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/listing.ics")
    }

    fn url_client(url: String) -> FeedClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        FeedClient::with_http(http, FeedSource::Url(url), DEFAULT_CACHE_TTL)
    }

    #[test]
    fn test_webcal_urls_use_https() {
        assert_eq!(
            FeedSource::url("webcal://example.com/cal.ics"),
            FeedSource::Url("https://example.com/cal.ics".to_string())
        );
        assert_eq!(
            FeedSource::url("https://example.com/cal.ics"),
            FeedSource::Url("https://example.com/cal.ics".to_string())
        );
    }

    #[test]
    fn test_calendar_data_sorts_by_checkout() {
        let data = CalendarData::from_text(FEED, Utc::now());
        let uids: Vec<_> = data.reservations.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "b"]);
        assert_eq!(data.rejected.len(), 1);
        assert_eq!(data.rejected[0].uid.as_deref(), Some("broken"));
    }

    #[test]
    fn test_calendar_data_json_shape() {
        let data = CalendarData::from_text("", Utc::now());
        let json = serde_json::to_value(&data).unwrap();
        assert!(json["reservations"].as_array().unwrap().is_empty());
        assert!(json.get("rejected").is_none());
        assert!(json["fetchedAt"].is_string());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let file = feed_file(FEED);
        let client = FeedClient::new(FeedSource::File(file.path().to_path_buf()), DEFAULT_CACHE_TTL).unwrap();

        let data = client.load().await.unwrap();
        assert_eq!(data.reservations.len(), 2);
    }

    #[tokio::test]
    async fn test_cache_is_reused_until_invalidated() {
        let file = feed_file(FEED);
        let client = FeedClient::new(FeedSource::File(file.path().to_path_buf()), DEFAULT_CACHE_TTL).unwrap();

        let first = client.load().await.unwrap();
        std::fs::write(file.path(), "").unwrap();

        let cached = client.load().await.unwrap();
        assert_eq!(cached.reservations.len(), 2);
        assert_eq!(cached.fetched_at, first.fetched_at);

        client.invalidate().await;
        let fresh = client.load().await.unwrap();
        assert!(fresh.reservations.is_empty());
    }

    #[tokio::test]
    async fn test_zero_ttl_always_retrieves() {
        let file = feed_file(FEED);
        let client = FeedClient::new(FeedSource::File(file.path().to_path_buf()), Duration::ZERO).unwrap();

        assert_eq!(client.load().await.unwrap().reservations.len(), 2);
        std::fs::write(file.path(), "").unwrap();
        assert!(client.load().await.unwrap().reservations.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_a_fetch_error() {
        let client = FeedClient::new(
            FeedSource::File(PathBuf::from("/nonexistent/turnover/feed.ics")),
            DEFAULT_CACHE_TTL,
        )
        .unwrap();

        let err = client.load().await.unwrap_err();
        assert!(matches!(err, TurnoverError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_load_over_http() {
        let client = url_client(serve_once("200 OK", FEED).await);

        let data = client.load().await.unwrap();
        let uids: Vec<_> = data.reservations.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "b"]);
        assert_eq!(data.reservations[0].end, chrono::NaiveDate::from_ymd_opt(2025, 12, 18).unwrap());
    }

    #[tokio::test]
    async fn test_http_error_status_is_a_fetch_error() {
        let client = url_client(serve_once("404 Not Found", "").await);

        let err = client.load().await.unwrap_err();
        match err {
            TurnoverError::Fetch(message) => assert!(message.contains("404"), "{message}"),
            other => panic!("expected a fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = url_client(format!("http://{addr}/listing.ics"));
        assert!(matches!(client.load().await, Err(TurnoverError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let client = url_client(serve_once("503 Service Unavailable", "").await);
        assert!(client.load().await.is_err());
        assert!(client.cache.lock().await.is_none());
    }
}
