//! Fetching the station feed
//!
//! A single GET per session, no retry and no pagination. The outcome is kept as
//! a [`FeedState`] so callers can tell a pending fetch from a failed one.

use crate::core::config::DashboardConfig;
use crate::data::feed::{parse_feed_lenient, StationReading};
use crate::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Shared async HTTP client with a crate User-Agent. Building the client once
/// avoids the cost of TLS and connection pool setup per request.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(crate::core::constants::DEFAULT_USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Anything that can produce the current list of station readings.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<StationReading>>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Reads the feed from an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    url: String,
    timeout: Duration,
    client: Client,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(crate::core::constants::DEFAULT_REQUEST_TIMEOUT_SECS),
            client: HTTP_CLIENT.clone(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            url: config.feed_url.clone(),
            timeout: config.request_timeout(),
            client,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<Vec<StationReading>> {
        log::info!("fetching station feed from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        log::debug!("downloaded {} bytes from {}", body.len(), self.url);

        parse_feed_lenient(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Readings already in memory, e.g. a saved feed document.
#[derive(Debug, Clone, Default)]
pub struct StaticFeedSource {
    readings: Vec<StationReading>,
}

impl StaticFeedSource {
    pub fn new(readings: Vec<StationReading>) -> Self {
        Self { readings }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_feed_lenient(json)?))
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch(&self) -> Result<Vec<StationReading>> {
        Ok(self.readings.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory readings", self.readings.len())
    }
}

/// Where the session's single fetch stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedState {
    #[default]
    Pending,
    Loaded(Vec<StationReading>),
    Failed(String),
}

impl FeedState {
    pub fn readings(&self) -> &[StationReading] {
        match self {
            Self::Loaded(readings) => readings,
            _ => &[],
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Runs the fetch and records the outcome. An empty feed counts as a failure
/// since nothing can be shown or fitted.
pub async fn load_feed(source: &dyn FeedSource) -> FeedState {
    match source.fetch().await {
        Ok(readings) if readings.is_empty() => {
            log::warn!("feed from {} contained no stations", source.describe());
            FeedState::Failed("feed contained no stations".to_string())
        }
        Ok(readings) => {
            log::info!("loaded {} stations from {}", readings.len(), source.describe());
            FeedState::Loaded(readings)
        }
        Err(e) => {
            log::warn!("feed fetch from {} failed: {}", source.describe(), e);
            FeedState::Failed(e.to_string())
        }
    }
}
