use serde::Deserialize;
use std::time::Duration;

/// Base endpoint of the hosted extraction service
pub const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/v1";

/// Output formats requested when none are configured
pub const DEFAULT_FORMATS: [&str; 2] = ["markdown", "html"];

/// Page-count limit sent with every crawl request
pub const DEFAULT_CRAWL_LIMIT: u32 = 100;

/// Time between two crawl status checks
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Main configuration structure for Firescope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub scrape: ScrapeConfig,
    pub crawl: CrawlConfig,
}

/// Connection settings for the extraction service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL all endpoints are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Bearer credential; the environment takes precedence when set
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Single-page extraction settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Output formats requested from the service
    pub formats: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Crawl job settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Maximum number of pages the service may crawl
    pub limit: u32,

    /// Output formats requested for every crawled page
    pub formats: Vec<String>,

    /// Interval between status checks (milliseconds)
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,

    /// Give up polling after this many seconds; unbounded when absent
    #[serde(rename = "max-wait-secs")]
    pub max_wait_secs: Option<u64>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_CRAWL_LIMIT,
            formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_wait_secs: None,
        }
    }
}

impl CrawlConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_secs.map(Duration::from_secs)
    }
}
