//! Firescope: a small console for a hosted content-extraction API
//!
//! This crate submits a URL to a Firecrawl-compatible service and either
//! extracts that single page or starts a site crawl job, polling it until the
//! job reaches a terminal status.

pub mod api;
pub mod config;
pub mod job;
pub mod output;
pub mod request;
pub mod session;

use thiserror::Error;

/// Main error type for Firescope operations
#[derive(Debug, Error)]
pub enum FirescopeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] api::ApiError),

    #[error("{0}")]
    Url(#[from] UrlError),

    #[error("Crawl failed")]
    CrawlFailed,

    #[error("Crawl {id} did not finish within {waited_secs}s")]
    PollTimeout { id: String, waited_secs: u64 },

    #[error("Polling for crawl {id} was cancelled")]
    PollCancelled { id: String },

    #[error("No crawl is being polled")]
    NoActiveJob,

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("No API key configured (set api-key or {})", config::API_KEY_ENV)]
    MissingApiKey,
}

/// Errors for the URL a user submits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL is required")]
    Empty,

    #[error("Please enter a valid URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Firescope operations
pub type Result<T> = std::result::Result<T, FirescopeError>;

// Re-export commonly used types
pub use api::{ApiClient, CrawlService};
pub use config::Config;
pub use job::{JobStatus, PollHandle, PollState, Poller};
pub use request::{JobRequest, Mode};
pub use session::{DisplayedResult, Session, ViewState};
