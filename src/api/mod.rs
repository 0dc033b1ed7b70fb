//! Client for the hosted content-extraction service
//!
//! This module contains everything that talks to the remote API:
//! - Request and response payload types
//! - The HTTP dispatcher with bearer authentication
//! - Error classification for failed calls
//! - The `CrawlService` trait the poller and session are written against

mod client;
mod types;

#[cfg(test)]
pub(crate) mod scripted;

pub use client::{build_http_client, ApiClient, CrawlService};
pub use types::{
    CrawlRequest, CrawlStarted, CrawlStatus, Document, Metadata, ScrapeOptions, ScrapeRequest,
    ScrapeResponse,
};

use thiserror::Error;

/// Message shown for failures that carry no explanation of their own
pub const GENERIC_ERROR: &str = "An error occurred";

/// Fallback when a failed scrape response has no message
pub const SCRAPE_FAILED: &str = "Failed to scrape URL";

/// Fallback when a failed crawl-start response has no message
pub const CRAWL_START_FAILED: &str = "Failed to start crawl";

/// Fallback when a failed status response has no message
pub const CRAWL_STATUS_FAILED: &str = "Failed to fetch crawl status";

/// Errors returned by calls to the extraction service
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The request never produced a response
    #[error("{}", GENERIC_ERROR)]
    Transport(#[source] reqwest::Error),

    /// A success response whose body could not be understood
    #[error("{}", GENERIC_ERROR)]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a service error, if there was a response at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}
