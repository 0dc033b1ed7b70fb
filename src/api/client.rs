//! HTTP dispatcher for the extraction service
//!
//! Every call is a single request with a bearer credential. Failures are
//! classified as:
//! - service errors (non-2xx), carrying the body's `message` or a fallback
//! - transport errors (no response at all)
//! - decode errors (a 2xx body that does not match the expected shape)

use crate::api::types::{
    CrawlRequest, CrawlStarted, CrawlStatus, ScrapeOptions, ScrapeRequest, ScrapeResponse,
};
use crate::api::{ApiError, CRAWL_START_FAILED, CRAWL_STATUS_FAILED, SCRAPE_FAILED};
use crate::config::{ApiConfig, CrawlConfig, ScrapeConfig};
use crate::request::JobRequest;
use crate::{ConfigError, FirescopeError};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use url::Url;

/// Operations the session and poller need from the extraction service
///
/// `ApiClient` is the real implementation; tests substitute scripted ones.
pub trait CrawlService: Send + Sync + 'static {
    /// Extracts a single page
    fn scrape(
        &self,
        request: &JobRequest,
        options: &ScrapeConfig,
    ) -> impl Future<Output = Result<ScrapeResponse, ApiError>> + Send;

    /// Starts a crawl job and returns its handle
    fn start_crawl(
        &self,
        request: &JobRequest,
        options: &CrawlConfig,
    ) -> impl Future<Output = Result<CrawlStarted, ApiError>> + Send;

    /// Fetches the current state of a crawl job
    fn crawl_status(&self, id: &str)
        -> impl Future<Output = Result<CrawlStatus, ApiError>> + Send;
}

/// Builds the underlying HTTP client
///
/// # Arguments
///
/// * `config` - The API connection settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("firescope/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Authenticated client for the extraction service
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl ApiClient {
    /// Creates a client from validated API settings
    ///
    /// # Returns
    ///
    /// * `Ok(ApiClient)` - Ready to dispatch requests
    /// * `Err(FirescopeError)` - Bad base URL, missing key, or client build failure
    pub fn new(config: &ApiConfig) -> Result<Self, FirescopeError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api base-url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(format!(
                "api base-url cannot carry a path: {}",
                config.base_url
            ))
            .into());
        }

        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            http: build_http_client(config)?,
            base_url,
            api_key,
        })
    }

    /// Resolves path segments against the base URL
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.api_key)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        read_response(response, fallback).await
    }
}

impl CrawlService for ApiClient {
    async fn scrape(
        &self,
        request: &JobRequest,
        options: &ScrapeConfig,
    ) -> Result<ScrapeResponse, ApiError> {
        let endpoint = self.endpoint(&["scrape"]);
        tracing::debug!("POST {} for {}", endpoint, request);

        let body = ScrapeRequest {
            url: request.url(),
            formats: &options.formats,
        };
        self.send(self.http.post(endpoint).json(&body), SCRAPE_FAILED)
            .await
    }

    async fn start_crawl(
        &self,
        request: &JobRequest,
        options: &CrawlConfig,
    ) -> Result<CrawlStarted, ApiError> {
        let endpoint = self.endpoint(&["crawl"]);
        tracing::debug!("POST {} for {} (limit {})", endpoint, request, options.limit);

        let body = CrawlRequest {
            url: request.url(),
            limit: options.limit,
            scrape_options: ScrapeOptions {
                formats: &options.formats,
            },
        };
        self.send(self.http.post(endpoint).json(&body), CRAWL_START_FAILED)
            .await
    }

    async fn crawl_status(&self, id: &str) -> Result<CrawlStatus, ApiError> {
        let endpoint = self.endpoint(&["crawl", id]);
        tracing::trace!("GET {}", endpoint);

        self.send(self.http.get(endpoint), CRAWL_STATUS_FAILED).await
    }
}

/// Reads a response body, turning non-success statuses into service errors
async fn read_response<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(ApiError::Transport)?;

    if !status.is_success() {
        let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
        tracing::debug!("Service answered {}: {}", status, message);
        return Err(ApiError::Service {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(ApiError::Decode)
}

/// Extracts a non-empty `message` string from an error body
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
