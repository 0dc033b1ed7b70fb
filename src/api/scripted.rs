//! Scripted stand-in for the extraction service used by unit tests

use crate::api::{ApiError, CrawlService, CrawlStarted, CrawlStatus, ScrapeResponse};
use crate::config::{CrawlConfig, ScrapeConfig};
use crate::request::JobRequest;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Builds a status payload with the given label
pub fn status(label: &str) -> CrawlStatus {
    serde_json::from_value(json!({
        "status": label,
        "total": 2,
        "completed": 1,
        "creditsUsed": 1,
        "data": [{"markdown": format!("page while {}", label)}]
    }))
    .unwrap()
}

pub fn service_error(message: &str) -> ApiError {
    ApiError::Service {
        status: 500,
        message: message.to_string(),
    }
}

/// Replays queued answers; an exhausted status queue keeps reporting `scraping`
#[derive(Default)]
pub struct ScriptedService {
    scrapes: Mutex<VecDeque<Result<ScrapeResponse, ApiError>>>,
    starts: Mutex<VecDeque<Result<CrawlStarted, ApiError>>>,
    statuses: Mutex<HashMap<String, VecDeque<Result<CrawlStatus, ApiError>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scrape(&self, result: Result<ScrapeResponse, ApiError>) {
        self.scrapes.lock().unwrap().push_back(result);
    }

    pub fn push_start(&self, id: &str) {
        let started = serde_json::from_value(json!({
            "success": true,
            "id": id,
            "url": format!("https://api.example.com/crawl/{}", id)
        }))
        .unwrap();
        self.starts.lock().unwrap().push_back(Ok(started));
    }

    pub fn push_start_error(&self, error: ApiError) {
        self.starts.lock().unwrap().push_back(Err(error));
    }

    pub fn push_status(&self, id: &str, result: Result<CrawlStatus, ApiError>) {
        self.statuses
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push_back(result);
    }

    /// Every call so far, as `scrape`, `start`, or `status:<id>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self, id: &str) -> usize {
        let key = format!("status:{}", id);
        self.calls().iter().filter(|c| **c == key).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CrawlService for ScriptedService {
    async fn scrape(
        &self,
        _request: &JobRequest,
        _options: &ScrapeConfig,
    ) -> Result<ScrapeResponse, ApiError> {
        self.record("scrape".to_string());
        self.scrapes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(service_error("no scripted scrape")))
    }

    async fn start_crawl(
        &self,
        _request: &JobRequest,
        _options: &CrawlConfig,
    ) -> Result<CrawlStarted, ApiError> {
        self.record("start".to_string());
        self.starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(service_error("no scripted start")))
    }

    async fn crawl_status(&self, id: &str) -> Result<CrawlStatus, ApiError> {
        self.record(format!("status:{}", id));
        self.statuses
            .lock()
            .unwrap()
            .get_mut(id)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Ok(status("scraping")))
    }
}
