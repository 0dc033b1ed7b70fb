//! Session: the state a user sees while working with the service
//!
//! A session owns what the user is looking at (a loading flag, the last
//! result, the last error) and at most one polling crawl job. Starting any
//! new request tears down a crawl that is still being polled.

use crate::api::{ApiClient, CrawlService, CrawlStatus, Document, ScrapeResponse};
use crate::config::{Config, CrawlConfig, ScrapeConfig};
use crate::job::{check_schedule, PollHandle, Poller};
use crate::request::{JobRequest, Mode};
use crate::FirescopeError;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// The payload currently on display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayedResult {
    /// Response of a single-page extraction
    Extraction(ScrapeResponse),
    /// Final status of a completed crawl
    Crawl(CrawlStatus),
}

impl DisplayedResult {
    /// The extracted pages, in the order the service returned them
    pub fn documents(&self) -> Vec<Document<'_>> {
        match self {
            Self::Extraction(response) => response.document().into_iter().collect(),
            Self::Crawl(status) => status.documents(),
        }
    }

    /// The response body as the service sent it
    pub fn payload(&self) -> &Value {
        match self {
            Self::Extraction(response) => response.raw(),
            Self::Crawl(status) => status.raw(),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Extraction(_) => Mode::Single,
            Self::Crawl(_) => Mode::Crawl,
        }
    }
}

/// What the user currently sees
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    loading: bool,
    result: Option<DisplayedResult>,
    error: Option<String>,
}

impl ViewState {
    /// True while a request or a crawl poll is in flight
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&DisplayedResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Drives requests against a `CrawlService` and tracks the visible state
pub struct Session<S: CrawlService = ApiClient> {
    service: Arc<S>,
    scrape: ScrapeConfig,
    crawl: CrawlConfig,
    view: ViewState,
    active: Option<PollHandle>,
}

impl<S: CrawlService> Session<S> {
    /// Creates a session; fails if the crawl settings cannot be polled
    pub fn new(service: S, config: &Config) -> Result<Self, FirescopeError> {
        Self::with_shared(Arc::new(service), config)
    }

    /// Creates a session over a service the caller keeps a handle to
    pub fn with_shared(service: Arc<S>, config: &Config) -> Result<Self, FirescopeError> {
        check_schedule(&config.crawl)?;

        Ok(Self {
            service,
            scrape: config.scrape.clone(),
            crawl: config.crawl.clone(),
            view: ViewState::default(),
            active: None,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Id of the crawl currently being polled in the background
    pub fn active_job(&self) -> Option<&str> {
        self.active.as_ref().map(PollHandle::job_id)
    }

    /// Runs `url` in the given mode to completion
    pub async fn submit(&mut self, mode: Mode, url: &str) -> Result<&DisplayedResult, FirescopeError> {
        match mode {
            Mode::Single => self.scrape(url).await,
            Mode::Crawl => self.crawl(url).await,
        }
    }

    /// Extracts a single page and displays the response as returned
    pub async fn scrape(&mut self, url: &str) -> Result<&DisplayedResult, FirescopeError> {
        let request = match JobRequest::new(url) {
            Ok(request) => request,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.teardown();
        self.begin();
        tracing::info!("Scraping {}", request);

        let outcome = self.service.scrape(&request, &self.scrape).await;
        self.view.loading = false;

        match outcome {
            Ok(response) => Ok(self.show(DisplayedResult::Extraction(response))),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Starts a crawl job and begins polling it in the background
    ///
    /// Returns the job id. Loading stays set until `wait` or `cancel`.
    pub async fn start_crawl(&mut self, url: &str) -> Result<String, FirescopeError> {
        let request = match JobRequest::new(url) {
            Ok(request) => request,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.teardown();
        self.begin();
        tracing::info!("Starting crawl of {} (limit {})", request, self.crawl.limit);

        match self.service.start_crawl(&request, &self.crawl).await {
            Ok(started) => {
                tracing::info!("Crawl {} started", started.id);
                let poller =
                    match Poller::new(Arc::clone(&self.service), started.id.clone(), &self.crawl) {
                        Ok(poller) => poller,
                        Err(e) => {
                            self.view.loading = false;
                            return Err(self.fail(e));
                        }
                    };
                self.active = Some(PollHandle::spawn(poller));
                Ok(started.id)
            }
            Err(e) => {
                self.view.loading = false;
                Err(self.fail(e.into()))
            }
        }
    }

    /// Waits for the active crawl to finish and displays its outcome
    pub async fn wait(&mut self) -> Result<&DisplayedResult, FirescopeError> {
        let handle = self.active.take().ok_or(FirescopeError::NoActiveJob)?;

        let outcome = handle.finish().await;
        self.view.loading = false;

        match outcome {
            Ok(status) => Ok(self.show(DisplayedResult::Crawl(status))),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Starts a crawl and waits for it to finish
    pub async fn crawl(&mut self, url: &str) -> Result<&DisplayedResult, FirescopeError> {
        self.start_crawl(url).await?;
        self.wait().await
    }

    /// Stops polling the active crawl, if any
    ///
    /// Returns true if a poller was running.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.teardown();
        if cancelled {
            self.view.loading = false;
        }
        cancelled
    }

    fn teardown(&mut self) -> bool {
        match self.active.take() {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    fn begin(&mut self) {
        self.view.loading = true;
        self.view.error = None;
    }

    fn show(&mut self, result: DisplayedResult) -> &DisplayedResult {
        self.view.result.insert(result)
    }

    fn fail(&mut self, error: FirescopeError) -> FirescopeError {
        match &error {
            FirescopeError::Api(api) => match api.status() {
                Some(status) => tracing::error!("{} (HTTP {})", error, status),
                None => tracing::error!("{}: {:?}", error, api),
            },
            _ => tracing::error!("{}", error),
        }
        self.view.error = Some(error.to_string());
        error
    }
}
