//! Crawl status poller
//!
//! The poller is a three-state machine:
//!
//! | State | Entered when |
//! |-------|--------------|
//! | Polling | crawl start succeeded (initial) |
//! | Completed | a status check reports `completed` |
//! | Failed | a status check reports `failed` |
//!
//! One status GET is issued per interval tick, the first one a full interval
//! after the poller starts. A status check that errors is logged and the
//! poller waits for the next tick.

use crate::api::{CrawlService, CrawlStatus};
use crate::config::CrawlConfig;
use crate::job::JobStatus;
use crate::{ConfigError, FirescopeError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Lifecycle state of a poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling,
    Completed,
    Failed,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Polling)
    }
}

/// Checks that `config` describes a poll schedule that can run
pub fn check_schedule(config: &CrawlConfig) -> Result<(), FirescopeError> {
    if config.poll_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "crawl poll-interval-ms must be greater than zero".to_string(),
        )
        .into());
    }
    Ok(())
}

/// Polls one crawl job until it reaches a terminal status
pub struct Poller<S> {
    service: Arc<S>,
    job_id: String,
    interval: Duration,
    max_wait: Option<Duration>,
    state: PollState,
    polls: u32,
}

impl<S: CrawlService> Poller<S> {
    /// Creates a poller for `job_id` using the interval and wait limit from `config`
    ///
    /// Fails if the poll interval is zero.
    pub fn new(
        service: Arc<S>,
        job_id: impl Into<String>,
        config: &CrawlConfig,
    ) -> Result<Self, FirescopeError> {
        check_schedule(config)?;

        Ok(Self {
            service,
            job_id: job_id.into(),
            interval: config.poll_interval(),
            max_wait: config.max_wait(),
            state: PollState::Polling,
            polls: 0,
        })
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Number of status checks issued so far
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Applies one status report to the state machine
    ///
    /// Terminal states are sticky: once completed or failed, later reports
    /// are ignored.
    pub fn observe(&mut self, report: &CrawlStatus) -> PollState {
        if self.state.is_terminal() {
            return self.state;
        }

        self.state = match report.status() {
            JobStatus::Completed => PollState::Completed,
            JobStatus::Failed => PollState::Failed,
            _ => PollState::Polling,
        };
        self.state
    }

    /// Polls until the job completes or fails
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatus)` - The full status payload that reported `completed`
    /// * `Err(FirescopeError::CrawlFailed)` - The job reported `failed`
    /// * `Err(FirescopeError::PollTimeout)` - The configured wait limit elapsed
    pub async fn run(&mut self) -> Result<CrawlStatus, FirescopeError> {
        let Some(max_wait) = self.max_wait else {
            return self.poll_loop().await;
        };

        match time::timeout(max_wait, self.poll_loop()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    "Crawl {} still running after {}s, giving up",
                    self.job_id,
                    max_wait.as_secs()
                );
                Err(FirescopeError::PollTimeout {
                    id: self.job_id.clone(),
                    waited_secs: max_wait.as_secs(),
                })
            }
        }
    }

    async fn poll_loop(&mut self) -> Result<CrawlStatus, FirescopeError> {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            "Polling crawl {} every {}ms",
            self.job_id,
            self.interval.as_millis()
        );

        loop {
            ticker.tick().await;
            self.polls += 1;

            let report = match self.service.crawl_status(&self.job_id).await {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!(
                        "Status check {} for crawl {} failed: {:?}",
                        self.polls,
                        self.job_id,
                        e
                    );
                    continue;
                }
            };

            match self.observe(&report) {
                PollState::Completed => {
                    tracing::info!(
                        "Crawl {} completed ({} pages, {} checks)",
                        self.job_id,
                        report.documents().len(),
                        self.polls
                    );
                    return Ok(report);
                }
                PollState::Failed => {
                    tracing::warn!("Crawl {} failed after {} checks", self.job_id, self.polls);
                    return Err(FirescopeError::CrawlFailed);
                }
                PollState::Polling => {
                    tracing::info!(
                        "Crawl {}: {} ({})",
                        self.job_id,
                        report.status(),
                        report.progress()
                    );
                }
            }
        }
    }
}
