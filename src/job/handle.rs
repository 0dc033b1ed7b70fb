//! Owned, cancellable poller task
use crate::api::{CrawlService, CrawlStatus};
use crate::job::Poller;
use crate::FirescopeError;
use tokio::task::JoinHandle;

/// Handle to a poller running on its own task
///
/// The task lives exactly as long as the handle: dropping the handle aborts
/// it, so a poller can never keep running after its owner is gone.
#[derive(Debug)]
pub struct PollHandle {
    job_id: String,
    task: JoinHandle<Result<CrawlStatus, FirescopeError>>,
}

impl PollHandle {
    /// Spawns `poller` on the current tokio runtime
    pub fn spawn<S: CrawlService>(mut poller: Poller<S>) -> Self {
        let job_id = poller.job_id().to_string();
        let task = tokio::spawn(async move { poller.run().await });

        Self { job_id, task }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the poller; a pending `finish` resolves to `PollCancelled`
    pub fn cancel(&self) {
        if !self.task.is_finished() {
            tracing::info!("Stopping poller for crawl {}", self.job_id);
        }
        self.task.abort();
    }

    /// Waits for the poller to reach a terminal state
    pub async fn finish(mut self) -> Result<CrawlStatus, FirescopeError> {
        match (&mut self.task).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(FirescopeError::PollCancelled {
                id: self.job_id.clone(),
            }),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
