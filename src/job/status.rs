//! Crawl job status labels
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a crawl job as reported by the service
///
/// The service's status field is an open-ended string. The labels we know
/// get their own variant; anything else is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    /// Pages are still being fetched
    Scraping,

    /// The job finished and all results are available
    Completed,

    /// The job failed on the service side
    Failed,

    /// The job was cancelled on the service side
    Cancelled,

    /// A label this crate does not know about
    Other(String),
}

impl JobStatus {
    /// Returns true if no further state change will happen
    ///
    /// Only `completed` and `failed` end polling; every other label,
    /// `cancelled` included, keeps the poller waiting.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Scraping => "scraping",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Other(label) => label,
        }
    }

    pub fn parse(label: &str) -> Self {
        match label {
            "scraping" => Self::Scraping,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for JobStatus {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
