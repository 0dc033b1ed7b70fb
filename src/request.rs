//! Job requests submitted by the user
//!
//! A request carries nothing but the URL. It is checked the way a browser's
//! URL input would check it: absolute, http or https, nothing else.

use crate::UrlError;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// What to do with the submitted URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Extract the single page
    Single,
    /// Start a site crawl job and poll it to completion
    Crawl,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "scrape"),
            Self::Crawl => write!(f, "crawl"),
        }
    }
}

/// A validated URL to extract or crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    url: String,
}

impl JobRequest {
    /// Validates `input` and wraps it as a request
    ///
    /// The URL is forwarded exactly as typed (minus surrounding whitespace);
    /// parsing only decides whether it is acceptable.
    pub fn new(input: &str) -> Result<Self, UrlError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(UrlError::Empty);
        }

        let parsed = Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(UrlError::InvalidScheme(other.to_string())),
        }

        Ok(Self {
            url: trimmed.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FromStr for JobRequest {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for JobRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
