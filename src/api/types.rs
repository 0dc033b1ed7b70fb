//! Wire types for the extraction service
//!
//! Responses are shown to the user exactly as the service sent them. The
//! response types therefore hold the raw JSON value and read the few fields
//! this crate needs through accessors; serializing them writes the raw value
//! back untouched.

use crate::job::JobStatus;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Body of `POST /scrape`
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeRequest<'a> {
    pub url: &'a str,
    pub formats: &'a [String],
}

/// Per-page options nested in a crawl request
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOptions<'a> {
    pub formats: &'a [String],
}

/// Body of `POST /crawl`
#[derive(Debug, Clone, Serialize)]
pub struct CrawlRequest<'a> {
    pub url: &'a str,
    pub limit: u32,
    #[serde(rename = "scrapeOptions")]
    pub scrape_options: ScrapeOptions<'a>,
}

/// Page metadata; an open-ended key/value map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metadata<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Metadata<'a> {
    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&'a str> {
        self.str_field("title")
    }

    pub fn description(&self) -> Option<&'a str> {
        self.str_field("description")
    }

    pub fn source_url(&self) -> Option<&'a str> {
        self.str_field("sourceURL")
    }

    pub fn status_code(&self) -> Option<u64> {
        self.fields.get("statusCode").and_then(Value::as_u64)
    }

    pub fn fields(&self) -> &'a Map<String, Value> {
        self.fields
    }
}

/// One extracted page, viewed over its JSON object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Document<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Document<'a> {
    /// Views `value` as a page; `None` unless it is a JSON object
    pub fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    pub fn markdown(&self) -> Option<&'a str> {
        self.fields.get("markdown").and_then(Value::as_str)
    }

    pub fn html(&self) -> Option<&'a str> {
        self.fields.get("html").and_then(Value::as_str)
    }

    pub fn metadata(&self) -> Option<Metadata<'a>> {
        self.fields
            .get("metadata")
            .and_then(Value::as_object)
            .map(|fields| Metadata { fields })
    }

    /// Best human label for the page: title, then source URL
    pub fn label(&self) -> Option<&'a str> {
        let metadata = self.metadata()?;
        metadata
            .title()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| metadata.source_url())
    }
}

/// Response of `POST /scrape`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ScrapeResponse {
    raw: Value,
}

impl ScrapeResponse {
    /// The body exactly as the service returned it
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    pub fn success(&self) -> Option<bool> {
        self.raw.get("success").and_then(Value::as_bool)
    }

    /// The extracted page, if `data` is an object
    pub fn document(&self) -> Option<Document<'_>> {
        self.raw.get("data").and_then(Document::new)
    }
}

impl From<Value> for ScrapeResponse {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

impl Serialize for ScrapeResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Response of `POST /crawl`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrawlStarted {
    #[serde(default)]
    pub success: Option<bool>,

    /// Job identifier used for status checks
    pub id: String,

    #[serde(default)]
    pub url: Option<String>,
}

/// Response of `GET /crawl/{id}`
///
/// Any JSON body is accepted. A body without a string `status` reads as an
/// unknown, non-terminal status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct CrawlStatus {
    status: JobStatus,
    raw: Value,
}

impl CrawlStatus {
    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    /// The body exactly as the service returned it
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    pub fn total(&self) -> Option<u64> {
        self.raw.get("total").and_then(Value::as_u64)
    }

    pub fn completed(&self) -> Option<u64> {
        self.raw.get("completed").and_then(Value::as_u64)
    }

    pub fn credits_used(&self) -> Option<u64> {
        self.raw.get("creditsUsed").and_then(Value::as_u64)
    }

    /// Pages returned so far; entries that are not objects are skipped
    pub fn documents(&self) -> Vec<Document<'_>> {
        self.raw
            .get("data")
            .and_then(Value::as_array)
            .map(|pages| pages.iter().filter_map(Document::new).collect())
            .unwrap_or_default()
    }

    /// `completed/total` for progress logging
    pub fn progress(&self) -> String {
        match (self.completed(), self.total()) {
            (Some(completed), Some(total)) => format!("{}/{}", completed, total),
            (Some(completed), None) => format!("{}/?", completed),
            _ => "?/?".to_string(),
        }
    }
}

impl From<Value> for CrawlStatus {
    fn from(raw: Value) -> Self {
        let status = raw
            .get("status")
            .and_then(Value::as_str)
            .map(JobStatus::parse)
            .unwrap_or_else(|| JobStatus::Other(String::new()));
        Self { status, raw }
    }
}

impl Serialize for CrawlStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
