//! Output module for presenting results
//!
//! This module handles:
//! - Rendering the displayed result as pretty-printed JSON
//! - Exporting extracted pages as a markdown document
//! - The `OutputHandler` trait the CLI writes through

mod markdown;
mod traits;

pub use markdown::{format_markdown_export, write_markdown_export};
pub use traits::{JsonOutput, MarkdownFile, OutputError, OutputHandler, OutputResult};

use crate::session::DisplayedResult;

/// Renders a result the way it is shown to the user: JSON, two-space indent
///
/// # Example
///
/// ```
/// use firescope::output::render_json;
/// use firescope::api::ScrapeResponse;
/// use firescope::DisplayedResult;
///
/// let result = DisplayedResult::Extraction(ScrapeResponse::from(serde_json::json!({})));
/// assert_eq!(render_json(&result).unwrap(), "{}");
/// ```
pub fn render_json(result: &DisplayedResult) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(result.payload())?)
}
