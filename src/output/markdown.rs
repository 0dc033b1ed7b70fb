//! Markdown export of extracted pages
//!
//! One section per page, headed by the page title (or its source URL), then
//! the markdown the service returned for it.

use crate::output::traits::OutputResult;
use crate::session::DisplayedResult;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown export of `result` to `output_path`
///
/// # Arguments
///
/// * `result` - The result currently on display
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the export
/// * `Err(OutputError)` - Failed to write the file
pub fn write_markdown_export(result: &DisplayedResult, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_export(result, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a result as a markdown document
pub fn format_markdown_export(result: &DisplayedResult, generated_at: DateTime<Utc>) -> String {
    let mut md = String::new();

    match result {
        DisplayedResult::Extraction(_) => md.push_str("# Firescope Scrape Export\n\n"),
        DisplayedResult::Crawl(_) => md.push_str("# Firescope Crawl Export\n\n"),
    }

    md.push_str(&format!(
        "- **Generated**: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    match result {
        DisplayedResult::Extraction(response) => {
            if let Some(success) = response.success() {
                md.push_str(&format!("- **Success**: {}\n", success));
            }
        }
        DisplayedResult::Crawl(status) => {
            md.push_str(&format!("- **Status**: {}\n", status.status()));
            md.push_str(&format!("- **Pages**: {}\n", status.progress()));
            if let Some(credits) = status.credits_used() {
                md.push_str(&format!("- **Credits Used**: {}\n", credits));
            }
        }
    }
    md.push('\n');

    let documents = result.documents();
    if documents.is_empty() {
        md.push_str("_No pages were returned._\n");
        return md;
    }

    for (index, document) in documents.iter().enumerate() {
        let heading = document.label().unwrap_or("Untitled page");
        md.push_str(&format!("## {}. {}\n\n", index + 1, heading));

        if let Some(metadata) = document.metadata() {
            if let Some(source) = metadata.source_url() {
                md.push_str(&format!("_Source: {}_\n\n", source));
            }
            if let Some(description) = metadata.description() {
                md.push_str(&format!("> {}\n\n", description));
            }
        }

        match document.markdown().map(str::trim) {
            Some(content) if !content.is_empty() => {
                md.push_str(content);
                md.push_str("\n\n");
            }
            _ => md.push_str("_No markdown content returned._\n\n"),
        }
    }

    md
}
