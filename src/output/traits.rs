//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the two
//! handlers the CLI uses.

use crate::output::{render_json, write_markdown_export};
use crate::session::DisplayedResult;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for anything that presents a result to the user
pub trait OutputHandler {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Presents one result
    fn emit(&mut self, result: &DisplayedResult) -> OutputResult<()>;
}

/// Writes the pretty JSON rendering to a writer
pub struct JsonOutput<W: Write> {
    writer: W,
}

impl<W: Write> JsonOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonOutput<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> OutputHandler for JsonOutput<W> {
    fn name(&self) -> &str {
        "json"
    }

    fn emit(&mut self, result: &DisplayedResult) -> OutputResult<()> {
        let rendered = render_json(result)?;
        writeln!(self.writer, "{}", rendered)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes a markdown export of the extracted pages to a file
pub struct MarkdownFile {
    path: PathBuf,
}

impl MarkdownFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for MarkdownFile {
    fn name(&self) -> &str {
        "markdown"
    }

    fn emit(&mut self, result: &DisplayedResult) -> OutputResult<()> {
        write_markdown_export(result, &self.path)?;
        tracing::info!("Markdown export written to {}", self.path.display());
        Ok(())
    }
}
