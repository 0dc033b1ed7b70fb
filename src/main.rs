//! Firescope main entry point
//!
//! This is the command-line interface for the Firescope extraction console.

use clap::{Parser, Subcommand};
use firescope::config::{load_config, validate, Config};
use firescope::output::{JsonOutput, MarkdownFile, OutputHandler};
use firescope::{ApiClient, ConfigError, FirescopeError, Mode, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Firescope: extract pages and crawl sites through a hosted extraction API
///
/// The API key is read from the configuration file or the FIRECRAWL_API_KEY
/// environment variable. Results are printed to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "firescope")]
#[command(version)]
#[command(about = "Extract pages and crawl sites through a hosted extraction API", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a single page
    Scrape {
        /// URL of the page to extract
        url: String,

        /// Also write the extracted page as markdown to this file
        #[arg(long, value_name = "PATH")]
        markdown: Option<PathBuf>,
    },

    /// Crawl a site and wait for the job to finish
    Crawl {
        /// URL to start crawling from
        url: String,

        /// Maximum number of pages to crawl
        #[arg(long)]
        limit: Option<u32>,

        /// Milliseconds between status checks
        #[arg(long, value_name = "MS")]
        poll_interval: Option<u64>,

        /// Also write the crawled pages as markdown to this file
        #[arg(long, value_name = "PATH")]
        markdown: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), FirescopeError> {
    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let (mode, url, markdown) = match cli.command {
        Command::Scrape { url, markdown } => (Mode::Single, url, markdown),
        Command::Crawl {
            url,
            limit,
            poll_interval,
            markdown,
        } => {
            apply_crawl_overrides(&mut config, limit, poll_interval)?;
            (Mode::Crawl, url, markdown)
        }
    };

    let client = ApiClient::new(&config.api)?;
    let mut session = Session::new(client, &config)?;

    let mut outputs: Vec<Box<dyn OutputHandler>> = vec![Box::new(JsonOutput::stdout())];
    if let Some(path) = markdown {
        outputs.push(Box::new(MarkdownFile::new(path)));
    }

    tokio::select! {
        outcome = session.submit(mode, &url) => {
            let result = outcome?;
            for output in outputs.iter_mut() {
                tracing::debug!("Writing {} output", output.name());
                output.emit(result)?;
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning {}", mode);
        }
    }

    Ok(())
}

/// Applies command-line crawl settings on top of the loaded configuration
fn apply_crawl_overrides(
    config: &mut Config,
    limit: Option<u32>,
    poll_interval: Option<u64>,
) -> Result<(), ConfigError> {
    if let Some(limit) = limit {
        config.crawl.limit = limit;
    }
    if let Some(interval) = poll_interval {
        config.crawl.poll_interval_ms = interval;
    }

    validate(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("firescope=info,warn"),
            1 => EnvFilter::new("firescope=debug,info"),
            2 => EnvFilter::new("firescope=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
