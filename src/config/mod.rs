//! Configuration module for Firescope
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and resolving the API credential from the environment.
//!
//! # Example
//!
//! ```no_run
//! use firescope::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("firescope.toml"))).unwrap();
//! println!("Polling every {}ms", config.crawl.poll_interval_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, Config, CrawlConfig, ScrapeConfig, DEFAULT_BASE_URL, DEFAULT_FORMATS,
    DEFAULT_CRAWL_LIMIT, DEFAULT_POLL_INTERVAL_MS,
};

// Re-export parser functions
pub use parser::{apply_api_key_override, load_config, parse_config};
pub use validation::{validate, SUPPORTED_FORMATS};

/// Environment variable holding the bearer credential
pub const API_KEY_ENV: &str = "FIRECRAWL_API_KEY";
