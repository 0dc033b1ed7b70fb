use crate::config::types::{ApiConfig, Config, CrawlConfig, ScrapeConfig};
use crate::ConfigError;
use url::Url;

/// Output formats the extraction service understands
pub const SUPPORTED_FORMATS: [&str; 5] = ["markdown", "html", "rawHtml", "links", "screenshot"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_scrape_config(&config.scrape)?;
    validate_crawl_config(&config.crawl)?;
    Ok(())
}

/// Validates API connection settings
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "api base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    match config.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => {}
        _ => return Err(ConfigError::MissingApiKey),
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "api timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "api connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates single-page extraction settings
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    validate_formats("scrape.formats", &config.formats)
}

/// Validates crawl settings
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.limit < 1 || config.limit > 10_000 {
        return Err(ConfigError::Validation(format!(
            "crawl limit must be between 1 and 10000, got {}",
            config.limit
        )));
    }

    if config.poll_interval_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "crawl poll-interval-ms must be >= 100, got {}",
            config.poll_interval_ms
        )));
    }

    if config.max_wait_secs == Some(0) {
        return Err(ConfigError::Validation(
            "crawl max-wait-secs must be >= 1 when set".to_string(),
        ));
    }

    validate_formats("crawl.formats", &config.formats)
}

fn validate_formats(field: &str, formats: &[String]) -> Result<(), ConfigError> {
    if formats.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} must name at least one format",
            field
        )));
    }

    for format in formats {
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "{} contains unsupported format '{}'",
                field, format
            )));
        }
    }

    Ok(())
}
