use crate::config::types::Config;
use crate::config::validation::validate;
use crate::config::API_KEY_ENV;
use crate::ConfigError;
use std::path::Path;

/// Loads the configuration, resolves the credential, and validates the result
///
/// Without a path the built-in defaults are used, so only the API key has to
/// come from the environment.
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use firescope::config::load_config;
///
/// let config = load_config(Some(Path::new("firescope.toml"))).unwrap();
/// println!("Crawl limit: {}", config.crawl.limit);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            parse_config(&content)?
        }
        None => Config::default(),
    };

    apply_api_key_override(&mut config, std::env::var(API_KEY_ENV).ok());

    validate(&config)?;

    Ok(config)
}

/// Parses TOML configuration text without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Replaces the configured API key with `env_value` when it is non-empty
pub fn apply_api_key_override(config: &mut Config, env_value: Option<String>) {
    if let Some(key) = env_value.map(|v| v.trim().to_string()) {
        if !key.is_empty() {
            tracing::debug!("Using API key from {}", API_KEY_ENV);
            config.api.api_key = Some(key);
        }
    }
}
