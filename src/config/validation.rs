use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig, OutputTarget};
use crate::ConfigError;
use url::Url;

/// Placeholder the listing URL template must contain
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !config.base_url.contains(PAGE_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "base_url must contain the '{}' placeholder, got '{}'",
            PAGE_PLACEHOLDER, config.base_url
        )));
    }

    // The template must produce parseable URLs once the page number is in
    let probe = config.base_url.replace(PAGE_PLACEHOLDER, "1");
    Url::parse(&probe)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", probe, e)))?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.fetch_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_attempts must be >= 1, got {}",
            config.fetch_attempts
        )));
    }

    if config.page_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "page_timeout_ms must be >= 100ms, got {}ms",
            config.page_timeout_ms
        )));
    }

    if config.selector_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "selector_timeout_ms must be >= 100ms, got {}ms",
            config.selector_timeout_ms
        )));
    }

    // The stop word is compared against folded text, so it must be folded too
    if config.stop_word.chars().any(|c| c.is_uppercase()) {
        return Err(ConfigError::Validation(format!(
            "stop_word must be lowercase, got '{}'",
            config.stop_word
        )));
    }

    Ok(())
}

/// Validates HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    match config.target {
        OutputTarget::Store => {
            if config.database_path.is_empty() {
                return Err(ConfigError::Validation(
                    "database_path cannot be empty when target = \"store\"".to_string(),
                ));
            }
        }
        OutputTarget::File => {
            if config.stream_path.is_empty() {
                return Err(ConfigError::Validation(
                    "stream_path cannot be empty when target = \"file\"".to_string(),
                ));
            }
        }
    }
    Ok(())
}
