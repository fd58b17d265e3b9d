use crate::config::types::{Config, OutputConfig, RequestConfig, SourceConfig, PAGE_PLACEHOLDER};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_request_config(&config.request)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the listing source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let placeholders = config.url_template.matches(PAGE_PLACEHOLDER).count();
    if placeholders != 1 {
        return Err(ConfigError::Validation(format!(
            "url_template must contain exactly one '{}' placeholder, found {}",
            PAGE_PLACEHOLDER, placeholders
        )));
    }

    let sample = config.page_url(config.start_page.max(1));
    let url = Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid url_template '{}': {}", sample, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "url_template must use http or https, got '{}'",
            url.scheme()
        )));
    }

    validate_selector_part("tag", &config.tag)?;
    validate_selector_part("attribute", &config.attribute)?;

    if config.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start_page must be >= 1, got {}",
            config.start_page
        )));
    }

    Ok(())
}

/// Validates request configuration
fn validate_request_config(config: &RequestConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation("path cannot be empty".to_string()));
    }

    if config.header.is_empty() {
        return Err(ConfigError::Validation(
            "header cannot be empty".to_string(),
        ));
    }

    let mut chars = config.delimiter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !matches!(c, '"' | '\r' | '\n') => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "delimiter must be a single character other than a quote or newline, got '{}'",
            config.delimiter.escape_default()
        ))),
    }
}

/// Tag and attribute names end up inside a CSS selector, so they must be
/// plain identifiers
fn validate_selector_part(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "{} must contain only alphanumeric characters, '-' or '_', got '{}'",
            field, value
        )));
    }

    Ok(())
}
