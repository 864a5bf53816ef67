use crate::config::types::{Config, ExtractionConfig, HttpConfig, MarkerConfig, SiteConfig};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_markers(&config.markers)?;
    validate_extraction_config(&config.extraction)?;
    validate_http_config(&config.http)?;

    if config.user_agent.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the site layout section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.domain_root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid domain-root: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "domain-root must use http or https, got '{}'",
            config.domain_root
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "domain-root has no host: '{}'",
            config.domain_root
        )));
    }

    if config.pagination_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "pagination-suffix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates structural markers
///
/// Markers are spliced into CSS attribute selectors, so they are limited to
/// identifier characters.
fn validate_markers(markers: &MarkerConfig) -> Result<(), ConfigError> {
    let entries = [
        ("subforum-link", &markers.subforum_link),
        ("topic-title", &markers.topic_title),
        ("post-table", &markers.post_table),
        ("author", &markers.author),
        ("post-details", &markers.post_details),
        ("post-body", &markers.post_body),
    ];

    for (key, value) in entries {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!(
                "marker '{}' cannot be empty",
                key
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "marker '{}' must contain only alphanumeric characters, hyphens and underscores, got '{}'",
                key, value
            )));
        }
    }

    Ok(())
}

/// Validates the post details pattern
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    let regex = Regex::new(&config.post_details_pattern)
        .map_err(|e| ConfigError::InvalidPattern(format!("post-details-pattern: {}", e)))?;

    for group in ["date", "subject"] {
        if !regex.capture_names().flatten().any(|name| name == group) {
            return Err(ConfigError::InvalidPattern(format!(
                "post-details-pattern must define a '{}' capture group",
                group
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}
