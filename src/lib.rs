//! carookee-dump: a forum thread archiver
//!
//! This crate logs into a carookee-hosted forum and walks its hierarchy
//! (forum → subforums → topics → posts), following multi-page listings and
//! multi-page threads, and turns every topic into a structured record.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for forum crawl operations
#[derive(Debug, Error)]
pub enum ForumError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Login rejected for forum {forum}")]
    LoginRejected { forum: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

impl ForumError {
    /// Classifies a reqwest failure for the given URL
    pub(crate) fn from_transport(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ForumError::Timeout {
                url: url.to_string(),
            }
        } else {
            ForumError::Http {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for forum crawl operations
pub type Result<T> = std::result::Result<T, ForumError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, CrawlOptions};
pub use model::{Credentials, LinkEntry, Post, Subforum, Topic};
pub use output::{CrawlStats, JsonArrayWriter, TopicRecord};
