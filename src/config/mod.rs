//! Configuration module
//!
//! Site constants (domain root, pagination suffix, structural markers, post
//! details pattern) and HTTP settings. Every value has a built-in default;
//! a TOML file can override any subset of them.
//!
//! # Example
//!
//! ```no_run
//! use carookee_dump::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("forum.toml")).unwrap();
//! println!("Crawling {}", config.site.domain_root);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExtractionConfig, HttpConfig, MarkerConfig, SiteConfig, UserAgentConfig,
    DEFAULT_DOMAIN_ROOT, DEFAULT_PAGINATION_SUFFIX, DEFAULT_POST_DETAILS_PATTERN,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
