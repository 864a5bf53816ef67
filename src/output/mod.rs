//! Output module for crawl results
//!
//! This module handles:
//! - The record written for every crawled topic
//! - Streaming records into a well-formed JSON array
//! - Crawl statistics

mod json;
pub mod stats;
mod traits;

pub use json::JsonArrayWriter;
pub use stats::CrawlStats;
pub use traits::{OutputError, OutputHandler, OutputResult, TopicRecord};
