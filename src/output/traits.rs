//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! record written for every crawled topic.

use crate::model::{Post, Topic};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output already finalized")]
    Finalized,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One crawled topic as written to the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicRecord {
    /// Title of the subforum the topic belongs to
    #[serde(rename = "Forum")]
    pub forum: String,

    /// Title of the topic
    #[serde(rename = "Topic")]
    pub topic: String,

    /// Posts in thread order
    #[serde(rename = "Thread")]
    pub thread: Vec<Post>,
}

impl TopicRecord {
    pub fn new(forum: &str, topic: Topic) -> Self {
        Self {
            forum: forum.to_string(),
            topic: topic.title,
            thread: topic.posts,
        }
    }
}

/// Trait for output handlers
///
/// Topics arrive in crawl order; `finalize` is called once when the crawl
/// ends, whether it completed or was aborted by an error.
pub trait OutputHandler {
    /// Records a crawled topic
    fn record_topic(&mut self, record: &TopicRecord) -> OutputResult<()>;

    /// Finalizes the output, performing any final writes
    fn finalize(&mut self) -> OutputResult<()>;
}

/// Collects records in memory
impl OutputHandler for Vec<TopicRecord> {
    fn record_topic(&mut self, record: &TopicRecord) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }

    fn finalize(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
