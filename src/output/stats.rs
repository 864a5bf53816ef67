//! Crawl statistics
//!
//! Counters gathered during a run and logged once it completes.

use std::fmt;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Number of subforums crawled
    pub subforums: usize,

    /// Number of topics written
    pub topics: usize,

    /// Number of posts extracted
    pub posts: usize,

    /// Number of HTTP requests sent during the run
    pub requests: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlStats {
    /// Requests per second over the whole run
    pub fn request_rate(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.requests as f64 / seconds
    }

    /// Logs the summary at info level
    pub fn log_summary(&self) {
        tracing::info!("Crawl completed: {}", self);
    }
}

impl fmt::Display for CrawlStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} subforums, {} topics, {} posts, {} requests in {:.1}s ({:.2} requests/sec)",
            self.subforums,
            self.topics,
            self.posts,
            self.requests,
            self.elapsed.as_secs_f64(),
            self.request_rate()
        )
    }
}
