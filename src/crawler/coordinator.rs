//! Crawl coordinator - main crawl orchestration logic
//!
//! This module ties the components together:
//! - Building the session and extractors from the configuration
//! - Logging in once
//! - Walking subforums → topics → posts
//! - Handing every finished topic to the output handler

use crate::config::{validate, Config};
use crate::crawler::auth;
use crate::crawler::fetcher::{PageFetcher, Session};
use crate::crawler::pagination::PaginationResolver;
use crate::crawler::posts::PostExtractor;
use crate::crawler::walker::ForumTreeWalker;
use crate::model::{Credentials, Subforum};
use crate::output::{CrawlStats, OutputHandler, TopicRecord};
use crate::{ForumError, Result};
use std::time::Instant;
use url::Url;

/// Options for a crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Only crawl the first N subforums
    pub max_subforums: Option<usize>,
}

/// Main crawler structure
pub struct Crawler {
    session: Session,
    domain_root: Url,
    walker: ForumTreeWalker,
    extractor: PostExtractor,
}

impl Crawler {
    /// Creates a new crawler with a fresh, unauthenticated session
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to log in and crawl
    /// * `Err(ForumError)` - Invalid configuration or HTTP client setup failure
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let domain_root = Url::parse(&config.site.domain_root)?;
        let session = Session::new(&config.user_agent, &config.http)?;

        let pagination = PaginationResolver::new(config.site.pagination_suffix.as_str());
        let walker = ForumTreeWalker::new(&config.markers, pagination.clone());
        let extractor = PostExtractor::new(&config.markers, &config.extraction, pagination)?;

        Ok(Self {
            session,
            domain_root,
            walker,
            extractor,
        })
    }

    /// A fetcher bound to this crawler's session
    pub fn fetcher(&self) -> PageFetcher<'_> {
        PageFetcher::new(&self.session, self.domain_root.clone())
    }

    /// Logs into the forum
    ///
    /// A rejected login is an error: crawling without the session would only
    /// yield the public part of the forum.
    pub async fn login(&self, forum_id: &str, credentials: &Credentials) -> Result<()> {
        let fetcher = self.fetcher();

        if auth::login(&fetcher, forum_id, credentials).await? {
            Ok(())
        } else {
            Err(ForumError::LoginRejected {
                forum: forum_id.to_string(),
            })
        }
    }

    /// Runs the crawl
    ///
    /// Every topic is recorded in `output` as soon as its posts are complete,
    /// in subforum order, then topic order. Any fetch or output error aborts
    /// the crawl. The output is finalized in both cases, so an aborted crawl
    /// still leaves the topics recorded so far in a complete document.
    pub async fn run(
        &self,
        forum_id: &str,
        options: &CrawlOptions,
        output: &mut dyn OutputHandler,
    ) -> Result<CrawlStats> {
        let start_time = Instant::now();
        let requests_before = self.session.requests_sent();

        let mut stats = CrawlStats::default();
        let walked = self.walk(forum_id, options, output, &mut stats).await;
        let finalized = output.finalize();

        stats.requests = self.session.requests_sent() - requests_before;
        stats.elapsed = start_time.elapsed();

        if let Err(e) = walked {
            tracing::error!("Crawl aborted after {}: {}", stats, e);
            if let Err(finalize_error) = finalized {
                tracing::warn!("Failed to finalize partial output: {}", finalize_error);
            }
            return Err(e);
        }
        finalized?;

        stats.log_summary();
        Ok(stats)
    }

    async fn walk(
        &self,
        forum_id: &str,
        options: &CrawlOptions,
        output: &mut dyn OutputHandler,
        stats: &mut CrawlStats,
    ) -> Result<()> {
        let fetcher = self.fetcher();

        let root_url = ForumTreeWalker::forum_root_url(&fetcher, forum_id);
        let mut subforums = self.walker.list_subforums(&fetcher, &root_url).await?;

        if let Some(limit) = options.max_subforums {
            if subforums.len() > limit {
                tracing::info!(
                    "Limiting crawl to the first {} of {} subforums",
                    limit,
                    subforums.len()
                );
                subforums.truncate(limit);
            }
        }
        stats.subforums = subforums.len();

        for subforum in subforums.into_iter().map(Subforum::from) {
            tracing::info!("Crawling subforum '{}'", subforum.title);
            let topics = self.walker.list_topics(&fetcher, &subforum.link).await?;

            for entry in &topics {
                let topic = self.extractor.fetch_topic(&fetcher, entry).await?;
                tracing::debug!("Topic '{}': {} posts", topic.title, topic.posts.len());

                stats.topics += 1;
                stats.posts += topic.posts.len();
                output.record_topic(&TopicRecord::new(&subforum.title, topic))?;
            }

            tracing::info!(
                "Progress: {} topics, {} posts, {} requests",
                stats.topics,
                stats.posts,
                self.session.requests_sent()
            );
        }

        Ok(())
    }
}
