//! Forum hierarchy listing
//!
//! Subforums are the anchors carrying the subforum marker on the forum root
//! page. Topics are the anchors carrying the topic marker on every page of a
//! subforum's listing.

use crate::config::MarkerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pagination::PaginationResolver;
use crate::model::LinkEntry;
use crate::Result;

/// Lists subforums and topics
#[derive(Debug, Clone)]
pub struct ForumTreeWalker {
    subforum_marker: String,
    topic_marker: String,
    pagination: PaginationResolver,
}

impl ForumTreeWalker {
    pub fn new(markers: &MarkerConfig, pagination: PaginationResolver) -> Self {
        Self {
            subforum_marker: markers.subforum_link.clone(),
            topic_marker: markers.topic_title.clone(),
            pagination,
        }
    }

    /// URL of a forum's root page
    pub fn forum_root_url(fetcher: &PageFetcher<'_>, forum_id: &str) -> String {
        fetcher.site_url(&format!("/forum/{}", forum_id))
    }

    /// Subforum links on the forum root page, in document order
    pub async fn list_subforums(
        &self,
        fetcher: &PageFetcher<'_>,
        root_url: &str,
    ) -> Result<Vec<LinkEntry>> {
        let document = fetcher.fetch(root_url).await?;
        let subforums = document.links_with_class(&self.subforum_marker);

        tracing::info!("Found {} subforums on {}", subforums.len(), root_url);
        Ok(subforums)
    }

    /// Topic links of a subforum across all listing pages
    ///
    /// Entries are ordered by page, then by position within the page.
    pub async fn list_topics(
        &self,
        fetcher: &PageFetcher<'_>,
        subforum_url: &str,
    ) -> Result<Vec<LinkEntry>> {
        let pages = self.pagination.fetch_all(subforum_url, fetcher).await?;

        let topics: Vec<LinkEntry> = pages
            .iter()
            .flat_map(|document| document.links_with_class(&self.topic_marker))
            .collect();

        tracing::debug!(
            "Found {} topics on {} listing pages of {}",
            topics.len(),
            pages.len(),
            subforum_url
        );
        Ok(topics)
    }
}
