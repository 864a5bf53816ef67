//! Post extraction
//!
//! Posts live in the rows of the post table. Each row is scanned for three
//! independent fields: the author span, the details span (date and subject)
//! and the body span. A missing or malformed field becomes an empty string
//! without affecting the other fields or rows. Rows without body text are
//! layout rows and produce no post.

use crate::config::{ExtractionConfig, MarkerConfig};
use crate::crawler::document::{text_content, Document};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pagination::PaginationResolver;
use crate::model::{LinkEntry, Post, Topic};
use crate::{ConfigError, Result};
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Extracts posts from topic pages
#[derive(Debug, Clone)]
pub struct PostExtractor {
    rows: Selector,
    author: Selector,
    details: Selector,
    body: Selector,
    details_pattern: Regex,
    pagination: PaginationResolver,
}

impl PostExtractor {
    /// Builds the selectors and the details pattern
    ///
    /// # Returns
    ///
    /// * `Ok(PostExtractor)` - Ready to extract
    /// * `Err(ConfigError)` - A marker or the pattern does not compile
    pub fn new(
        markers: &MarkerConfig,
        extraction: &ExtractionConfig,
        pagination: PaginationResolver,
    ) -> std::result::Result<Self, ConfigError> {
        // html5ever wraps table rows in an implicit tbody
        let rows = selector(&format!(
            r#"table[class="{table}"] > tr, table[class="{table}"] > tbody > tr"#,
            table = markers.post_table
        ))?;

        let details_pattern = Regex::new(&extraction.post_details_pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("post-details-pattern: {}", e)))?;

        Ok(Self {
            rows,
            author: span_selector(&markers.author)?,
            details: span_selector(&markers.post_details)?,
            body: span_selector(&markers.post_body)?,
            details_pattern,
            pagination,
        })
    }

    /// All posts of a topic, across all of its pages
    pub async fn extract_posts(
        &self,
        fetcher: &PageFetcher<'_>,
        topic_url: &str,
    ) -> Result<Vec<Post>> {
        let pages = self.pagination.fetch_all(topic_url, fetcher).await?;

        let posts: Vec<Post> = pages
            .iter()
            .flat_map(|document| self.extract_document(document))
            .collect();

        tracing::debug!(
            "Extracted {} posts from {} pages of {}",
            posts.len(),
            pages.len(),
            topic_url
        );
        Ok(posts)
    }

    /// Assembles a topic from its listing entry
    pub async fn fetch_topic(&self, fetcher: &PageFetcher<'_>, entry: &LinkEntry) -> Result<Topic> {
        let posts = self.extract_posts(fetcher, &entry.href).await?;

        Ok(Topic {
            title: entry.label.clone(),
            link: entry.href.clone(),
            posts,
        })
    }

    /// Posts on a single page, in row order
    pub fn extract_document(&self, document: &Document) -> Vec<Post> {
        document
            .html()
            .select(&self.rows)
            .filter_map(|row| self.extract_row(row))
            .collect()
    }

    /// Extracts one row; None for rows without body text
    pub fn extract_row(&self, row: ElementRef<'_>) -> Option<Post> {
        let content = first_text(row, &self.body).unwrap_or_default();
        if content.is_empty() {
            return None;
        }

        let author = first_text(row, &self.author).unwrap_or_default();
        let (date, subject) = first_text(row, &self.details)
            .and_then(|details| self.parse_details(&details))
            .unwrap_or_default();

        Some(Post {
            author,
            date,
            subject,
            content,
        })
    }

    /// Splits a details line into date and subject
    pub fn parse_details(&self, details: &str) -> Option<(String, String)> {
        let captures = self.details_pattern.captures(details)?;
        let date = captures.name("date")?.as_str().to_string();
        let subject = captures.name("subject")?.as_str().to_string();
        Some((date, subject))
    }
}

fn first_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector).next().map(text_content)
}

fn span_selector(marker: &str) -> std::result::Result<Selector, ConfigError> {
    selector(&format!(r#"span[class="{}"]"#, marker))
}

fn selector(source: &str) -> std::result::Result<Selector, ConfigError> {
    Selector::parse(source)
        .map_err(|e| ConfigError::InvalidPattern(format!("selector {}: {:?}", source, e)))
}
