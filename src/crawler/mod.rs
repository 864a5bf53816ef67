//! Crawler module for forum fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP session and page fetching
//! - Form-based login
//! - Pagination resolution for multi-page listings and threads
//! - Subforum and topic listing
//! - Per-post field extraction
//! - Overall crawl coordination

mod auth;
mod coordinator;
mod document;
mod fetcher;
mod pagination;
mod posts;
mod walker;

pub use auth::{login, login_fields, login_url};
pub use coordinator::{CrawlOptions, Crawler};
pub use document::{text_content, Document};
pub use fetcher::{build_http_client, PageFetcher, Session};
pub use pagination::{parse_pagination_href, PageSet, PaginationResolver, PaginationSpec};
pub use posts::PostExtractor;
pub use walker::ForumTreeWalker;
