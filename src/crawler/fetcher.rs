//! HTTP session and page fetcher
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with its cookie jar and user agent
//! - GET requests returning parsed, link-resolved documents
//! - Form submission for the login
//! - Error classification
//!
//! Failures are reported to the caller and never retried.

use crate::config::{HttpConfig, UserAgentConfig};
use crate::crawler::document::Document;
use crate::{ForumError, Result};
use reqwest::cookie::Jar;
use reqwest::Client;
use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// Cookies set by the forum are stored in `jar` and sent with every later
/// request, which is what keeps a login alive.
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeout settings
/// * `jar` - Cookie jar shared with the session
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
    jar: Arc<Jar>,
) -> std::result::Result<Client, reqwest::Error> {
    // Format: Name/Version
    let user_agent = format!("{}/{}", user_agent.name, user_agent.version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .cookie_provider(jar)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Authentication state of one crawl
///
/// Owns the HTTP client and its cookie jar. One session serves one crawl;
/// it is not meant to be shared between concurrent crawls.
pub struct Session {
    client: Client,
    requests_sent: Cell<usize>,
}

impl Session {
    /// Creates a session with an empty cookie jar
    pub fn new(
        user_agent: &UserAgentConfig,
        http: &HttpConfig,
    ) -> std::result::Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, http, Arc::new(Jar::default()))?;

        Ok(Self {
            client,
            requests_sent: Cell::new(0),
        })
    }

    /// The HTTP client carrying this session's cookies
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Number of requests sent through this session
    pub fn requests_sent(&self) -> usize {
        self.requests_sent.get()
    }

    fn record_request(&self) {
        self.requests_sent.set(self.requests_sent.get() + 1);
    }
}

/// Fetches forum pages through a session
///
/// Documents returned have their links resolved against the domain root.
pub struct PageFetcher<'s> {
    session: &'s Session,
    domain_root: Url,
}

impl<'s> PageFetcher<'s> {
    pub fn new(session: &'s Session, domain_root: Url) -> Self {
        Self {
            session,
            domain_root,
        }
    }

    /// Builds an absolute URL for a path on the forum host
    ///
    /// ```
    /// use carookee_dump::crawler::{PageFetcher, Session};
    /// use carookee_dump::Config;
    /// use url::Url;
    ///
    /// let config = Config::default();
    /// let session = Session::new(&config.user_agent, &config.http).unwrap();
    /// let fetcher = PageFetcher::new(&session, Url::parse("http://www.carookee.net/").unwrap());
    /// assert_eq!(fetcher.site_url("/forum/abc"), "http://www.carookee.net/forum/abc");
    /// ```
    pub fn site_url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.domain_root.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Fetches a URL and parses it into a document
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The parsed page
    /// * `Err(ForumError)` - Network failure or non-success HTTP status
    pub async fn fetch(&self, url: &str) -> Result<Document> {
        tracing::debug!("Fetching {}", url);

        self.session.record_request();
        let response = self
            .session
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ForumError::from_transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForumError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ForumError::from_transport(url, e))?;

        Ok(Document::parse(&body, final_url, &self.domain_root))
    }

    /// Submits url-encoded form fields to `action`
    ///
    /// Redirects are followed. Returns true if the final status is below 400.
    pub async fn submit_form(&self, action: &str, fields: &[(String, String)]) -> Result<bool> {
        tracing::debug!("Submitting {} form fields to {}", fields.len(), action);

        self.session.record_request();
        let response = self
            .session
            .client
            .post(action)
            .form(fields)
            .send()
            .await
            .map_err(|e| ForumError::from_transport(action, e))?;

        let status = response.status();
        tracing::debug!("Form submission to {} answered {}", action, status);

        Ok(!(status.is_client_error() || status.is_server_error()))
    }
}
