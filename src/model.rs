//! Forum entities produced by a crawl
//!
//! All values are read-only snapshots built during one crawl invocation.

use serde::Serialize;
use std::fmt;

/// An anchor found in a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Absolute URL of the link target
    pub href: String,

    /// Text of the anchor
    pub label: String,
}

impl LinkEntry {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// A single forum post
///
/// Fields the markup did not provide are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Post {
    pub author: String,
    pub date: String,
    pub subject: String,
    pub content: String,
}

/// A subforum of the forum root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subforum {
    pub title: String,
    pub link: String,
}

impl From<LinkEntry> for Subforum {
    fn from(entry: LinkEntry) -> Self {
        Self {
            title: entry.label,
            link: entry.href,
        }
    }
}

/// A topic with its complete post history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub title: String,
    pub link: String,
    pub posts: Vec<Post>,
}

/// Login credentials
///
/// The password is never printed by `Debug`.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
