use serde::Deserialize;

/// Default forum host
pub const DEFAULT_DOMAIN_ROOT: &str = "http://www.carookee.net";

/// Anchor suffix of the "jump to last page" link
pub const DEFAULT_PAGINATION_SUFFIX: &str = "#bot";

/// Matches the German "Verfasst am: 01.02.13, 14:05    Titel: ..." detail line.
///
/// Only the shape matters; label words are not checked.
pub const DEFAULT_POST_DETAILS_PATTERN: &str = r"^[^:]+:\s+(?P<date>[0-3][0-9]\.[01][0-9]\.\d{2},\s+[0-2][0-9]:[0-5][0-9])\s+[^:]+:\s+(?P<subject>\S.*)";

/// Main configuration structure
///
/// Every section has defaults matching the carookee site, so an empty TOML
/// file (or no file at all) yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub markers: MarkerConfig,
    pub extraction: ExtractionConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
}

/// Forum site layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host every relative link is resolved against
    #[serde(rename = "domain-root")]
    pub domain_root: String,

    /// Suffix identifying the pagination anchor
    #[serde(rename = "pagination-suffix")]
    pub pagination_suffix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain_root: DEFAULT_DOMAIN_ROOT.to_string(),
            pagination_suffix: DEFAULT_PAGINATION_SUFFIX.to_string(),
        }
    }
}

/// Class attribute values identifying semantic elements in the markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Anchors leading to subforums
    #[serde(rename = "subforum-link")]
    pub subforum_link: String,

    /// Anchors leading to topics
    #[serde(rename = "topic-title")]
    pub topic_title: String,

    /// Table holding one post per row
    #[serde(rename = "post-table")]
    pub post_table: String,

    /// Span with the author's name
    pub author: String,

    /// Span with the "posted at / subject" line
    #[serde(rename = "post-details")]
    pub post_details: String,

    /// Span with the post text
    #[serde(rename = "post-body")]
    pub post_body: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            subforum_link: "forumlink".to_string(),
            topic_title: "topictitle".to_string(),
            post_table: "forumline".to_string(),
            author: "name".to_string(),
            post_details: "postdetails".to_string(),
            post_body: "postbody".to_string(),
        }
    }
}

/// Field extraction settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Regex with `date` and `subject` capture groups, applied to the post details text
    #[serde(rename = "post-details-pattern")]
    pub post_details_pattern: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            post_details_pattern: DEFAULT_POST_DETAILS_PATTERN.to_string(),
        }
    }
}

/// User agent identification
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "carookee-dump".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Returns a default configuration pointed at another domain root
    pub fn with_domain_root(domain_root: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.site.domain_root = domain_root.into();
        config
    }
}
