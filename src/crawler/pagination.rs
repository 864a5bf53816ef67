//! Multi-page listings and threads
//!
//! The forum marks the "jump to last page" link with a fixed href suffix
//! (`#bot`). That link has the form `<base>?p=<N>#bot`, which gives both the
//! page URL pattern and the total page count.

use crate::crawler::document::Document;
use crate::crawler::fetcher::PageFetcher;
use crate::Result;

/// Where the pages of a listing live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSpec {
    /// Page `i` is at `base_url_prefix + i`
    pub base_url_prefix: String,

    /// Total number of pages, at least 1
    pub page_count: u32,
}

impl PaginationSpec {
    /// A listing without further pages
    pub fn single_page() -> Self {
        Self {
            base_url_prefix: String::new(),
            page_count: 1,
        }
    }

    pub fn is_single_page(&self) -> bool {
        self.page_count <= 1
    }

    /// URL of page `page`
    pub fn page_url(&self, page: u32) -> String {
        format!("{}{}", self.base_url_prefix, page)
    }

    /// URLs of pages 2..=page_count, ascending
    pub fn additional_page_urls(&self) -> impl Iterator<Item = String> + '_ {
        (2..=self.page_count).map(move |page| self.page_url(page))
    }
}

/// Parses a pagination href such as `/x/y?p=7#bot`
///
/// Returns None if the href does not carry the suffix, has no `?p=`
/// parameter, or the page count is not a positive integer.
///
/// ```
/// use carookee_dump::crawler::{parse_pagination_href, PaginationSpec};
///
/// let spec = parse_pagination_href("/x/y?p=7#bot", "#bot").unwrap();
/// assert_eq!(spec, PaginationSpec { base_url_prefix: "/x/y?p=".into(), page_count: 7 });
/// assert_eq!(parse_pagination_href("/x/y#bot", "#bot"), None);
/// ```
pub fn parse_pagination_href(href: &str, suffix: &str) -> Option<PaginationSpec> {
    let stripped = href.strip_suffix(suffix)?;
    let (base, count) = stripped.rsplit_once("?p=")?;
    let page_count = count.trim().parse::<u32>().ok().filter(|count| *count >= 1)?;

    Some(PaginationSpec {
        base_url_prefix: format!("{}?p=", base),
        page_count,
    })
}

/// All documents of one listing or thread, first to last
#[derive(Debug)]
pub struct PageSet {
    pages: Vec<Document>,
}

impl PageSet {
    pub fn single(document: Document) -> Self {
        Self {
            pages: vec![document],
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.pages.iter()
    }
}

impl<'a> IntoIterator for &'a PageSet {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Finds pagination controls and fetches the remaining pages
#[derive(Debug, Clone)]
pub struct PaginationResolver {
    suffix: String,
}

impl PaginationResolver {
    /// Creates a resolver for the given anchor suffix
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Derives the pagination of a document
    ///
    /// The first anchor whose href ends with the suffix is the pagination
    /// control. A malformed control counts as no pagination.
    pub fn resolve(&self, document: &Document) -> PaginationSpec {
        let control = document
            .anchors()
            .into_iter()
            .map(|(_, href)| href)
            .find(|href| href.ends_with(&self.suffix));

        let Some(href) = control else {
            return PaginationSpec::single_page();
        };

        match parse_pagination_href(&href, &self.suffix) {
            Some(spec) => {
                tracing::debug!(
                    "{} spans {} pages ({}N)",
                    document.url(),
                    spec.page_count,
                    spec.base_url_prefix
                );
                spec
            }
            None => {
                tracing::warn!(
                    "Ignoring malformed pagination link {} on {}",
                    href,
                    document.url()
                );
                PaginationSpec::single_page()
            }
        }
    }

    /// Fetches pages 2..=N after `first` in ascending order
    ///
    /// A single-page spec performs no requests.
    pub async fn materialize(
        &self,
        first: Document,
        spec: &PaginationSpec,
        fetcher: &PageFetcher<'_>,
    ) -> Result<PageSet> {
        if spec.is_single_page() {
            return Ok(PageSet::single(first));
        }

        // The page count comes from page markup, so pages grow one fetch at a time
        let mut pages = vec![first];
        for url in spec.additional_page_urls() {
            pages.push(fetcher.fetch(&url).await?);
        }

        Ok(PageSet { pages })
    }

    /// Fetches `url` and every further page it links to
    pub async fn fetch_all(&self, url: &str, fetcher: &PageFetcher<'_>) -> Result<PageSet> {
        let first = fetcher.fetch(url).await?;
        let spec = self.resolve(&first);
        self.materialize(first, &spec, fetcher).await
    }
}
