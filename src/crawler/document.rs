//! Parsed pages with resolved links
//!
//! A `Document` wraps a parsed HTML tree together with the domain root its
//! relative links resolve against. Every href handed out by a document is
//! absolute and directly fetchable.

use crate::model::LinkEntry;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A fetched and parsed forum page
#[derive(Debug)]
pub struct Document {
    url: Url,
    base: Url,
    html: Html,
}

impl Document {
    /// Parses HTML content fetched from `url`
    ///
    /// # Arguments
    ///
    /// * `body` - The HTML content
    /// * `url` - The URL the content was served from
    /// * `base` - The domain root relative links are resolved against
    ///
    /// # Example
    ///
    /// ```
    /// use carookee_dump::crawler::Document;
    /// use url::Url;
    ///
    /// let base = Url::parse("http://www.carookee.net").unwrap();
    /// let html = r#"<a class="forumlink" href="/forum/x/1">News</a>"#;
    /// let doc = Document::parse(html, base.clone(), &base);
    /// let links = doc.links_with_class("forumlink");
    /// assert_eq!(links[0].href, "http://www.carookee.net/forum/x/1");
    /// ```
    pub fn parse(body: &str, url: Url, base: &Url) -> Self {
        Self {
            url,
            base: base.clone(),
            html: Html::parse_document(body),
        }
    }

    /// The URL this document was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The underlying HTML tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Resolves an href against the domain root
    pub fn resolve(&self, href: &str) -> Option<String> {
        resolve_link(href, &self.base)
    }

    /// All anchors with a resolvable href, in document order
    pub fn anchors(&self) -> Vec<(ElementRef<'_>, String)> {
        let mut anchors = Vec::new();

        if let Ok(a_selector) = Selector::parse("a[href]") {
            for element in self.html.select(&a_selector) {
                if let Some(href) = element.value().attr("href") {
                    if let Some(absolute_url) = self.resolve(href) {
                        anchors.push((element, absolute_url));
                    }
                }
            }
        }

        anchors
    }

    /// Anchors whose class attribute equals `class`, in document order
    pub fn links_with_class(&self, class: &str) -> Vec<LinkEntry> {
        self.anchors()
            .into_iter()
            .filter(|(element, _)| element.value().attr("class") == Some(class))
            .map(|(element, href)| LinkEntry::new(href, text_content(element)))
            .collect()
    }

    /// Resolved action URL of the first form on the page
    ///
    /// A form without an action submits to the page itself. Returns `None`
    /// when the page has no form.
    pub fn form_action(&self) -> Option<String> {
        let form_selector = Selector::parse("form").ok()?;
        let form = self.html.select(&form_selector).next()?;

        let action = form
            .value()
            .attr("action")
            .map(str::trim)
            .filter(|action| !action.is_empty())
            .and_then(|action| self.resolve(action));

        Some(action.unwrap_or_else(|| self.url.to_string()))
    }

    /// Default values of every named input, in document order
    ///
    /// Unchecked checkboxes and radio buttons, and inputs without a value,
    /// contribute nothing.
    pub fn input_defaults(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();

        let Ok(input_selector) = Selector::parse("input") else {
            return fields;
        };

        for input in self.html.select(&input_selector) {
            let element = input.value();
            let Some(name) = element.attr("name") else {
                continue;
            };

            let kind = element.attr("type").unwrap_or("text").to_ascii_lowercase();
            let value = match kind.as_str() {
                "checkbox" | "radio" => {
                    if element.attr("checked").is_none() {
                        continue;
                    }
                    element.attr("value").unwrap_or("on")
                }
                _ => match element.attr("value") {
                    Some(value) => value,
                    None => continue,
                },
            };

            fields.push((name.to_string(), value.to_string()));
        }

        fields
    }
}

/// Concatenated text of an element and all its descendants
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link cannot be followed:
/// - javascript:, mailto: schemes
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
