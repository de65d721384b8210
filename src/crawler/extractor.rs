//! Article link extraction
//!
//! This module scans page markup for anchors that point at internal
//! articles. Parsing is done by `scraper` (html5ever), which recovers from
//! malformed markup the way a browser does, so extraction never fails: a
//! fragment that cannot be recognised as an anchor simply contributes nothing.

use crate::config::CrawlerConfig;
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// Decides which hrefs count as internal article links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFilter {
    prefix: String,
    namespace_separator: char,
}

impl ArticleFilter {
    pub fn new(prefix: impl Into<String>, namespace_separator: char) -> Self {
        Self {
            prefix: prefix.into(),
            namespace_separator,
        }
    }

    /// Builds the filter from crawler configuration
    ///
    /// Falls back to `:` if the configured separator is empty; validation
    /// rejects that case before a run starts.
    pub fn from_config(config: &CrawlerConfig) -> Self {
        let separator = config.namespace_separator.chars().next().unwrap_or(':');
        Self::new(config.article_prefix.clone(), separator)
    }

    /// Returns true if `href` is an article link
    ///
    /// The href must start with the article prefix and must not contain the
    /// namespace separator (which marks non-article pages such as `Special:`).
    pub fn accepts(&self, href: &str) -> bool {
        href.starts_with(&self.prefix) && !href.contains(self.namespace_separator)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for ArticleFilter {
    fn default() -> Self {
        Self::new("/wiki", ':')
    }
}

/// Extracts the distinct article hrefs from page markup
///
/// Only the `href` of `<a>` elements is considered. The returned strings are
/// exactly as written in the markup: still relative, still percent-encoded.
///
/// # Example
///
/// ```
/// use wiki_trawl::crawler::{extract_article_links, ArticleFilter};
///
/// let html = r#"<a href="/wiki/Python">Python</a><a href="/wiki/Talk:Python">Talk</a>"#;
/// let links = extract_article_links(html, &ArticleFilter::default());
/// assert_eq!(links.into_iter().collect::<Vec<_>>(), vec!["/wiki/Python".to_string()]);
/// ```
pub fn extract_article_links(html: &str, filter: &ArticleFilter) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return links;
    };

    let document = Html::parse_document(html);
    for element in document.select(&anchor_selector) {
        if let Some(href) = element.value().attr("href") {
            if filter.accepts(href) {
                links.insert(href.to_string());
            }
        }
    }

    links
}
