//! Link extraction from listing pages.

use reqwest::Url;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Turns a page body into the ordered list of links it points to.
///
/// Implementations must return absolute URLs without fragments, with
/// duplicates removed and first-seen order preserved.
pub trait LinkExtractor: Send + Sync {
    /// Extract the links of `body`, resolved against `base`.
    fn extract_links(&self, body: &str, base: &Url) -> Vec<Url>;
}

/// Extracts the `href` targets of `<a>` elements.
///
/// Empty targets, fragment-only targets and `javascript:`/`mailto:` links
/// are ignored, as are targets that do not resolve against the base URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &str, base: &Url) -> Vec<Url> {
        let document = Html::parse_document(body);
        let Ok(anchors) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        let hrefs = document
            .select(&anchors)
            .filter_map(|a| a.value().attr("href"));
        resolve_links(hrefs, base)
    }
}

/// Whether an `href` value can never lead to a resource.
fn is_ignored_target(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
}

/// Resolve raw `href` values against `base`, strip fragments and drop
/// duplicates, keeping the first occurrence.
pub fn resolve_links<'a, I>(hrefs: I, base: &Url) -> Vec<Url>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        let href = href.trim();
        if is_ignored_target(href) {
            continue;
        }
        let Ok(mut link) = base.join(href) else {
            continue;
        };
        link.set_fragment(None);
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}
