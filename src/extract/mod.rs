//! Extraction of program records from parsed pages.
//!
//! Each extractor has a synchronous `parse_*` function that works on an
//! already parsed [`Html`] document, and an async `scrape_*` wrapper that
//! fetches the page first. Element lookups that have fallbacks are expressed
//! as ordered chains of [`Locator`]s evaluated by [`first_located`].

pub mod paper;
pub mod program;
pub mod session;
pub mod tutorials;

pub use paper::{parse_author_block, parse_paper_page, scrape_paper, AuthorParseError};
pub use program::{parse_session_links, scrape_session_links};
pub use session::{parse_session_page, scrape_session, SessionPage};
pub use tutorials::{parse_tutorials_page, scrape_tutorials};

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::error;

pub(crate) static H1: Lazy<Selector> = Lazy::new(|| css("h1"));
pub(crate) static H2: Lazy<Selector> = Lazy::new(|| css("h2"));
pub(crate) static H3: Lazy<Selector> = Lazy::new(|| css("h3"));
pub(crate) static LINKS: Lazy<Selector> = Lazy::new(|| css("a[href]"));
pub(crate) static BLOCKS: Lazy<Selector> = Lazy::new(|| css("p, div"));

fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid constant selector")
}

/// Parse a configured selector, logging instead of failing
pub(crate) fn configured_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(s) => Some(s),
        Err(e) => {
            error!("Invalid selector '{}': {}", selector, e);
            None
        }
    }
}

/// One way of finding an element in a document
pub trait Locator<'a> {
    fn locate(&self, document: &'a Html) -> Option<ElementRef<'a>>;
}

/// First element in document order matching the selector
impl<'a> Locator<'a> for Selector {
    fn locate(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(self).next()
    }
}

/// First following sibling of `anchor` with one of the given tag names
pub struct FollowingSibling<'a> {
    pub anchor: Option<ElementRef<'a>>,
    pub names: &'static [&'static str],
}

impl<'a> Locator<'a> for FollowingSibling<'a> {
    fn locate(&self, _document: &'a Html) -> Option<ElementRef<'a>> {
        self.anchor?
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| self.names.contains(&el.value().name()))
    }
}

/// First element matching `selector` whose text contains any marker
pub struct ContainingText<'m> {
    pub selector: &'m Selector,
    pub markers: &'m [String],
}

impl<'a, 'm> Locator<'a> for ContainingText<'m> {
    fn locate(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(self.selector).find(|el| {
            let text: String = el.text().collect();
            self.markers.iter().any(|m| text.contains(m.as_str()))
        })
    }
}

/// Evaluate locators in order; the first hit wins
pub fn first_located<'a>(document: &'a Html, chain: &[&dyn Locator<'a>]) -> Option<ElementRef<'a>> {
    chain.iter().find_map(|locator| locator.locate(document))
}

/// First h3, else first h2, else first h1
pub fn heading(document: &Html) -> Option<ElementRef<'_>> {
    let chain: [&dyn Locator<'_>; 3] = [&*H3, &*H2, &*H1];
    first_located(document, &chain)
}

/// Text fragments trimmed and concatenated with no separator
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Text fragments trimmed and joined with single spaces
pub fn spaced_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hrefs of every link whose target contains `marker`, in document order
pub(crate) fn links_containing<'a>(document: &'a Html, marker: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    document
        .select(&LINKS)
        .filter_map(|a| a.value().attr("href"))
        .filter(move |href| href.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_chain_prefers_h3() {
        let doc = Html::parse_document("<h1>One</h1><h2>Two</h2><h3>Three</h3>");
        let found = heading(&doc).unwrap();
        assert_eq!(stripped_text(found), "Three");
    }

    #[test]
    fn test_heading_chain_falls_through() {
        let doc = Html::parse_document("<h1>One</h1><p>text</p>");
        let found = heading(&doc).unwrap();
        assert_eq!(found.value().name(), "h1");

        let doc = Html::parse_document("<p>no headings</p>");
        assert!(heading(&doc).is_none());
    }

    #[test]
    fn test_following_sibling_skips_other_tags() {
        let doc = Html::parse_document("<div><h3>T</h3><span>x</span><p>Byline</p><div>later</div></div>");
        let anchor = H3.locate(&doc);
        let sibling = FollowingSibling { anchor, names: &["p", "div"] };
        assert_eq!(stripped_text(sibling.locate(&doc).unwrap()), "Byline");
    }

    #[test]
    fn test_following_sibling_without_anchor() {
        let doc = Html::parse_document("<p>x</p>");
        let sibling = FollowingSibling { anchor: None, names: &["p"] };
        assert!(sibling.locate(&doc).is_none());
    }

    #[test]
    fn test_containing_text_document_order() {
        let doc = Html::parse_document("<p>Nothing</p><div><p>MIT, Harvard University</p></div>");
        let markers = vec!["University".to_string()];
        let locator = ContainingText { selector: &BLOCKS, markers: &markers };
        // the enclosing div comes first in document order
        assert_eq!(locator.locate(&doc).unwrap().value().name(), "div");
    }

    #[test]
    fn test_text_flattening() {
        let doc = Html::parse_document("<div id='x'>  Alice <b> Smith </b>, MIT </div>");
        let el = doc.select(&css("#x")).next().unwrap();
        assert_eq!(stripped_text(el), "AliceSmith, MIT");
        assert_eq!(spaced_text(el), "Alice Smith , MIT");
    }

    #[test]
    fn test_configured_selector_invalid() {
        assert!(configured_selector("div[").is_none());
        assert!(configured_selector("div.card-header").is_some());
    }
}
