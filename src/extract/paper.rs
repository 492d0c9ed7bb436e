use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::Html;
use thiserror::Error;
use tracing::{error, warn};

use super::{first_located, heading, stripped_text, ContainingText, FollowingSibling, Locator, BLOCKS};
use crate::config::ScrapeConfig;
use crate::fetch::{load_document, query_id, DocumentSource};
use crate::models::{Author, Paper, Provenance};

static GROUP_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s*").expect("valid regex"));
static ABSTRACT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)abstract\s*:?\s*").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthorParseError {
    #[error("unexpected character {0:?} in author text")]
    InvalidCharacter(char),
}

/// Split a flattened byline into authors.
///
/// Groups are separated by `;`, parts within a group by `,`. A group with
/// more than two parts reads as `names..., institution, country` and every
/// name gets that one affiliation; two parts are `name, institution`; one
/// part is a bare name. This is a positional heuristic: an institution that
/// itself contains a comma is split like any other part.
///
/// # Examples
/// ```
/// use confprogram::extract::parse_author_block;
///
/// let authors = parse_author_block("Alice Smith, Bob Lee, MIT, USA").unwrap();
/// assert_eq!(authors.len(), 2);
/// assert_eq!(authors[1].affiliations[0].institution, "MIT");
/// ```
pub fn parse_author_block(text: &str) -> Result<Vec<Author>, AuthorParseError> {
    if let Some(c) = text.chars().find(|c| c.is_control() && !c.is_whitespace()) {
        return Err(AuthorParseError::InvalidCharacter(c));
    }

    let mut authors = Vec::new();
    for group in GROUP_SEPARATOR.split(text) {
        let parts: Vec<&str> = group
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [] => {}
            [name] => authors.push(Author::named(*name)),
            [name, institution] => authors.push(Author::affiliated(*name, *institution, None)),
            [names @ .., institution, country] => {
                for name in names {
                    authors.push(Author::affiliated(
                        *name,
                        *institution,
                        Some(country.to_string()),
                    ));
                }
            }
        }
    }

    Ok(authors)
}

/// Extract a paper from its page. Missing pieces are logged and left empty.
pub fn parse_paper_page(document: &Html, url: &Url, config: &ScrapeConfig) -> Paper {
    let mut paper = Paper {
        paper_id_system: query_id(url, "PaperNum"),
        title: None,
        authors: Vec::new(),
        abstract_text: None,
        provenance: Provenance::now(url.as_str()),
    };

    let title_el = heading(document);
    match title_el {
        Some(el) => paper.title = Some(stripped_text(el)),
        None => warn!("Could not find title on {}", url),
    }

    let after_title = FollowingSibling { anchor: title_el, names: &["p", "div"] };
    let with_marker = ContainingText { selector: &BLOCKS, markers: &config.affiliation_markers };
    let byline_chain: [&dyn Locator<'_>; 2] = [&after_title, &with_marker];
    let byline = first_located(document, &byline_chain);

    match byline {
        Some(el) => {
            let text = stripped_text(el);
            paper.authors = parse_author_block(&text).unwrap_or_else(|e| {
                error!("Could not parse author string '{}' on {}: {}", text, url, e);
                vec![Author::named(text.clone())]
            });
        }
        None => warn!("Could not find author information on {}", url),
    }

    paper.abstract_text = document
        .select(&BLOCKS)
        .map(stripped_text)
        .find(|text| ABSTRACT_MARKER.is_match(text))
        .map(|text| ABSTRACT_MARKER.replace(&text, "").into_owned());

    paper
}

/// Fetch and extract one paper; `None` only when the page could not be loaded
pub async fn scrape_paper<S: DocumentSource>(source: &S, config: &ScrapeConfig, url: &Url) -> Option<Paper> {
    let document = load_document(source, url).await?;
    Some(parse_paper_page(&document, url, config))
}
