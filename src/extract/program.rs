use std::collections::HashSet;

use reqwest::Url;
use scraper::Html;
use tracing::{info, warn};

use super::links_containing;
use crate::config::ScrapeConfig;
use crate::fetch::{load_document, DocumentSource};

/// Session page links on the technical program index, deduplicated with the
/// first occurrence keeping its place
pub fn parse_session_links(document: &Html, config: &ScrapeConfig) -> Vec<Url> {
    let mut seen = HashSet::new();
    links_containing(document, &config.session_link_marker)
        .filter_map(|href| {
            let resolved = config.resolve(href);
            if resolved.is_none() {
                warn!("Skipping unresolvable session link '{}'", href);
            }
            resolved
        })
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Fetch the technical program index; an unreachable index yields no sessions
pub async fn scrape_session_links<S: DocumentSource>(source: &S, config: &ScrapeConfig) -> Vec<Url> {
    let Some(program_url) = config.technical_program_url() else {
        warn!("Technical program path '{}' does not resolve", config.technical_program_path);
        return Vec::new();
    };
    let Some(document) = load_document(source, &program_url).await else {
        return Vec::new();
    };

    let urls = parse_session_links(&document, config);
    info!("Found {} unique technical session URLs.", urls.len());
    urls
}
