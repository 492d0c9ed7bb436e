use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::{info, warn};

use super::{configured_selector, stripped_text};
use crate::config::ScrapeConfig;
use crate::fetch::{load_document, DocumentSource};
use crate::models::{Session, SessionType};

static LEAD: Lazy<Selector> = Lazy::new(|| Selector::parse("strong").expect("valid constant selector"));
static ITEMS: Lazy<Selector> = Lazy::new(|| Selector::parse("li").expect("valid constant selector"));
static TUTORIAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z0-9\-]+):\s*(.*)").expect("valid regex"));

/// One session per listing block with a `CODE: Title` lead; other blocks are skipped
pub fn parse_tutorials_page(document: &Html, url: &Url, config: &ScrapeConfig) -> Vec<Session> {
    let Some(block_selector) = configured_selector(&config.tutorial_block_selector) else {
        return Vec::new();
    };

    let blocks: Vec<_> = document.select(&block_selector).collect();
    let pb = ProgressBar::new(blocks.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("Scraping tutorials [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut sessions = Vec::new();
    for block in pb.wrap_iter(blocks.into_iter()) {
        let Some(lead) = block.select(&LEAD).next() else {
            continue;
        };
        let lead_text = stripped_text(lead);
        let Some(caps) = TUTORIAL_CODE.captures(&lead_text) else {
            continue;
        };

        let mut session = Session::new(SessionType::Tutorial, url.as_str());
        session.session_id_internal = Some(caps[1].to_string());
        session.title = Some(caps[2].trim().to_string());

        for item in block.select(&ITEMS) {
            let text = stripped_text(item);
            if text.starts_with("Date:") {
                session.schedule.date = Some(text.replace("Date:", "").trim().to_string());
            } else if text.starts_with("Location:") {
                session.location = Some(text.replace("Location:", "").trim().to_string());
            }
        }

        if session.schedule.date.is_none() {
            warn!("Tutorial {} has no date", session.label());
        }
        sessions.push(session);
    }
    pb.finish_and_clear();

    sessions
}

/// Fetch the tutorials listing; an unreachable page yields no tutorials
pub async fn scrape_tutorials<S: DocumentSource>(source: &S, config: &ScrapeConfig) -> Vec<Session> {
    let Some(url) = config.tutorials_url() else {
        warn!("Tutorials path '{}' does not resolve", config.tutorials_path);
        return Vec::new();
    };
    let Some(document) = load_document(source, &url).await else {
        return Vec::new();
    };

    let sessions = parse_tutorials_page(&document, &url, config);
    info!("Found {} tutorials.", sessions.len());
    sessions
}
