use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html};
use tracing::{debug, info, warn};

use super::{
    configured_selector, first_located, links_containing, scrape_paper, spaced_text, stripped_text,
    Locator, H1, H2, H3,
};
use crate::config::ScrapeConfig;
use crate::fetch::{load_document, query_id, DocumentSource};
use crate::models::{Session, SessionType};

/// `MO1.R1: Sea Ice` → code + title
static CODE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Z0-9.\-]+):\s*(.*)$").expect("valid regex"));
static LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Location:\s*([^|]+)").expect("valid regex"));
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bDate:\s*([^|]+)").expect("valid regex"));
static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bTime:\s*(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}:\d{2})").expect("valid regex")
});

/// A session page before its papers are fetched
#[derive(Debug)]
pub struct SessionPage {
    pub session: Session,
    /// Resolved paper links in document order, duplicates kept
    pub paper_urls: Vec<Url>,
}

/// Split `CODE: Title` header text. Text that does not start with a code is
/// all title.
pub fn split_code_title(text: &str) -> (Option<String>, String) {
    match CODE_TITLE.captures(text) {
        Some(caps) => (Some(caps[1].trim().to_string()), caps[2].trim().to_string()),
        None => (None, text.to_string()),
    }
}

/// Value after a `Marker:` up to the next `|` or the end of the text
fn marker_value(pattern: &Regex, text: &str) -> Option<String> {
    pattern.captures(text).map(|caps| caps[1].trim().to_string())
}

pub fn parse_session_page(document: &Html, url: &Url, config: &ScrapeConfig) -> SessionPage {
    let mut session = Session::new(SessionType::Technical, url.as_str());
    session.session_id_system = query_id(url, "SessionID");

    let preferred = configured_selector(&config.session_header_selector);
    let mut header_chain: Vec<&dyn Locator<'_>> = Vec::with_capacity(4);
    if let Some(selector) = preferred.as_ref() {
        header_chain.push(selector);
    }
    header_chain.extend([&*H3 as &dyn Locator<'_>, &*H2, &*H1]);
    let header = first_located(document, &header_chain);

    match header {
        Some(el) => {
            let (code, title) = split_code_title(&stripped_text(el));
            session.session_id_internal = code;
            session.title = Some(title);
        }
        None => warn!("Could not find session header on {}", url),
    }

    let details = match header.and_then(|el| el.parent()).and_then(ElementRef::wrap) {
        Some(container) => spaced_text(container),
        None => spaced_text(document.root_element()),
    };

    session.location = marker_value(&LOCATION, &details);
    if session.location.is_none() {
        debug!("No location marker on {}", url);
    }

    session.schedule.date = marker_value(&DATE, &details);
    if session.schedule.date.is_none() {
        warn!("Could not find session date on {}", url);
    }
    if let Some(caps) = TIME_RANGE.captures(&details) {
        session.schedule.start_time = Some(caps[1].to_string());
        session.schedule.end_time = Some(caps[2].to_string());
    }

    let paper_urls = links_containing(document, &config.paper_link_marker)
        .filter_map(|href| {
            let resolved = config.resolve(href);
            if resolved.is_none() {
                warn!("Skipping unresolvable paper link '{}' on {}", href, url);
            }
            resolved
        })
        .collect();

    SessionPage { session, paper_urls }
}

/// Fetch a session page and every paper it links to, in link order
pub async fn scrape_session<S: DocumentSource>(source: &S, config: &ScrapeConfig, url: &Url) -> Option<Session> {
    let document = load_document(source, url).await?;
    let SessionPage { mut session, paper_urls } = parse_session_page(&document, url, config);
    drop(document);

    let pb = ProgressBar::new(paper_urls.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  {msg} [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Scraping papers in session {}", session.label()));

    for paper_url in &paper_urls {
        if let Some(paper) = scrape_paper(source, config, paper_url).await {
            session.papers.push(paper);
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "Session {}: {} of {} papers extracted",
        session.label(),
        session.papers.len(),
        paper_urls.len()
    );
    Some(session)
}
