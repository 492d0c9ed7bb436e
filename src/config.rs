//! Scrape configuration.
//!
//! Everything the pipeline needs to know about the target site lives in a
//! [`ScrapeConfig`] that is handed to each entry point. The default targets
//! the IGARSS 2025 program; tests build their own against a synthetic base
//! URL.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::compact::CompactionRules;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Static facts about the conference that are not scraped
#[derive(Debug, Clone)]
pub struct ConferenceInfo {
    pub name: String,
    pub dates: String,
    pub location: String,
    /// Forced onto every parsed session date
    pub year: i32,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub conference: ConferenceInfo,
    /// Every link found in a page is resolved against this
    pub base_url: Url,
    pub technical_program_path: String,
    pub tutorials_path: String,
    pub output_path: PathBuf,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Substring identifying links to session pages
    pub session_link_marker: String,
    /// Substring identifying links to paper pages
    pub paper_link_marker: String,
    /// Preferred header element on a session page, tried before h3/h2/h1
    pub session_header_selector: String,
    /// Repeated block on the tutorials page
    pub tutorial_block_selector: String,
    /// Tokens that mark a block of text as an author/affiliation byline
    pub affiliation_markers: Vec<String>,
    pub compaction: CompactionRules,
}

impl ScrapeConfig {
    /// Configuration for the IGARSS 2025 program site
    pub fn igarss_2025() -> Self {
        Self {
            conference: ConferenceInfo {
                name: "IGARSS 2025".to_string(),
                dates: "2025-08-03 to 2025-08-08".to_string(),
                location: "Brisbane, Australia".to_string(),
                year: 2025,
            },
            base_url: Url::parse("https://www.2025.ieeeigarss.org/").expect("valid base URL"),
            technical_program_path: "technical_program.php".to_string(),
            tutorials_path: "tutorials.php".to_string(),
            output_path: PathBuf::from("igarss_2025_program.json"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(15),
            session_link_marker: "view_session.php".to_string(),
            paper_link_marker: "view_paper.php".to_string(),
            session_header_selector: "div.card-header".to_string(),
            tutorial_block_selector: "div.col-lg-12.mb-4".to_string(),
            affiliation_markers: vec!["University".to_string(), "China".to_string()],
            compaction: CompactionRules::default(),
        }
    }

    /// Same site layout, different host. Used for mirrors and tests.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Resolve a (possibly relative) link against the base URL
    pub fn resolve(&self, href: &str) -> Option<Url> {
        self.base_url.join(href.trim()).ok()
    }

    pub fn technical_program_url(&self) -> Option<Url> {
        self.resolve(&self.technical_program_path)
    }

    pub fn tutorials_url(&self) -> Option<Url> {
        self.resolve(&self.tutorials_path)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::igarss_2025()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ScrapeConfig::default();
        assert_eq!(
            config.technical_program_url().unwrap().as_str(),
            "https://www.2025.ieeeigarss.org/technical_program.php"
        );
        assert_eq!(
            config.tutorials_url().unwrap().as_str(),
            "https://www.2025.ieeeigarss.org/tutorials.php"
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let config = ScrapeConfig::default()
            .with_base_url(Url::parse("https://conf.example.org/program/").unwrap());
        assert_eq!(
            config.resolve("view_paper.php?PaperNum=42").unwrap().as_str(),
            "https://conf.example.org/program/view_paper.php?PaperNum=42"
        );
        assert_eq!(
            config.resolve("https://other.example.org/x").unwrap().as_str(),
            "https://other.example.org/x"
        );
    }

    #[test]
    fn test_default_year_matches_name() {
        let config = ScrapeConfig::default();
        assert!(config.conference.name.contains(&config.conference.year.to_string()));
    }
}
