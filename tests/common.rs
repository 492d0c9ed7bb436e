#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use confprogram::{DocumentSource, FetchError, ScrapeConfig};
use reqwest::Url;

pub const BASE: &str = "https://conf.example.org/";

/// In-memory site: URL → HTML. Unknown URLs fail like a 404.
#[derive(Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `html` under `path`, resolved against [`BASE`]
    pub fn page(mut self, path: &str, html: &str) -> Self {
        let url = Url::parse(BASE).unwrap().join(path).unwrap();
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl DocumentSource for StaticSource {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::new(url, "404 Not Found"))
    }
}

/// Default site layout pointed at [`BASE`], writing into `dir`
pub fn test_config(dir: &Path) -> ScrapeConfig {
    let mut config = ScrapeConfig::default().with_base_url(Url::parse(BASE).unwrap());
    config.output_path = dir.join("program.json");
    config
}

pub fn session_page(header: &str, details: &str, paper_links: &[&str]) -> String {
    let links: String = paper_links
        .iter()
        .map(|href| format!(r#"<li><a href="{}">paper</a></li>"#, href))
        .collect();
    format!(
        r#"<html><body>
        <div class="card">
          <div class="card-header">{}</div>
          <div class="card-body">{}</div>
        </div>
        <ul>{}</ul>
        </body></html>"#,
        header, details, links
    )
}

pub fn paper_page(title: &str, byline: &str) -> String {
    format!(
        "<html><body><div class=\"content\"><h3>{}</h3><p>{}</p></div></body></html>",
        title, byline
    )
}
