//! Document access.
//!
//! A [`DocumentSource`] turns a URL into raw markup or a [`FetchError`].
//! The HTTP implementation applies the configured timeout and client
//! identification; tests substitute an in-memory source. Callers go through
//! [`load_document`], which parses the markup and absorbs failures into
//! `None` after logging them.

use std::future::Future;

use reqwest::{Client, Url};
use scraper::Html;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::ScrapeConfig;

/// Any failure to obtain a page. HTTP status, network and decoding errors are
/// not distinguished.
#[derive(Debug, Error)]
#[error("could not fetch {url}: {reason}")]
pub struct FetchError {
    pub url: String,
    pub reason: String,
}

impl FetchError {
    pub fn new(url: &Url, reason: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub trait DocumentSource {
    /// Fetch the markup behind `url`
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>>;
}

/// Live HTTP source
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &ScrapeConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::new(url, e))?;

        response.text().await.map_err(|e| FetchError::new(url, e))
    }
}

/// Fetch and parse a page, logging and swallowing any failure
pub async fn load_document<S: DocumentSource>(source: &S, url: &Url) -> Option<Html> {
    debug!("Fetching {}", url);
    match source.fetch(url).await {
        Ok(body) => Some(Html::parse_document(&body)),
        Err(e) => {
            error!("Could not fetch or parse URL {}: {}", url, e);
            None
        }
    }
}

/// Integer value of query parameter `name`, or `None` if absent or not an integer
///
/// # Examples
/// ```
/// use confprogram::fetch::query_id;
/// use reqwest::Url;
///
/// let url = Url::parse("https://conf.example.org/view_paper.php?PaperNum=42").unwrap();
/// assert_eq!(query_id(&url, "PaperNum"), Some(42));
/// assert_eq!(query_id(&url, "SessionID"), None);
/// ```
pub fn query_id(url: &Url, name: &str) -> Option<i64> {
    let (_, value) = url.query_pairs().find(|(key, value)| key == name && !value.is_empty())?;
    match value.trim().parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            debug!("Ignoring non-numeric {}={:?} in {}", name, value, url);
            None
        }
    }
}
