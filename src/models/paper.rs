use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Author;

/// Where and when a record was captured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub source_url: String,
    pub extraction_timestamp: DateTime<Utc>,
}

impl Provenance {
    /// Stamp a record captured from `source_url` right now
    pub fn now(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            extraction_timestamp: Utc::now(),
        }
    }
}

/// Paper extracted from a `view_paper.php` page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// `PaperNum` query parameter of the page URL
    pub paper_id_system: Option<i64>,
    pub title: Option<String>,
    pub authors: Vec<Author>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub provenance: Provenance,
}
