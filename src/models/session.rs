use serde::{Deserialize, Serialize};

use super::{Paper, Provenance};

/// Kind of program block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "Technical Session")]
    Technical,
    #[serde(rename = "Tutorial")]
    Tutorial,
}

/// Schedule details as found on the page (date is kept verbatim)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub date: Option<String>,
}

/// Technical session or tutorial block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// `SessionID` query parameter of the page URL
    pub session_id_system: Option<i64>,
    /// Track/session code such as `MO1.R1` or `TU-3`
    pub session_id_internal: Option<String>,
    pub title: Option<String>,
    pub session_type: SessionType,
    pub schedule: Schedule,
    pub location: Option<String>,
    pub papers: Vec<Paper>,
    pub provenance: Provenance,
}

impl Session {
    /// Empty session of the given type, captured from `source_url`
    pub fn new(session_type: SessionType, source_url: impl Into<String>) -> Self {
        Self {
            session_id_system: None,
            session_id_internal: None,
            title: None,
            session_type,
            schedule: Schedule::default(),
            location: None,
            papers: Vec::new(),
            provenance: Provenance::now(source_url),
        }
    }

    /// Code if known, for log lines
    pub fn label(&self) -> &str {
        self.session_id_internal.as_deref().unwrap_or("...")
    }
}
