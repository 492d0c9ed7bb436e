use serde::{Deserialize, Serialize};

/// Institution an author is affiliated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub institution: String,
    pub country: Option<String>,
}

/// Author as reconstructed from a paper page byline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub full_name: String,
    pub affiliations: Vec<Affiliation>,
}

impl Author {
    /// Author with no known affiliation
    pub fn named(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            affiliations: Vec::new(),
        }
    }

    /// Author with a single affiliation
    pub fn affiliated(
        full_name: impl Into<String>,
        institution: impl Into<String>,
        country: Option<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            affiliations: vec![Affiliation {
                institution: institution.into(),
                country,
            }],
        }
    }
}
