use serde::{Deserialize, Serialize};

use super::Session;

/// Sessions sharing one resolved calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// ISO date (`2025-08-04`) or the raw date text when it could not be parsed
    pub date: String,
    pub day_of_week: Option<String>,
    pub sessions: Vec<Session>,
}

/// Full scraped program, the root of the output tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    pub conference_name: String,
    pub conference_dates: String,
    pub location: String,
    pub main_program_url: String,
    pub days: Vec<Day>,
}

impl Conference {
    pub fn session_count(&self) -> usize {
        self.days.iter().map(|d| d.sessions.len()).sum()
    }

    pub fn paper_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| &d.sessions)
            .map(|s| s.papers.len())
            .sum()
    }
}
