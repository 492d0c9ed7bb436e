//! Overview and keyword search over a compact program file.
//!
//! The structs here mirror the output after compaction with the default
//! rules (`loc`, `type`, `aut`, `name`, `aff`, `ins`, `start`, `end`).

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::normalize_text;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "what", "who", "when", "where", "how", "about", "find", "show", "get",
];
const SESSION_KINDS: &[&str] = &["poster", "oral", "keynote"];
const WEEKDAYS: &[&str] = &["monday", "tuesday", "wednesday", "thursday", "friday"];

#[derive(Debug, Clone, Deserialize)]
pub struct CompactProgram {
    pub conference_name: String,
    pub conference_dates: String,
    #[serde(default)]
    pub loc: Option<String>,
    #[serde(default)]
    pub days: Vec<CompactDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompactDay {
    pub date: String,
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub sessions: Vec<CompactSession>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompactSchedule {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompactSession {
    #[serde(default)]
    pub session_id_internal: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub schedule: CompactSchedule,
    #[serde(default)]
    pub loc: Option<String>,
    #[serde(default)]
    pub papers: Vec<CompactPaper>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompactPaper {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub aut: Vec<CompactAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompactAuthor {
    pub name: String,
    #[serde(default)]
    pub aff: Vec<CompactAffiliation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompactAffiliation {
    pub ins: String,
}

pub fn load_program(path: &Path) -> Result<CompactProgram> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Headline numbers for a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub name: String,
    pub dates: String,
    pub location: String,
    pub total_days: usize,
    pub total_sessions: usize,
    pub total_papers: usize,
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Dates:    {}", self.dates)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Days:     {}", self.total_days)?;
        writeln!(f, "Sessions: {}", self.total_sessions)?;
        write!(f, "Papers:   {}", self.total_papers)
    }
}

pub fn overview(program: &CompactProgram) -> Overview {
    let sessions = program.days.iter().flat_map(|d| &d.sessions);
    Overview {
        name: program.conference_name.clone(),
        dates: program.conference_dates.clone(),
        location: program.loc.clone().unwrap_or_default(),
        total_days: program.days.len(),
        total_sessions: sessions.clone().count(),
        total_papers: sessions.map(|s| s.papers.len()).sum(),
    }
}

/// A matching session and the day it belongs to
#[derive(Debug, Clone)]
pub struct SearchHit<'p> {
    pub day: &'p CompactDay,
    pub session: &'p CompactSession,
}

#[derive(Debug, Clone)]
pub struct SearchResponse<'p> {
    pub query: String,
    pub summary: String,
    pub contextual_summary: String,
    pub results: Vec<SearchHit<'p>>,
}

/// Words worth matching on: longer than two characters, not a stop word,
/// reduced to word characters
pub fn keywords(query: &str) -> Vec<String> {
    normalize_text(query)
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        .map(|w| w.chars().filter(|c| c.is_alphanumeric() || *c == '_').collect::<String>())
        .collect()
}

fn searchable_text(session: &CompactSession) -> String {
    let mut parts: Vec<&str> = Vec::new();
    parts.extend(session.title.as_deref());
    parts.extend(session.kind.as_deref());
    parts.extend(session.loc.as_deref());
    for paper in &session.papers {
        parts.extend(paper.title.as_deref());
        for author in &paper.aut {
            parts.push(&author.name);
            parts.extend(author.aff.iter().map(|a| a.ins.as_str()));
        }
    }
    normalize_text(&parts.join(" "))
}

fn session_matches(day: &CompactDay, session: &CompactSession, query: &str, keywords: &[String]) -> bool {
    let text = searchable_text(session);
    if text.contains(query) {
        return true;
    }

    let kind = session.kind.as_deref().map(normalize_text).unwrap_or_default();
    if SESSION_KINDS.iter().any(|k| query.contains(k) && kind.contains(k)) {
        return true;
    }

    if let Some(weekday) = WEEKDAYS.iter().find(|d| query.contains(*d)) {
        let on_day = [day.day_of_week.as_deref(), session.schedule.date.as_deref()]
            .into_iter()
            .flatten()
            .any(|d| normalize_text(d).contains(weekday));
        if on_day {
            return true;
        }
    }

    let hits = keywords.iter().filter(|k| text.contains(k.as_str())).count();
    hits >= keywords.len().min(2)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

pub fn summarize(hits: &[SearchHit<'_>], query: &str) -> String {
    if hits.is_empty() {
        return format!("No sessions or papers found matching \"{}\".", query);
    }

    let papers: usize = hits.iter().map(|h| h.session.papers.len()).sum();
    let mut summary = format!("Found {}", plural(hits.len(), "session"));
    if papers > 0 {
        summary.push_str(&format!(" and {}", plural(papers, "paper")));
    }
    summary.push_str(&format!(" related to \"{}\".", query));

    if query.to_lowercase().contains("poster") {
        let posters = hits
            .iter()
            .filter(|h| {
                h.session
                    .kind
                    .as_deref()
                    .is_some_and(|k| k.to_lowercase().contains("poster"))
            })
            .count();
        if posters > 0 {
            summary.push_str(&format!(" Includes {}.", plural(posters, "poster session")));
        }
    }

    summary
}

/// Values in first-seen order, each once
fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(*v)).collect()
}

fn track(session: &CompactSession) -> &str {
    session.title.as_deref().unwrap_or_default()
}

fn mentions_author(hits: &[SearchHit<'_>], query: &str) -> bool {
    hits.iter()
        .flat_map(|h| &h.session.papers)
        .flat_map(|p| &p.aut)
        .filter_map(|a| normalize_text(&a.name).split(' ').next().map(str::to_string))
        .any(|first| !first.is_empty() && query.contains(&first))
}

fn mentions_ai_topic(query: &str) -> bool {
    query.contains("machine learning")
        || query.contains("deep learning")
        || query.split(|c: char| !c.is_alphanumeric()).any(|w| w == "ai")
}

/// Longer descriptive text to go with [`summarize`]. The first matching
/// angle wins: authors named in the query, AI topics, posters, then a
/// generic breakdown by track and session type.
pub fn contextual_summary(hits: &[SearchHit<'_>], query: &str) -> String {
    if hits.is_empty() {
        return "No additional context available as no matching results were found.".to_string();
    }

    let query = normalize_text(query);
    let papers = || hits.iter().flat_map(|h| &h.session.papers);

    if mentions_author(hits, &query) {
        let institutions = distinct(
            papers()
                .flat_map(|p| &p.aut)
                .map(|a| a.aff.first().map(|f| f.ins.as_str()).unwrap_or_default()),
        );
        let topics = distinct(papers().map(|p| p.title.as_deref().unwrap_or_default()));
        let examples = topics.iter().take(3).copied().collect::<Vec<_>>().join(", ");
        let more = if topics.len() > 3 { ", and others" } else { "" };
        return format!(
            "The search reveals contributions from researchers across {}, with work spanning {} in areas such as {}{}. \
             This demonstrates active research collaboration and diverse expertise in the queried domain.",
            plural(institutions.len(), "institution"),
            plural(topics.len(), "paper"),
            examples,
            more
        );
    }

    let tracks = distinct(hits.iter().map(|h| track(h.session)));

    if mentions_ai_topic(&query) {
        let verb = if hits.len() == 1 { "demonstrates" } else { "demonstrate" };
        return format!(
            "The machine learning and AI research at this conference spans {} ({}), indicating the \
             interdisciplinary nature of AI applications in remote sensing and geoscience. The {} {} the growing \
             integration of advanced computational methods across various Earth observation domains.",
            plural(tracks.len(), "track"),
            tracks.join(", "),
            plural(hits.len(), "session"),
            verb
        );
    }

    if query.contains("poster") {
        let posters = hits
            .iter()
            .filter(|h| h.session.kind.as_deref().is_some_and(|k| k.to_lowercase().contains("poster")))
            .count();
        return format!(
            "Poster sessions provide an interactive forum for detailed technical discussions. The {} found cover \
             diverse research areas, offering opportunities for in-depth conversations between researchers and \
             attendees about cutting-edge developments in their respective fields.",
            plural(posters, "poster session")
        );
    }

    let kinds = distinct(hits.iter().map(|h| h.session.kind.as_deref().unwrap_or_default()));
    format!(
        "The search results span {} and include {} ({}). This diversity reflects the multidisciplinary nature of \
         the research area and provides multiple venues for knowledge sharing, from formal presentations to \
         interactive discussions.",
        plural(tracks.len(), "conference track"),
        plural(kinds.len(), "different session type"),
        kinds.join(", ")
    )
}

/// Sessions matching `query`, in day and session order
pub fn search<'p>(program: &'p CompactProgram, query: &str) -> SearchResponse<'p> {
    let normalized = normalize_text(query);
    let keywords = keywords(query);

    let results: Vec<SearchHit<'p>> = program
        .days
        .iter()
        .flat_map(|day| day.sessions.iter().map(move |session| SearchHit { day, session }))
        .filter(|hit| session_matches(hit.day, hit.session, &normalized, &keywords))
        .collect();

    SearchResponse {
        query: query.to_string(),
        summary: summarize(&results, query),
        contextual_summary: contextual_summary(&results, query),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> CompactProgram {
        serde_json::from_value(serde_json::json!({
            "conference_name": "IGARSS 2025",
            "conference_dates": "2025-08-03 to 2025-08-08",
            "loc": "Brisbane, Australia",
            "main_program_url": "https://www.2025.ieeeigarss.org/technical_program.php",
            "days": [
                {"date": "2025-08-03", "day_of_week": "Sunday", "sessions": [
                    {"session_id_internal": "TU-1", "title": "SAR Interferometry Basics", "type": "Tutorial",
                     "schedule": {"start": null, "end": null, "date": "Sunday, 03 August 2025"},
                     "loc": "Room M1", "papers": []}
                ]},
                {"date": "2025-08-04", "day_of_week": "Monday", "sessions": [
                    {"session_id_internal": "MO1.R1", "title": "Sea Ice", "type": "Technical Session",
                     "schedule": {"start": "08:30", "end": "10:10", "date": "Monday, 04 August 2025"},
                     "loc": "Room 1", "papers": [
                        {"title": "Deep learning for sea ice classification",
                         "aut": [{"name": "Alice Smith", "aff": [{"ins": "MIT"}]}]},
                        {"title": "Arctic melt ponds", "aut": [{"name": "Bob Lee", "aff": []}]}
                    ]},
                    {"session_id_internal": "MO2.P1", "title": "Poster: Soil Moisture", "type": "Poster Session",
                     "schedule": {"date": "Monday, 04 August 2025"}, "loc": "Hall B", "papers": [
                        {"title": "L-band retrievals", "aut": [{"name": "Carol Jones", "aff": [{"ins": "Stanford University"}]}]}
                    ]}
                ]}
            ]
        }))
        .unwrap()
    }

    fn codes(response: &SearchResponse<'_>) -> Vec<String> {
        response
            .results
            .iter()
            .filter_map(|h| h.session.session_id_internal.clone())
            .collect()
    }

    #[test]
    fn test_overview() {
        let o = overview(&program());
        assert_eq!(o.name, "IGARSS 2025");
        assert_eq!(o.location, "Brisbane, Australia");
        assert_eq!(o.total_days, 2);
        assert_eq!(o.total_sessions, 3);
        assert_eq!(o.total_papers, 3);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(keywords("Show me the sea-ice papers by MIT"), ["seaice", "papers", "mit"]);
        assert!(keywords("a to of").is_empty());
    }

    #[test]
    fn test_search_phrase_in_paper_title() {
        let p = program();
        let r = search(&p, "Deep Learning");
        assert_eq!(codes(&r), ["MO1.R1"]);
        assert_eq!(r.summary, "Found 1 session and 2 papers related to \"Deep Learning\".");
    }

    #[test]
    fn test_search_author_and_institution() {
        let p = program();
        assert_eq!(codes(&search(&p, "carol jones")), ["MO2.P1"]);
        assert_eq!(codes(&search(&p, "Stanford")), ["MO2.P1"]);
    }

    #[test]
    fn test_search_accent_insensitive_query() {
        let p = program();
        assert_eq!(codes(&search(&p, "Interférometry")), ["TU-1"]);
    }

    #[test]
    fn test_search_poster_kind() {
        let p = program();
        let r = search(&p, "poster");
        assert_eq!(codes(&r), ["MO2.P1"]);
        assert!(r.summary.ends_with(" Includes 1 poster session."));
    }

    #[test]
    fn test_search_weekday() {
        let p = program();
        assert_eq!(codes(&search(&p, "what is on monday")), ["MO1.R1", "MO2.P1"]);
    }

    #[test]
    fn test_search_two_keywords_needed() {
        let p = program();
        assert_eq!(codes(&search(&p, "arctic ponds")), ["MO1.R1"]);
        assert!(search(&p, "arctic volcanoes").results.is_empty());
    }

    #[test]
    fn test_search_no_results_summary() {
        let p = program();
        let r = search(&p, "quantum gravity");
        assert!(r.results.is_empty());
        assert_eq!(r.summary, "No sessions or papers found matching \"quantum gravity\".");
    }

    #[test]
    fn test_contextual_summary_author_focus() {
        let p = program();
        let r = search(&p, "carol jones");
        assert!(r.contextual_summary.starts_with(
            "The search reveals contributions from researchers across 1 institution, \
             with work spanning 1 paper in areas such as L-band retrievals."
        ));
    }

    #[test]
    fn test_contextual_summary_ai_topic() {
        let p = program();
        let r = search(&p, "Deep Learning");
        assert!(r
            .contextual_summary
            .starts_with("The machine learning and AI research at this conference spans 1 track (Sea Ice),"));
        assert!(r.contextual_summary.contains("The 1 session demonstrates the growing integration"));
    }

    #[test]
    fn test_contextual_summary_ai_needs_whole_word() {
        assert!(mentions_ai_topic("ai for floods"));
        assert!(!mentions_ai_topic("rain gauges"));
    }

    #[test]
    fn test_contextual_summary_poster_focus() {
        let p = program();
        let r = search(&p, "poster");
        assert!(r.contextual_summary.contains("The 1 poster session found cover diverse research areas"));
    }

    #[test]
    fn test_contextual_summary_generic() {
        let p = program();
        let r = search(&p, "what is on monday");
        assert!(r.contextual_summary.starts_with(
            "The search results span 2 conference tracks and include 2 different session types \
             (Technical Session, Poster Session)."
        ));
    }

    #[test]
    fn test_contextual_summary_no_results() {
        let p = program();
        let r = search(&p, "quantum gravity");
        assert_eq!(
            r.contextual_summary,
            "No additional context available as no matching results were found."
        );
    }

    #[test]
    fn test_load_program_missing_file() {
        assert!(load_program(Path::new("/nonexistent/program.json")).is_err());
    }
}
