//! Grouping of scraped sessions into calendar days.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Day, Session};
use crate::utils::day_key;

/// Bucket sessions by resolved date.
///
/// Sessions without a date (or with an empty one) are dropped. Dates that do
/// not parse are used verbatim as their own bucket with no weekday. Within a
/// bucket sessions keep their input order; buckets are sorted by key as plain
/// strings, so raw keys land wherever their text sorts (`"TBD"` after every
/// ISO date).
pub fn organize_days(sessions: Vec<Session>, year: i32) -> Vec<Day> {
    let mut days: Vec<Day> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for session in sessions {
        let raw = match session.schedule.date.as_deref() {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                debug!("Dropping session {} without a date", session.label());
                continue;
            }
        };

        let (date, day_of_week) = day_key(raw, year);
        let slot = *index.entry(date.clone()).or_insert_with(|| {
            days.push(Day {
                date,
                day_of_week,
                sessions: Vec::new(),
            });
            days.len() - 1
        });
        days[slot].sessions.push(session);
    }

    days.sort_by(|a, b| a.date.cmp(&b.date));
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionType;

    fn session(code: &str, date: Option<&str>) -> Session {
        let mut s = Session::new(SessionType::Technical, "https://conf.example.org/view_session.php");
        s.session_id_internal = Some(code.to_string());
        s.schedule.date = date.map(str::to_string);
        s
    }

    fn codes(day: &Day) -> Vec<&str> {
        day.sessions.iter().map(|s| s.label()).collect()
    }

    #[test]
    fn test_groups_by_parsed_date() {
        let days = organize_days(
            vec![
                session("A", Some("Tuesday, 05 August 2025")),
                session("B", Some("Monday, 04 August 2025")),
                session("C", Some("Tuesday, 05 August 2025")),
            ],
            2025,
        );

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2025-08-04");
        assert_eq!(days[0].day_of_week.as_deref(), Some("Monday"));
        assert_eq!(codes(&days[0]), ["B"]);
        assert_eq!(days[1].date, "2025-08-05");
        assert_eq!(codes(&days[1]), ["A", "C"]);
    }

    #[test]
    fn test_raw_key_sorts_after_iso_dates() {
        let days = organize_days(
            vec![
                session("T", Some("TBD")),
                session("M", Some("Monday, 04 August 2025")),
            ],
            2025,
        );

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2025-08-04");
        assert_eq!(days[1].date, "TBD");
        assert_eq!(days[1].day_of_week, None);
        assert_eq!(codes(&days[1]), ["T"]);
    }

    #[test]
    fn test_sessions_without_date_dropped() {
        let days = organize_days(
            vec![
                session("X", None),
                session("Y", Some("")),
                session("Z", Some("Friday, 08 August 2025")),
            ],
            2025,
        );

        assert_eq!(days.len(), 1);
        assert_eq!(codes(&days[0]), ["Z"]);
    }

    #[test]
    fn test_forced_year_merges_buckets() {
        let days = organize_days(
            vec![
                session("A", Some("Monday, 04 August 2025")),
                session("B", Some("Monday, 04 August 2024")),
                session("C", Some("Monday, 04 August")),
            ],
            2025,
        );

        assert_eq!(days.len(), 1);
        assert_eq!(codes(&days[0]), ["A", "B", "C"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(organize_days(Vec::new(), 2025).is_empty());
    }
}
