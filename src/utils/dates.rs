//! Date handling for program schedules
//!
//! Session pages print dates as `Monday, 04 August 2025`. The year is not
//! trusted: some pages omit it and some misstate it, so the conference year
//! always wins.

use chrono::{Datelike, NaiveDate, Weekday};

/// Parse `<Weekday>, <Day> <Month> [<Year>]`, forcing the year to `year`.
///
/// The weekday must be a real weekday name but is not checked against the
/// date; the weekday reported downstream is recomputed from the result.
///
/// # Examples
/// ```
/// use confprogram::utils::parse_program_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_program_date("Monday, 04 August 2025", 2025),
///     NaiveDate::from_ymd_opt(2025, 8, 4)
/// );
/// assert_eq!(parse_program_date("TBD", 2025), None);
/// ```
pub fn parse_program_date(raw: &str, year: i32) -> Option<NaiveDate> {
    let (weekday, rest) = raw.split_once(',')?;
    weekday.trim().parse::<Weekday>().ok()?;

    let rest = rest.trim();
    let date = NaiveDate::parse_from_str(rest, "%d %B %Y")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{} {}", rest, year), "%d %B %Y"))
        .ok()?;

    // Feb 29 of a leap year has no counterpart in a non-leap conference year
    date.with_year(year)
}

/// Day bucket key for a raw schedule date: ISO date plus weekday name, or the
/// raw text with no weekday when it does not parse.
///
/// # Examples
/// ```
/// use confprogram::utils::day_key;
///
/// assert_eq!(day_key("Tuesday, 05 August 2025", 2025), ("2025-08-05".to_string(), Some("Tuesday".to_string())));
/// assert_eq!(day_key("TBD", 2025), ("TBD".to_string(), None));
/// ```
pub fn day_key(raw: &str, year: i32) -> (String, Option<String>) {
    match parse_program_date(raw, year) {
        Some(date) => (
            date.format("%Y-%m-%d").to_string(),
            Some(date.format("%A").to_string()),
        ),
        None => (raw.to_string(), None),
    }
}
