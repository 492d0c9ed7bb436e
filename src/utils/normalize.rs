//! Text normalization for the compact output and for program search.
//!
//! Two different foldings live here:
//! - [`ascii_fold`] drops every character outside 7-bit ASCII. It does not
//!   transliterate, so `"Zürich"` becomes `"Zrich"`. This is what the
//!   compaction pass applies to every string leaf.
//! - [`normalize_text`] is the lenient form used for matching search queries:
//!   accents are decomposed and stripped, case and whitespace are folded.

use unicode_normalization::UnicodeNormalization;

/// Drop every non-ASCII character.
///
/// # Examples
///
/// ```
/// use confprogram::utils::ascii_fold;
///
/// assert_eq!(ascii_fold("Zürich"), "Zrich");
/// assert_eq!(ascii_fold("plain text"), "plain text");
/// ```
pub fn ascii_fold(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Normalize free text for case- and accent-insensitive matching.
///
/// # Examples
///
/// ```
/// use confprogram::utils::normalize_text;
///
/// assert_eq!(normalize_text("  Université   de Montréal "), "universite de montreal");
/// assert_eq!(normalize_text("Łódź"), "lodz");
/// ```
pub fn normalize_text(text: &str) -> String {
    replace_special_chars(text)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Letters that are distinct code points rather than accented forms, so NFD
/// leaves them alone.
fn replace_special_chars(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Ł' => 'L',
            'ł' => 'l',
            'Ø' => 'O',
            'ø' => 'o',
            'Æ' => 'A',
            'æ' => 'a',
            'ß' => 's',
            'Đ' => 'D',
            'đ' => 'd',
            'İ' => 'I',
            'ı' => 'i',
            _ => c,
        })
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}
