//! Pure string formatting for series and chapter names.
//!
//! The library server stores series and chapters under filesystem-style
//! names (`one-piece`, `chapter-007.5`). These helpers turn those storage
//! keys into display text and normalized chapter numbers for reader
//! routes. All functions are pure and allocation-only; they never touch
//! the network.

use once_cell::sync::Lazy;
use regex::Regex;

/// First numeric token in a chapter name, optionally decimal.
static CHAPTER_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("chapter number pattern is valid"));

/// Extracts the normalized chapter number from a chapter name.
///
/// Finds the first numeric token (optionally decimal), strips leading
/// zeros from the integer part, and keeps the decimal part verbatim.
/// Returns `"1"` when the name contains no digits. Idempotent on already
/// normalized input.
///
/// # Examples
///
/// ```rust
/// use yomu::format::extract_chapter_number;
///
/// assert_eq!(extract_chapter_number("Chapter-007.5"), "7.5");
/// assert_eq!(extract_chapter_number("chapter-012"), "12");
/// assert_eq!(extract_chapter_number("bonus"), "1");
/// assert_eq!(extract_chapter_number("7.5"), "7.5");
/// ```
pub fn extract_chapter_number(name: &str) -> String {
    let Some(m) = CHAPTER_NUMBER.find(name) else {
        return "1".to_string();
    };

    normalize_number(m.as_str())
}

/// Strips leading zeros from the integer part, keeping any decimal part
/// verbatim (so "007.50" stays "7.50", not "7.5").
fn normalize_number(num: &str) -> String {
    match num.split_once('.') {
        Some((whole, decimal)) => format!("{}.{}", strip_leading_zeros(whole), decimal),
        None => strip_leading_zeros(num),
    }
}

fn strip_leading_zeros(digits: &str) -> String {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Formats a chapter name for display.
///
/// Produces `"Chapter {n}"` when the name contains a numeric token,
/// otherwise falls back to title-casing the whole name with `-`/`_`
/// replaced by spaces.
///
/// # Examples
///
/// ```rust
/// use yomu::format::format_chapter_name;
///
/// assert_eq!(format_chapter_name("ch_01"), "Chapter 1");
/// assert_eq!(format_chapter_name("chapter-007.5"), "Chapter 7.5");
/// assert_eq!(format_chapter_name("special_omake"), "Special Omake");
/// ```
pub fn format_chapter_name(name: &str) -> String {
    if let Some(m) = CHAPTER_NUMBER.find(name) {
        format!("Chapter {}", normalize_number(m.as_str()))
    } else {
        title_case(&format_technical_name(name))
    }
}

/// Formats a series storage key for display.
///
/// Replaces `-` and `_` with spaces and uppercases the first letter of
/// each word; the rest of the word keeps its stored casing.
///
/// # Examples
///
/// ```rust
/// use yomu::format::format_series_name;
///
/// assert_eq!(format_series_name("one-piece"), "One Piece");
/// assert_eq!(format_series_name("MY_hero"), "MY Hero");
/// ```
pub fn format_series_name(name: &str) -> String {
    title_case(&format_technical_name(name))
}

/// Formats the raw folder name for display: separators become spaces, case
/// is left untouched.
pub fn format_technical_name(name: &str) -> String {
    name.replace(['-', '_'], " ")
}

/// Capitalizes the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Title-cases every word: first letter uppercased, rest untouched.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}
