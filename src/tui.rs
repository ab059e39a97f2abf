//! TUI utilities and shared types for the Yomu terminal user interface.
//!
//! This module provides formatting helpers shared between the TUI binary
//! and any other application building a terminal interface on top of
//! Yomu's view-models.
//!
//! # Features
//!
//! This module is only available when the `tui` feature is enabled.
//!
//! # Examples
//!
//! ```rust,no_run
//! use yomu::tui::page_indicator;
//!
//! let line = page_indicator(3, 42);
//! ```

#[cfg(feature = "tui")]
use crate::{
    library::SeriesCard,
    series::ChapterRow,
    types::{FitMode, ReaderMode, ReadingDirection, Settings},
};
#[cfg(feature = "tui")]
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Formats a library card as a styled list line.
#[cfg(feature = "tui")]
pub fn format_series_card(card: &SeriesCard) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            card.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("({})", card.chapter_label),
            Style::default().fg(Color::Green),
        ),
    ])
}

/// Formats a chapter row, appending the dimmed technical name when the
/// view-model surfaced one.
#[cfg(feature = "tui")]
pub fn format_chapter_row(row: &ChapterRow) -> Line<'static> {
    let mut spans = vec![Span::styled(
        row.label.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(technical) = &row.technical {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            technical.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

/// Formats the active settings as a one-line summary for the status bar.
#[cfg(feature = "tui")]
pub fn format_settings_summary(settings: &Settings) -> Line<'static> {
    let mode = match settings.reader_mode {
        ReaderMode::Scroll => "scroll",
        ReaderMode::Single => "single",
        ReaderMode::Dual => "dual",
    };
    let fit = match settings.fit_mode {
        FitMode::Width => "fit width",
        FitMode::Height => "fit height",
        FitMode::Original => "original size",
    };

    let mut spans = vec![
        Span::styled(mode.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled(fit.to_string(), Style::default().fg(Color::White)),
    ];

    // The direction only matters in single mode; dual is always RTL.
    if settings.reader_mode == ReaderMode::Single {
        let direction = match settings.reading_direction {
            ReadingDirection::Ltr => "LTR",
            ReadingDirection::Rtl => "RTL",
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            direction.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    Line::from(spans)
}

/// The "Page N / M" reader indicator.
#[cfg(feature = "tui")]
pub fn page_indicator(current: usize, total: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            "Page ",
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{}", current),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" / {}", total),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Formats a description with word wrapping for TUI display.
#[cfg(feature = "tui")]
pub fn format_description(description: &Option<String>, width: usize) -> Vec<Line<'static>> {
    match description {
        Some(desc) => {
            // Simple word wrapping
            let words: Vec<&str> = desc.split_whitespace().collect();
            let mut lines = Vec::new();
            let mut current_line = String::new();

            for word in words {
                if current_line.len() + word.len() + 1 > width {
                    if !current_line.is_empty() {
                        lines.push(Line::from(current_line.clone()));
                        current_line.clear();
                    }
                }
                if !current_line.is_empty() {
                    current_line.push(' ');
                }
                current_line.push_str(word);
            }

            if !current_line.is_empty() {
                lines.push(Line::from(current_line));
            }

            lines
        }
        None => vec![Line::from(Span::styled(
            "No description available",
            Style::default().fg(Color::DarkGray),
        ))],
    }
}

/// Creates a styled status message for TUI display.
#[cfg(feature = "tui")]
pub fn create_status_message(prefix: &str, message: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}:", prefix),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(message.to_string(), Style::default().fg(color)),
    ])
}

/// Creates an error message for TUI display.
#[cfg(feature = "tui")]
pub fn error_message(message: &str) -> Line<'static> {
    create_status_message("Error", message, Color::Red)
}

/// Creates an info message for TUI display.
#[cfg(feature = "tui")]
pub fn info_message(message: &str) -> Line<'static> {
    create_status_message("Info", message, Color::Blue)
}

/// Creates a loading message for TUI display.
#[cfg(feature = "tui")]
pub fn loading_message(message: &str) -> Line<'static> {
    create_status_message("Loading", message, Color::Yellow)
}

/// Parses a `#rrggbb` hex color into a terminal color, falling back to
/// black for anything malformed.
#[cfg(feature = "tui")]
pub fn parse_background_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    // The length check only implies slice boundaries for pure ASCII.
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Black;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::Black,
    }
}

/// Truncates text to fit within a specified width.
///
/// # Examples
///
/// ```rust,no_run
/// use yomu::tui::truncate_text;
///
/// let truncated = truncate_text("This is a very long text", 10);
/// assert_eq!(truncated, "This is...");
/// ```
#[cfg(feature = "tui")]
pub fn truncate_text(text: &str, width: usize) -> String {
    // Counted in chars, not bytes: page ids and titles can carry
    // multi-byte characters.
    if text.chars().count() <= width {
        text.to_string()
    } else if width > 3 {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.chars().take(width).collect()
    }
}

#[cfg(test)]
#[cfg(feature = "tui")]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hello World", 5), "He...");
        assert_eq!(truncate_text("Hi", 10), "Hi");
        assert_eq!(truncate_text("Test", 3), "Tes");
    }

    #[test]
    fn test_truncate_text_multibyte() {
        // Page ids can be Japanese storage paths; truncation must land
        // on character boundaries.
        assert_eq!(truncate_text("チャプター001/ページ.png", 10), "チャプター00...");
        assert_eq!(truncate_text("チャプター", 10), "チャプター");
        assert_eq!(truncate_text("チャプター001", 2), "チャ");
    }

    #[test]
    fn test_parse_background_color() {
        assert_eq!(parse_background_color("#0a0a0a"), Color::Rgb(10, 10, 10));
        assert_eq!(parse_background_color("ffffff"), Color::Rgb(255, 255, 255));
        assert_eq!(parse_background_color("#nope"), Color::Black);
        assert_eq!(parse_background_color(""), Color::Black);
        // Six bytes but not six ASCII hex digits.
        assert_eq!(parse_background_color("aaaéa"), Color::Black);
        assert_eq!(parse_background_color("#ééé"), Color::Black);
    }

    #[test]
    fn test_settings_summary_hides_direction_outside_single() {
        let mut settings = Settings::default();
        settings.reader_mode = ReaderMode::Dual;
        let line = format_settings_summary(&settings);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(!text.contains("LTR"));

        settings.reader_mode = ReaderMode::Single;
        let line = format_settings_summary(&settings);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("LTR"));
    }

    #[test]
    fn test_description_wrapping() {
        let desc = Some("one two three four five six seven".to_string());
        let lines = format_description(&desc, 12);
        assert!(lines.len() > 1);

        let none = format_description(&None, 12);
        assert_eq!(none.len(), 1);
    }
}
