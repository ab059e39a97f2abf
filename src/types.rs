//! Core data types for series, chapters, and reader settings.
//!
//! This module defines the wire-level data structures exchanged with the
//! library server:
//!
//! - [`Series`] - A manga series with metadata and its chapter list
//! - [`Chapter`] - A single chapter with pages, pre-paired spreads, and
//!   adjacent-chapter navigation info
//! - [`Settings`] - The shared reader preferences, round-tripped to the
//!   server on every change
//!
//! All structures mirror the server's JSON exactly; decoding failures
//! surface as [`Error::Json`](crate::Error::Json).
//!
//! # Examples
//!
//! ```rust
//! use yomu::types::*;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.reader_mode, ReaderMode::Scroll);
//! assert_eq!(settings.reading_direction, ReadingDirection::Ltr);
//! ```

use serde::{Deserialize, Serialize};

/// A manga series with its metadata.
///
/// The library endpoint returns these without per-chapter detail; the
/// series endpoint additionally fills `chapters` with the server-ordered
/// (ascending) chapter name list. Series data is loaded once per view and
/// never mutated client-side.
///
/// `name` is the storage key used in API routes; `display_name` is the
/// server's prettified title when metadata exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    /// Storage key, unique within the library
    pub name: String,

    /// Server-formatted display title, when metadata is present
    #[serde(default)]
    pub display_name: Option<String>,

    /// Cover image id, servable via the image endpoint
    #[serde(default)]
    pub cover: Option<String>,

    /// Plot summary
    #[serde(default)]
    pub description: Option<String>,

    /// Author name from metadata
    #[serde(default)]
    pub author: Option<String>,

    /// Publication status ("ongoing", "completed", ...)
    #[serde(default)]
    pub status: Option<String>,

    /// Genre tags, in server order
    #[serde(default)]
    pub genres: Vec<String>,

    /// Alternate titles, searched by the library filter
    #[serde(default)]
    pub alternate_titles: Vec<String>,

    /// Number of chapters with readable pages
    pub chapter_count: usize,

    /// Chapter names in ascending server order (series endpoint only)
    #[serde(default)]
    pub chapters: Vec<String>,
}

/// A single chapter with its pages and navigation context.
///
/// Replaced wholesale whenever the reader navigates; no field is ever
/// partially mutated. `pages` holds ordered image ids, and `page_pairs`
/// holds the server-precomputed dual-mode groups: each group is one or two
/// image ids, with two-element groups pre-ordered right-page-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// Series storage key this chapter belongs to
    pub series_name: String,

    /// Chapter id (directory name on the server)
    pub chapter: String,

    /// Prettified chapter label ("Chapter 12")
    pub chapter_display: String,

    /// Ordered page image ids
    #[serde(default)]
    pub pages: Vec<String>,

    /// Dual-mode spread groups, each of one or two image ids
    #[serde(default)]
    pub page_pairs: Vec<Vec<String>>,

    /// Total page count; always equals the sum of pair lengths
    pub page_count: usize,

    /// Number of spread groups
    #[serde(default)]
    pub pair_count: usize,

    /// Whether dual-mode pairing currently offsets the first page
    #[serde(default)]
    pub has_offset: bool,

    /// Adjacent-chapter navigation info
    #[serde(default)]
    pub navigation: ChapterNavigation,
}

/// Previous/next chapter pointers for in-reader navigation.
///
/// All fields are absent at the respective end of the series. The `_num`
/// fields carry the normalized chapter number used in reader routes; the
/// `_display` fields carry prettified labels for navigation buttons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChapterNavigation {
    #[serde(default)]
    pub prev_chapter: Option<String>,
    #[serde(default)]
    pub prev_chapter_num: Option<String>,
    #[serde(default)]
    pub prev_chapter_display: Option<String>,
    #[serde(default)]
    pub next_chapter: Option<String>,
    #[serde(default)]
    pub next_chapter_num: Option<String>,
    #[serde(default)]
    pub next_chapter_display: Option<String>,
    #[serde(default)]
    pub total_chapters: Option<usize>,
    #[serde(default)]
    pub current_index: Option<usize>,
}

/// Reader display mode.
///
/// Exactly one mode is active at a time; the mode is switched only through
/// a settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderMode {
    /// All pages stacked vertically
    Scroll,
    /// One page at a time
    Single,
    /// Two-page spreads, always right-to-left
    Dual,
}

/// Page-turn direction for single mode.
///
/// Dual mode ignores this setting entirely; spreads are always
/// right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingDirection {
    Ltr,
    Rtl,
}

/// Page image fit strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    Width,
    Height,
    Original,
}

/// Shared reader preferences.
///
/// A single instance is fetched from the server at startup and posted back
/// wholesale on every change. Unknown server-side keys are preserved only
/// on the server; the client round-trips the keys it knows.
///
/// # Examples
///
/// ```rust
/// use yomu::types::{Settings, ReaderMode};
///
/// let mut settings = Settings::default();
/// settings.reader_mode = ReaderMode::Dual;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_reader_mode")]
    pub reader_mode: ReaderMode,

    #[serde(default = "default_reading_direction")]
    pub reading_direction: ReadingDirection,

    #[serde(default = "default_fit_mode")]
    pub fit_mode: FitMode,

    /// Whether clicking the single-mode page surface turns pages
    #[serde(default = "default_true")]
    pub single_page_click_navigation: bool,

    /// Reader background color, as a CSS hex string
    #[serde(default = "default_background")]
    pub background_color: String,
}

fn default_reader_mode() -> ReaderMode {
    ReaderMode::Scroll
}

fn default_reading_direction() -> ReadingDirection {
    ReadingDirection::Ltr
}

fn default_fit_mode() -> FitMode {
    FitMode::Width
}

fn default_true() -> bool {
    true
}

fn default_background() -> String {
    "#0a0a0a".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            reader_mode: default_reader_mode(),
            reading_direction: default_reading_direction(),
            fit_mode: default_fit_mode(),
            single_page_click_navigation: default_true(),
            background_color: default_background(),
        }
    }
}

impl Chapter {
    /// Returns the adjacent chapter number in the given direction, if the
    /// server reported one.
    pub fn adjacent_chapter(&self, dir: crate::reader::Direction) -> Option<&str> {
        match dir {
            crate::reader::Direction::Prev => self.navigation.prev_chapter_num.as_deref(),
            crate::reader::Direction::Next => self.navigation.next_chapter_num.as_deref(),
        }
    }
}
