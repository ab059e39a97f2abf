//! Series detail view: metadata plus the sortable chapter list.
//!
//! The server returns chapters in ascending reading order; the descending
//! toggle is a pure reversal over a defensive copy, so the canonical
//! server-ordered list is never mutated.

use crate::{
    api::ApiClient,
    error::Result,
    format::{capitalize_first, extract_chapter_number, format_chapter_name, format_series_name,
        format_technical_name},
    types::Series,
};

/// One row in the chapter list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterRow {
    /// Raw chapter name (storage key)
    pub name: String,
    /// Prettified label ("Chapter 12")
    pub label: String,
    /// Raw folder name shown under the label, only when it adds information
    pub technical: Option<String>,
    /// Normalized chapter number for the reader route
    pub number: String,
}

/// Series metadata prepared for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesHeader {
    pub title: String,
    pub author: Option<String>,
    /// Status with its first letter capitalized ("Ongoing")
    pub status: Option<String>,
    /// "{n} Chapter(s)" label
    pub total_label: String,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub alternate_titles: Vec<String>,
    pub cover: Option<String>,
}

/// The series view state: one series plus the sort toggle.
#[derive(Debug)]
pub struct SeriesView {
    series: Series,
    sort_ascending: bool,
}

impl SeriesView {
    /// Fetches a series and builds its view.
    pub async fn load(client: &ApiClient, name: &str) -> Result<Self> {
        let series = client.series(name).await?;
        Ok(Self::from_series(series))
    }

    /// Builds a view over an already-fetched series.
    pub fn from_series(series: Series) -> Self {
        Self {
            series,
            sort_ascending: true,
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    /// Flips between ascending (server order) and descending.
    pub fn toggle_sort(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Chapter names in the current sort order.
    ///
    /// Descending order is a pure reversal of a copy; the server-ordered
    /// list held by the view is untouched.
    pub fn sorted_chapters(&self) -> Vec<String> {
        let mut chapters = self.series.chapters.clone();
        if !self.sort_ascending {
            chapters.reverse();
        }
        chapters
    }

    /// Rows for the chapter list, in the current sort order.
    pub fn chapter_rows(&self) -> Vec<ChapterRow> {
        self.sorted_chapters()
            .into_iter()
            .map(|name| chapter_row(&name))
            .collect()
    }

    /// The rendered metadata header.
    pub fn header(&self) -> SeriesHeader {
        let series = &self.series;
        let plural = if series.chapter_count == 1 { "" } else { "s" };
        SeriesHeader {
            title: series
                .display_name
                .clone()
                .unwrap_or_else(|| format_series_name(&series.name)),
            author: series.author.clone(),
            status: series.status.as_deref().map(capitalize_first),
            total_label: format!("{} Chapter{}", series.chapter_count, plural),
            description: series.description.clone(),
            genres: series.genres.clone(),
            alternate_titles: series.alternate_titles.clone(),
            cover: series.cover.clone(),
        }
    }
}

fn chapter_row(name: &str) -> ChapterRow {
    let label = format_chapter_name(name);
    let technical = format_technical_name(name);

    // The raw name is only worth a second line when it differs from the
    // label and is not itself a "chapter ..." string.
    let technical = if technical.to_lowercase() != label.to_lowercase()
        && !technical.to_lowercase().contains("chapter")
    {
        Some(technical)
    } else {
        None
    };

    ChapterRow {
        name: name.to_string(),
        label,
        technical,
        number: extract_chapter_number(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series {
        Series {
            name: "one-piece".to_string(),
            display_name: None,
            cover: None,
            description: Some("Pirates.".to_string()),
            author: Some("Oda".to_string()),
            status: Some("ongoing".to_string()),
            genres: vec!["Action".to_string()],
            alternate_titles: vec![],
            chapter_count: 3,
            chapters: vec![
                "chapter-001".to_string(),
                "chapter-002".to_string(),
                "chapter-002.5".to_string(),
            ],
        }
    }

    #[test]
    fn test_descending_is_pure_reversal() {
        let mut view = SeriesView::from_series(sample());
        let ascending = view.sorted_chapters();
        view.toggle_sort();
        let descending = view.sorted_chapters();

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
        // Canonical server order survives both renders.
        assert_eq!(view.series().chapters, sample().chapters);
    }

    #[test]
    fn test_toggle_round_trips() {
        let mut view = SeriesView::from_series(sample());
        let before = view.sorted_chapters();
        view.toggle_sort();
        view.toggle_sort();
        assert_eq!(view.sorted_chapters(), before);
    }

    #[test]
    fn test_chapter_rows() {
        let view = SeriesView::from_series(sample());
        let rows = view.chapter_rows();
        assert_eq!(rows[0].label, "Chapter 1");
        assert_eq!(rows[0].number, "1");
        // "chapter 001" contains "chapter", so no technical line.
        assert_eq!(rows[0].technical, None);
        assert_eq!(rows[2].number, "2.5");
    }

    #[test]
    fn test_technical_line_for_named_chapters() {
        let row = chapter_row("vol_02_extra_04");
        assert_eq!(row.label, "Chapter 2");
        assert_eq!(row.technical.as_deref(), Some("vol 02 extra 04"));
    }

    #[test]
    fn test_header_capitalizes_status() {
        let view = SeriesView::from_series(sample());
        let header = view.header();
        assert_eq!(header.title, "One Piece");
        assert_eq!(header.status.as_deref(), Some("Ongoing"));
        assert_eq!(header.total_label, "3 Chapters");
    }
}
