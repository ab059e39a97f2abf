//! Library view: the series grid and its client-side search.
//!
//! The library list is fetched once per view and held immutably; search is
//! a pure, case-insensitive substring filter over the formatted name, the
//! raw storage key, and every alternate title. Matches are a union with no
//! ranking. Rendering is left to the front end; this module only produces
//! view-models.

use crate::{
    api::ApiClient,
    error::Result,
    format::format_series_name,
    types::Series,
};

/// One rendered card in the library grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesCard {
    /// Storage key, used for navigation
    pub name: String,
    /// Formatted display title
    pub title: String,
    /// "{n} chapter(s)" label
    pub chapter_label: String,
    /// Cover image id, when the series has one
    pub cover: Option<String>,
    pub description: Option<String>,
}

/// The library view state: the full series list plus search.
#[derive(Debug, Default)]
pub struct LibraryView {
    all: Vec<Series>,
}

impl LibraryView {
    /// Creates an empty library view.
    pub fn new() -> Self {
        Self { all: Vec::new() }
    }

    /// Creates a view over an already-fetched series list.
    pub fn from_series(all: Vec<Series>) -> Self {
        Self { all }
    }

    /// Fetches the library from the server, replacing any previous list.
    pub async fn load(&mut self, client: &ApiClient) -> Result<()> {
        self.all = client.library().await?;
        Ok(())
    }

    /// All series, in server order.
    pub fn series(&self) -> &[Series] {
        &self.all
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Filters the library by a case-insensitive substring query.
    ///
    /// A series matches when the query appears in its formatted name, its
    /// raw storage key, or any alternate title. An empty or whitespace-only
    /// query returns every series. Never mutates the canonical list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yomu::library::LibraryView;
    ///
    /// let view = LibraryView::new();
    /// assert!(view.search("anything").is_empty());
    /// ```
    pub fn search(&self, query: &str) -> Vec<&Series> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.all.iter().collect();
        }

        self.all
            .iter()
            .filter(|series| series_matches(series, &query))
            .collect()
    }

    /// View-model cards for a slice of series (the full list or a search
    /// result).
    pub fn cards<'a>(series: impl IntoIterator<Item = &'a Series>) -> Vec<SeriesCard> {
        series.into_iter().map(card_for).collect()
    }
}

/// `query` must already be lowercased and trimmed.
fn series_matches(series: &Series, query: &str) -> bool {
    if format_series_name(&series.name).to_lowercase().contains(query) {
        return true;
    }
    if series.name.to_lowercase().contains(query) {
        return true;
    }
    series
        .alternate_titles
        .iter()
        .any(|title| title.to_lowercase().contains(query))
}

fn card_for(series: &Series) -> SeriesCard {
    let plural = if series.chapter_count == 1 { "" } else { "s" };
    SeriesCard {
        name: series.name.clone(),
        title: series
            .display_name
            .clone()
            .unwrap_or_else(|| format_series_name(&series.name)),
        chapter_label: format!("{} chapter{}", series.chapter_count, plural),
        cover: series.cover.clone(),
        description: series.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, alternates: &[&str]) -> Series {
        Series {
            name: name.to_string(),
            display_name: None,
            cover: None,
            description: None,
            author: None,
            status: None,
            genres: vec![],
            alternate_titles: alternates.iter().map(|s| s.to_string()).collect(),
            chapter_count: 3,
            chapters: vec![],
        }
    }

    #[test]
    fn test_search_formatted_name() {
        let view = LibraryView::from_series(vec![series("one-piece", &[])]);
        assert_eq!(view.search("One Pie").len(), 1);
    }

    #[test]
    fn test_search_raw_name() {
        let view = LibraryView::from_series(vec![series("one-piece", &[])]);
        assert_eq!(view.search("e-pie").len(), 1);
    }

    #[test]
    fn test_search_alternate_title_only() {
        let view = LibraryView::from_series(vec![series("shingeki", &["Attack on Titan"])]);
        assert_eq!(view.search("attack on").len(), 1);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let view = LibraryView::from_series(vec![
            series("one-piece", &[]),
            series("naruto", &["NARUTO"]),
        ]);
        assert!(view.search("berserk").is_empty());
    }

    #[test]
    fn test_blank_query_returns_everything() {
        let view = LibraryView::from_series(vec![series("a", &[]), series("b", &[])]);
        assert_eq!(view.search("   ").len(), 2);
    }

    #[test]
    fn test_card_labels() {
        let mut one = series("one-piece", &[]);
        one.chapter_count = 1;
        let cards = LibraryView::cards([&one]);
        assert_eq!(cards[0].title, "One Piece");
        assert_eq!(cards[0].chapter_label, "1 chapter");
    }
}
