mod common;

use common::{TEST_BASE_URL, sample_chapter, sample_series};
use yomu::prelude::*;
use yomu::reader::pairs::{pair_for_page, pair_start_page};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_wire_decoding() {
        // Shape as served by the chapter endpoint.
        let json = r#"{
            "series_name": "one-piece",
            "chapter": "1",
            "chapter_display": "Chapter 1",
            "pages": ["one-piece/chapter-001/001.png", "one-piece/chapter-001/002.png"],
            "page_pairs": [["one-piece/chapter-001/001.png"], ["one-piece/chapter-001/002.png"]],
            "page_count": 2,
            "pair_count": 2,
            "has_offset": false,
            "navigation": {
                "prev_chapter": null,
                "prev_chapter_num": null,
                "next_chapter": "chapter-002",
                "next_chapter_num": "2",
                "next_chapter_display": "Chapter 2",
                "total_chapters": 100,
                "current_index": 0
            }
        }"#;

        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.series_name, "one-piece");
        assert_eq!(chapter.page_count, 2);
        assert_eq!(chapter.navigation.next_chapter_num.as_deref(), Some("2"));
        assert_eq!(chapter.navigation.prev_chapter_num, None);
        assert_eq!(chapter.navigation.total_chapters, Some(100));
    }

    #[test]
    fn test_series_wire_decoding_tolerates_missing_metadata() {
        // The library endpoint omits detail fields for bare directories.
        let json = r#"{"name": "some-series", "chapter_count": 4}"#;
        let series: Series = serde_json::from_str(json).unwrap();

        assert_eq!(series.name, "some-series");
        assert_eq!(series.chapter_count, 4);
        assert!(series.display_name.is_none());
        assert!(series.chapters.is_empty());
        assert!(series.genres.is_empty());
    }

    #[test]
    fn test_settings_wire_round_trip() {
        // The hex color needs a double-hash delimiter: `"#` would end a
        // single-hash raw string.
        let json = r##"{
            "reader_mode": "dual",
            "reading_direction": "rtl",
            "fit_mode": "height",
            "single_page_click_navigation": false,
            "background_color": "#112233"
        }"##;

        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.reader_mode, ReaderMode::Dual);
        assert_eq!(settings.reading_direction, ReadingDirection::Rtl);
        assert_eq!(settings.fit_mode, FitMode::Height);
        assert!(!settings.single_page_click_navigation);

        // Modes serialize lowercase, matching the server's stored keys.
        let out = serde_json::to_value(&settings).unwrap();
        assert_eq!(out["reader_mode"], "dual");
        assert_eq!(out["fit_mode"], "height");
    }

    #[test]
    fn test_settings_decoding_fills_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.reader_mode, ReaderMode::Scroll);
        assert_eq!(settings.reading_direction, ReadingDirection::Ltr);
        assert_eq!(settings.fit_mode, FitMode::Width);
        assert!(settings.single_page_click_navigation);
        assert_eq!(settings.background_color, "#0a0a0a");
    }

    #[test]
    fn test_library_search_by_alternate_title() {
        let mut series = sample_series("kimetsu-no-yaiba", 10);
        series.alternate_titles = vec!["Demon Slayer".to_string()];
        let library = LibraryView::from_series(vec![series, sample_series("one-piece", 3)]);

        let hits = library.search("demon");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "kimetsu-no-yaiba");

        // Empty query returns everything.
        assert_eq!(library.search("  ").len(), 2);
    }

    #[test]
    fn test_series_cards_format_names() {
        let library = LibraryView::from_series(vec![sample_series("one-piece", 1)]);
        let cards = LibraryView::cards(library.series());

        assert_eq!(cards[0].title, "One Piece");
        assert_eq!(cards[0].chapter_label, "1 chapter");
    }

    #[test]
    fn test_chapter_sort_preserves_canonical_order() {
        let mut view = SeriesView::from_series(sample_series("one-piece", 5));
        view.toggle_sort();
        assert_eq!(view.chapter_rows()[0].label, "Chapter 5");
        // The underlying list is untouched.
        assert_eq!(view.series().chapters[0], "chapter-001");
    }

    #[test]
    fn test_pair_numbering_inverts() {
        let chapter = sample_chapter("one-piece", "3", 7, Some("2"), Some("4"));
        let pairs = &chapter.page_pairs;

        // Page numbers sum over pair lengths.
        let total: usize = pairs.iter().map(Vec::len).sum();
        assert_eq!(total, chapter.page_count);

        for index in 0..pairs.len() {
            let page = pair_start_page(pairs, index);
            assert_eq!(pair_for_page(pairs, page), Some(index));
        }
    }

    #[test]
    fn test_spread_orientation() {
        let chapter = sample_chapter("one-piece", "3", 5, None, None);

        assert!(matches!(
            Spread::from_pair(&chapter.page_pairs[0]),
            Some(Spread::Centered(_))
        ));
        match Spread::from_pair(&chapter.page_pairs[1]) {
            Some(Spread::Facing { right, left }) => {
                // The earlier page sits on the right.
                assert!(right.ends_with("003.png"));
                assert!(left.ends_with("002.png"));
            }
            other => panic!("expected facing spread, got {:?}", other),
        }
    }

    #[test]
    fn test_api_client_url_shapes() {
        let client = ApiClient::new(format!("{}/", TEST_BASE_URL));
        // Trailing slash is normalized away.
        assert_eq!(client.base_url(), TEST_BASE_URL);
        // Image ids keep their path slashes.
        assert_eq!(
            client.image_url("one-piece/chapter-001/001.png"),
            format!("{}/api/image/one-piece/chapter-001/001.png", TEST_BASE_URL)
        );
    }
}
