//! Common test utilities and fixtures
//!
//! Shared builders used across all test modules.
// Common test utilities - all must be public

use yomu::types::{Chapter, ChapterNavigation, Series};

#[allow(dead_code)]
pub const TEST_BASE_URL: &str = "http://localhost:5000";

/// Builds a series fixture with `count` chapters named `chapter-001`
/// onward.
#[allow(dead_code)]
pub fn sample_series(name: &str, count: usize) -> Series {
    Series {
        name: name.to_string(),
        display_name: None,
        cover: Some(format!("{}/cover.jpg", name)),
        description: Some("A test series.".to_string()),
        author: Some("Test Author".to_string()),
        status: Some("ongoing".to_string()),
        genres: vec!["Action".to_string()],
        alternate_titles: vec![],
        chapter_count: count,
        chapters: (1..=count).map(|i| format!("chapter-{:03}", i)).collect(),
    }
}

/// Builds a chapter fixture with server-style pairing: the first page
/// stands alone, the rest group in twos with the right page first.
#[allow(dead_code)]
pub fn sample_chapter(
    series: &str,
    id: &str,
    pages: usize,
    prev: Option<&str>,
    next: Option<&str>,
) -> Chapter {
    let page_ids: Vec<String> = (1..=pages)
        .map(|i| format!("{}/{}/{:03}.png", series, id, i))
        .collect();

    let mut page_pairs: Vec<Vec<String>> = Vec::new();
    let mut rest = page_ids.as_slice();
    if let [cover, tail @ ..] = rest {
        page_pairs.push(vec![cover.clone()]);
        rest = tail;
    }
    for pair in rest.chunks(2) {
        match pair {
            [left, right] => page_pairs.push(vec![right.clone(), left.clone()]),
            [single] => page_pairs.push(vec![single.clone()]),
            _ => {}
        }
    }

    Chapter {
        series_name: series.to_string(),
        chapter: id.to_string(),
        chapter_display: format!("Chapter {}", id),
        pages: page_ids,
        page_count: pages,
        pair_count: page_pairs.len(),
        page_pairs,
        has_offset: false,
        navigation: ChapterNavigation {
            prev_chapter: prev.map(|p| format!("chapter-{:0>3}", p)),
            prev_chapter_num: prev.map(str::to_string),
            prev_chapter_display: prev.map(|p| format!("Chapter {}", p)),
            next_chapter: next.map(|n| format!("chapter-{:0>3}", n)),
            next_chapter_num: next.map(str::to_string),
            next_chapter_display: next.map(|n| format!("Chapter {}", n)),
            total_chapters: None,
            current_index: None,
        },
    }
}
