//! Adjacent-chapter preloading.
//!
//! While a chapter is open, the adjacent chapters' data is fetched
//! opportunistically in the background and parked here: at most one
//! pending chapter per direction, each entry a full snapshot with a
//! timestamp. Entries are consumed exactly once, validated by chapter id
//! at both store and take time, so a stale response arriving after
//! renavigation is never served — it simply never matches and ages out
//! when the slot is overwritten or cleared.
//!
//! Preloading failures are logged by callers and leave the slot empty;
//! they never block primary rendering.

use std::time::Instant;

use futures::future::join_all;
use log::debug;

use crate::{api::ApiClient, types::Chapter};

/// How many boundary page images to warm per adjacent chapter.
pub const WARM_IMAGE_COUNT: usize = 3;

/// In single mode, prefetch only once within this many pages of the
/// relevant chapter boundary.
pub const NEAR_BOUNDARY_PAGES: usize = 3;

/// Which neighbor of the current chapter is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Prev, Direction::Next];
}

/// One parked chapter snapshot.
#[derive(Debug, Clone)]
struct PreloadEntry {
    chapter: Chapter,
    fetched_at: Instant,
}

/// Two-slot, single-use cache for preloaded adjacent chapters.
///
/// Invariant: a slot is either empty or holds exactly one fully fetched
/// chapter whose id matched the expected adjacent chapter when it was
/// stored.
#[derive(Debug, Default)]
pub struct PreloadCache {
    prev: Option<PreloadEntry>,
    next: Option<PreloadEntry>,
}

impl PreloadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a fetched chapter in the slot for `direction`, overwriting
    /// any previous entry.
    ///
    /// Callers validate the chapter id against the current navigation
    /// info before storing; this type only files what it is given.
    pub fn store(&mut self, direction: Direction, chapter: Chapter) {
        debug!(
            "preloaded chapter {} ({:?} slot)",
            chapter.chapter, direction
        );
        let entry = PreloadEntry {
            chapter,
            fetched_at: Instant::now(),
        };
        *self.slot_mut(direction) = Some(entry);
    }

    /// Whether the slot for `direction` holds a chapter with the given
    /// id.
    pub fn holds(&self, direction: Direction, chapter_id: &str) -> bool {
        self.slot(direction)
            .as_ref()
            .is_some_and(|entry| entry.chapter.chapter == chapter_id)
    }

    /// Consumes the cached chapter with the given id, from whichever
    /// slot holds it.
    ///
    /// Single use: the slot is emptied on a hit, so a second take with
    /// the same id returns `None`. Non-matching entries are left alone.
    pub fn take(&mut self, chapter_id: &str) -> Option<Chapter> {
        for direction in Direction::BOTH {
            if self.holds(direction, chapter_id) {
                let entry = self.slot_mut(direction).take();
                return entry.map(|e| {
                    debug!(
                        "using preloaded chapter {} (fetched {:?} ago)",
                        e.chapter.chapter,
                        e.fetched_at.elapsed()
                    );
                    e.chapter
                });
            }
        }
        None
    }

    /// Empties both slots (chapter navigation, view teardown).
    pub fn clear(&mut self) {
        self.prev = None;
        self.next = None;
    }

    /// Drops any entry that no longer matches the expected adjacent
    /// chapter ids, keeping the cache invariant after a chapter swap.
    pub fn retain_matching(&mut self, prev_id: Option<&str>, next_id: Option<&str>) {
        if !matches_expected(self.prev.as_ref(), prev_id) {
            self.prev = None;
        }
        if !matches_expected(self.next.as_ref(), next_id) {
            self.next = None;
        }
    }

    fn slot(&self, direction: Direction) -> &Option<PreloadEntry> {
        match direction {
            Direction::Prev => &self.prev,
            Direction::Next => &self.next,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<PreloadEntry> {
        match direction {
            Direction::Prev => &mut self.prev,
            Direction::Next => &mut self.next,
        }
    }
}

fn matches_expected(entry: Option<&PreloadEntry>, expected_id: Option<&str>) -> bool {
    match (entry, expected_id) {
        (None, _) => true,
        (Some(entry), Some(id)) => entry.chapter.chapter == id,
        (Some(_), None) => false,
    }
}

/// Warms the browser-cache analogue for a preloaded chapter: fetches its
/// first (for [`Direction::Next`]) or last (for [`Direction::Prev`])
/// [`WARM_IMAGE_COUNT`] page images and drops the bytes.
///
/// Failures are logged and ignored; warming is pure opportunism.
pub async fn warm_page_images(client: &ApiClient, chapter: &Chapter, direction: Direction) {
    let ids: Vec<&String> = match direction {
        Direction::Next => chapter.pages.iter().take(WARM_IMAGE_COUNT).collect(),
        Direction::Prev => {
            let skip = chapter.pages.len().saturating_sub(WARM_IMAGE_COUNT);
            chapter.pages.iter().skip(skip).collect()
        }
    };

    let fetches = ids.iter().map(|id| client.page_image(id));
    for (id, result) in ids.iter().zip(join_all(fetches).await) {
        if let Err(e) = result {
            debug!("image warm failed for {}: {}", id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chapter, ChapterNavigation};

    fn chapter(id: &str) -> Chapter {
        Chapter {
            series_name: "test".to_string(),
            chapter: id.to_string(),
            chapter_display: format!("Chapter {}", id),
            pages: vec!["a".to_string(), "b".to_string()],
            page_pairs: vec![vec!["a".to_string()], vec!["b".to_string()]],
            page_count: 2,
            pair_count: 2,
            has_offset: false,
            navigation: ChapterNavigation::default(),
        }
    }

    #[test]
    fn test_take_is_single_use() {
        let mut cache = PreloadCache::new();
        cache.store(Direction::Next, chapter("chapter-2"));

        assert!(cache.take("chapter-2").is_some());
        assert!(cache.take("chapter-2").is_none());
    }

    #[test]
    fn test_take_validates_id() {
        let mut cache = PreloadCache::new();
        cache.store(Direction::Next, chapter("chapter-2"));

        assert!(cache.take("chapter-3").is_none());
        // The non-matching entry stays parked.
        assert!(cache.holds(Direction::Next, "chapter-2"));
    }

    #[test]
    fn test_one_entry_per_direction() {
        let mut cache = PreloadCache::new();
        cache.store(Direction::Next, chapter("chapter-2"));
        cache.store(Direction::Next, chapter("chapter-3"));

        assert!(!cache.holds(Direction::Next, "chapter-2"));
        assert!(cache.holds(Direction::Next, "chapter-3"));
    }

    #[test]
    fn test_both_directions_independent() {
        let mut cache = PreloadCache::new();
        cache.store(Direction::Prev, chapter("chapter-1"));
        cache.store(Direction::Next, chapter("chapter-3"));

        assert_eq!(cache.take("chapter-1").unwrap().chapter, "chapter-1");
        assert!(cache.holds(Direction::Next, "chapter-3"));
    }

    #[test]
    fn test_retain_matching_drops_stale() {
        let mut cache = PreloadCache::new();
        cache.store(Direction::Prev, chapter("chapter-1"));
        cache.store(Direction::Next, chapter("chapter-3"));

        // After navigating, the expected neighbors changed.
        cache.retain_matching(Some("chapter-2"), Some("chapter-4"));
        assert!(cache.take("chapter-1").is_none());
        assert!(cache.take("chapter-3").is_none());
    }

    #[test]
    fn test_retain_matching_keeps_valid() {
        let mut cache = PreloadCache::new();
        cache.store(Direction::Next, chapter("chapter-3"));
        cache.retain_matching(None, Some("chapter-3"));
        assert!(cache.holds(Direction::Next, "chapter-3"));
    }

    #[test]
    fn test_clear() {
        let mut cache = PreloadCache::new();
        cache.store(Direction::Next, chapter("chapter-2"));
        cache.clear();
        assert!(cache.take("chapter-2").is_none());
    }
}
