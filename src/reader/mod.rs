//! The reader engine: session state, input mapping, and preloading.
//!
//! [`ReaderSession`] is the single owner of everything the open-chapter
//! view needs: the current [`Chapter`], the position within it, the
//! settings snapshot, and the adjacent-chapter [`PreloadCache`]. Front
//! ends feed it inputs (already mapped to [`NavIntent`] by the [`input`]
//! module) and render from its accessors; the session itself never
//! draws anything.
//!
//! Submodules hold the pure pieces:
//!
//! - [`input`] - click zones and arrow keys to page-turn intents
//! - [`scroll`] - scroll position to visible page
//! - [`pairs`] - dual-mode spread layout and page numbering
//! - [`preload`] - the two-slot adjacent-chapter cache

pub mod input;
pub mod pairs;
pub mod preload;
pub mod scroll;

pub use input::{ArrowKey, NavIntent, click_intent, key_intent};
pub use pairs::Spread;
pub use preload::{Direction, PreloadCache};
pub use scroll::ScrollTracker;

use log::{debug, warn};

use crate::{
    api::ApiClient,
    error::Result,
    settings::{ReaderLayout, SettingsStore},
    types::{Chapter, ReaderMode, Settings},
};

/// What a page-turn intent resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The position moved within the current chapter.
    PageShown,
    /// The chapter boundary was hit; the caller should navigate.
    ChapterRequest(Direction),
    /// No chapter loaded, or already at the end of the series.
    Ignored,
}

/// State for one open reader view.
///
/// Created per reading session and replaced wholesale on teardown; all
/// chapter data flows through [`set_chapter`](Self::set_chapter), which
/// keeps the position, the scroll tracker, and the preload cache
/// consistent with the chapter actually shown.
pub struct ReaderSession {
    client: ApiClient,
    store: SettingsStore,
    chapter: Option<Chapter>,
    /// 0-indexed page in single mode.
    page_index: usize,
    /// 0-indexed pair in dual mode.
    pair_index: usize,
    cache: PreloadCache,
    tracker: ScrollTracker,
}

impl ReaderSession {
    pub fn new(client: ApiClient) -> Self {
        ReaderSession {
            client,
            store: SettingsStore::new(),
            chapter: None,
            page_index: 0,
            pair_index: 0,
            cache: PreloadCache::new(),
            tracker: ScrollTracker::new(),
        }
    }

    /// A session over already-known settings, skipping the server fetch.
    pub fn with_settings(client: ApiClient, settings: Settings) -> Self {
        let mut session = Self::new(client);
        session.store = SettingsStore::with_settings(settings);
        session
    }

    /// Fetches the shared settings; on failure keeps the defaults.
    pub async fn load_settings(&mut self) {
        self.store.load(&self.client).await;
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    /// Current surface visibility derived from the settings.
    pub fn layout(&self) -> ReaderLayout {
        self.store.apply()
    }

    /// Saves new settings and re-derives the layout.
    ///
    /// A reader-mode change resets the position to the chapter start;
    /// everything else keeps the position as-is. On save failure the
    /// prior settings stay in effect and the error propagates.
    pub async fn save_settings(&mut self, new: Settings) -> Result<ReaderLayout> {
        let mode_changed = new.reader_mode != self.store.settings().reader_mode;
        let layout = self.store.save(&self.client, new).await?;
        if mode_changed {
            self.page_index = 0;
            self.pair_index = 0;
            self.tracker.reset();
        }
        Ok(layout)
    }

    /// Restores the default settings and persists them.
    ///
    /// The position resets like any other reader-mode change when the
    /// current mode differs from the default.
    pub async fn reset_settings(&mut self) -> Result<ReaderLayout> {
        let mode_changed = self.store.settings().reader_mode != Settings::default().reader_mode;
        let layout = self.store.reset(&self.client).await?;
        if mode_changed {
            self.page_index = 0;
            self.pair_index = 0;
            self.tracker.reset();
        }
        Ok(layout)
    }

    pub fn chapter(&self) -> Option<&Chapter> {
        self.chapter.as_ref()
    }

    /// Replaces the open chapter wholesale.
    ///
    /// Resets the position to the chapter start, resets the scroll
    /// tracker, and evicts cached preloads that are no longer adjacent
    /// to the new chapter.
    pub fn set_chapter(&mut self, chapter: Chapter) {
        self.cache.retain_matching(
            chapter.adjacent_chapter(Direction::Prev),
            chapter.adjacent_chapter(Direction::Next),
        );
        self.page_index = 0;
        self.pair_index = 0;
        self.tracker.reset();
        self.chapter = Some(chapter);
    }

    /// Fetches and opens a chapter by series name and chapter number.
    pub async fn open(&mut self, series: &str, num: &str) -> Result<()> {
        let chapter = self.client.chapter(series, num).await?;
        self.set_chapter(chapter);
        Ok(())
    }

    /// Resolves a page-turn intent against the current mode and
    /// position.
    ///
    /// Within the chapter the position moves one page (single) or one
    /// pair (dual); past either edge the outcome asks the caller to
    /// navigate chapters, but only when the server reported an adjacent
    /// chapter in that direction. Scroll mode never pages.
    pub fn handle(&mut self, intent: NavIntent) -> StepOutcome {
        let Some(chapter) = self.chapter.as_ref() else {
            return StepOutcome::Ignored;
        };

        let (index, len) = match self.store.settings().reader_mode {
            ReaderMode::Scroll => return StepOutcome::Ignored,
            ReaderMode::Single => (self.page_index, chapter.pages.len()),
            ReaderMode::Dual => (self.pair_index, chapter.page_pairs.len()),
        };

        let step = match intent {
            NavIntent::NextPage if index + 1 < len => Some(index + 1),
            NavIntent::PrevPage if index > 0 => Some(index - 1),
            _ => None,
        };

        match step {
            Some(new_index) => {
                match self.store.settings().reader_mode {
                    ReaderMode::Single => self.page_index = new_index,
                    _ => self.pair_index = new_index,
                }
                StepOutcome::PageShown
            }
            None => {
                let direction = match intent {
                    NavIntent::NextPage => Direction::Next,
                    NavIntent::PrevPage => Direction::Prev,
                };
                if chapter.adjacent_chapter(direction).is_some() {
                    StepOutcome::ChapterRequest(direction)
                } else {
                    StepOutcome::Ignored
                }
            }
        }
    }

    /// Navigates to the adjacent chapter, serving from the preload
    /// cache when it holds the target, otherwise fetching it.
    ///
    /// Returns `false` without changing anything when there is no
    /// adjacent chapter in that direction.
    pub async fn navigate(&mut self, direction: Direction) -> Result<bool> {
        let Some(target) = self
            .chapter
            .as_ref()
            .and_then(|c| c.adjacent_chapter(direction))
            .map(str::to_string)
        else {
            return Ok(false);
        };

        let chapter = match self.cache.take(&target) {
            Some(cached) => cached,
            None => {
                let series = match self.chapter.as_ref() {
                    Some(c) => c.series_name.clone(),
                    None => return Ok(false),
                };
                self.client.chapter(&series, &target).await?
            }
        };
        self.set_chapter(chapter);
        Ok(true)
    }

    /// Adjacent chapters worth preloading right now.
    ///
    /// Scroll and dual mode want both neighbors as soon as a chapter is
    /// open; single mode defers each direction until the position is
    /// within [`preload::NEAR_BOUNDARY_PAGES`] of that boundary.
    /// Directions whose slot already holds the right chapter are
    /// skipped.
    pub fn wanted_preloads(&self) -> Vec<Direction> {
        let Some(chapter) = self.chapter.as_ref() else {
            return Vec::new();
        };

        Direction::BOTH
            .into_iter()
            .filter(|&direction| {
                let Some(target) = chapter.adjacent_chapter(direction) else {
                    return false;
                };
                if self.cache.holds(direction, target) {
                    return false;
                }
                match self.store.settings().reader_mode {
                    ReaderMode::Scroll | ReaderMode::Dual => true,
                    ReaderMode::Single => match direction {
                        Direction::Prev => self.page_index < preload::NEAR_BOUNDARY_PAGES,
                        Direction::Next => {
                            self.page_index + preload::NEAR_BOUNDARY_PAGES
                                >= chapter.pages.len()
                        }
                    },
                }
            })
            .collect()
    }

    /// Files a background-fetched chapter into the preload cache.
    ///
    /// Returns `false` and drops the chapter when it no longer matches
    /// the expected neighbor (the user navigated while the fetch was in
    /// flight), so callers can skip follow-up work on a stale entry.
    pub fn store_preloaded(&mut self, direction: Direction, chapter: Chapter) -> bool {
        let expected = self
            .chapter
            .as_ref()
            .and_then(|c| c.adjacent_chapter(direction));
        match expected {
            Some(id) if id == chapter.chapter => {
                self.cache.store(direction, chapter);
                true
            }
            _ => {
                debug!(
                    "dropping stale preload {} ({:?} slot)",
                    chapter.chapter, direction
                );
                false
            }
        }
    }

    /// Toggles dual-mode pairing offset for the open chapter and
    /// reloads it from the server, restoring the pair that contains the
    /// previously visible page.
    pub async fn toggle_offset(&mut self) -> Result<()> {
        let Some(current) = self.chapter.as_ref() else {
            return Ok(());
        };
        let series = current.series_name.clone();
        let num = current.chapter.clone();
        let page = pairs::pair_start_page(&current.page_pairs, self.pair_index);

        let has_offset = self.client.toggle_offset(&series, &num).await?;
        let chapter = self.client.chapter(&series, &num).await?;
        if chapter.has_offset != has_offset {
            warn!(
                "offset ack ({}) disagrees with reloaded chapter ({})",
                has_offset, chapter.has_offset
            );
        }

        let pair = pairs::pair_for_page(&chapter.page_pairs, page).unwrap_or(0);
        self.set_chapter(chapter);
        self.pair_index = pair;
        Ok(())
    }

    /// Feeds a scroll-mode position sample to the tracker; returns the
    /// new 1-indexed page only when it changed.
    pub fn observe_scroll(
        &mut self,
        page_heights: &[f64],
        scroll_top: f64,
        viewport_height: f64,
    ) -> Option<usize> {
        self.tracker.observe(page_heights, scroll_top, viewport_height)
    }

    /// The image id of the single-mode page at the current position.
    pub fn current_page_id(&self) -> Option<&str> {
        self.chapter
            .as_ref()
            .and_then(|c| c.pages.get(self.page_index))
            .map(String::as_str)
    }

    /// The spread at the current dual-mode position.
    pub fn current_spread(&self) -> Option<Spread> {
        self.chapter
            .as_ref()
            .and_then(|c| c.page_pairs.get(self.pair_index))
            .and_then(|pair| Spread::from_pair(pair))
    }

    /// The "page N / M" indicator for the active mode.
    ///
    /// Single mode reports the page position, dual mode the first page
    /// of the visible spread, scroll mode the tracker's last observed
    /// page. `None` until a chapter is open.
    pub fn page_indicator(&self) -> Option<(usize, usize)> {
        let chapter = self.chapter.as_ref()?;
        let current = match self.store.settings().reader_mode {
            ReaderMode::Single => self.page_index + 1,
            ReaderMode::Dual => pairs::pair_start_page(&chapter.page_pairs, self.pair_index),
            ReaderMode::Scroll => self.tracker.current_page(),
        };
        Some((current, chapter.page_count))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}
