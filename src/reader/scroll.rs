//! Scroll mode: mapping a scroll position to the visible page.
//!
//! Instead of observer callbacks wired into a real viewport, scroll mode
//! derives the "currently visible" page with a pure function over the
//! page layout: a page qualifies once more than half of its displayable
//! extent lies inside the viewport shrunk by an edge margin (the margin
//! avoids flicker when a page edge grazes the viewport edge). The
//! reported page is the last one that qualifies, and [`ScrollTracker`]
//! only reports changes.

/// Fraction of a page that must be inside the (shrunk) viewport.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Margin shaved off both viewport edges before testing visibility.
pub const EDGE_MARGIN: f64 = 100.0;

/// Returns the index of the last page crossing the visibility threshold,
/// or `None` when no page qualifies (e.g. a viewport smaller than the
/// margins).
///
/// `page_heights` are the stacked page extents in layout order;
/// `scroll_top` is the offset of the viewport top into that stack.
///
/// The qualifying ratio is measured against the page's displayable
/// extent: `min(page height, shrunk viewport height)`, so pages taller
/// than the viewport still qualify while they fill it.
///
/// # Examples
///
/// ```rust
/// use yomu::reader::scroll::visible_page;
///
/// let pages = vec![800.0, 800.0, 800.0];
/// // Viewport sitting on the second page.
/// assert_eq!(visible_page(&pages, 800.0, 600.0), Some(1));
/// ```
pub fn visible_page(page_heights: &[f64], scroll_top: f64, viewport_height: f64) -> Option<usize> {
    let view_top = scroll_top + EDGE_MARGIN;
    let view_bottom = scroll_top + viewport_height - EDGE_MARGIN;
    if view_bottom <= view_top {
        return None;
    }

    let mut offset = 0.0;
    let mut visible = None;

    for (index, height) in page_heights.iter().copied().enumerate() {
        let page_top = offset;
        let page_bottom = offset + height;
        offset = page_bottom;

        let overlap = page_bottom.min(view_bottom) - page_top.max(view_top);
        if overlap <= 0.0 {
            continue;
        }

        let displayable = height.min(view_bottom - view_top);
        if displayable > 0.0 && overlap / displayable > VISIBILITY_THRESHOLD {
            visible = Some(index);
        }
    }

    visible
}

/// Change-only tracker for the scroll-mode page indicator.
///
/// Holds the last reported page and only yields a value when the visible
/// page actually changes, so the indicator is not re-rendered on every
/// scroll tick. Reset before chapter navigation.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    current: usize,
}

impl ScrollTracker {
    /// Starts on page 1.
    pub fn new() -> Self {
        Self { current: 1 }
    }

    /// The last known visible page, 1-indexed.
    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Feeds a scroll position; returns the new 1-indexed page only when
    /// it differs from the last reported one.
    pub fn observe(
        &mut self,
        page_heights: &[f64],
        scroll_top: f64,
        viewport_height: f64,
    ) -> Option<usize> {
        let index = visible_page(page_heights, scroll_top, viewport_height)?;
        let page = index + 1;
        if page == self.current {
            None
        } else {
            self.current = page;
            Some(page)
        }
    }

    /// Resets to page 1 (chapter swap, mode change).
    pub fn reset(&mut self) {
        self.current = 1;
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGES: [f64; 4] = [800.0, 800.0, 800.0, 800.0];

    #[test]
    fn test_top_of_stack() {
        assert_eq!(visible_page(&PAGES, 0.0, 600.0), Some(0));
    }

    #[test]
    fn test_mid_stack_picks_last_qualifying() {
        // Viewport spans the end of page 0 and most of page 1; page 1
        // dominates and is the later page.
        assert_eq!(visible_page(&PAGES, 700.0, 600.0), Some(1));
    }

    #[test]
    fn test_tall_page_fills_small_viewport() {
        let pages = [3000.0, 3000.0];
        // Deep inside page 0: far less than half the page is shown, but
        // it fills the whole viewport.
        assert_eq!(visible_page(&pages, 1000.0, 600.0), Some(0));
    }

    #[test]
    fn test_degenerate_viewport() {
        assert_eq!(visible_page(&PAGES, 0.0, 150.0), None);
        assert_eq!(visible_page(&[], 0.0, 600.0), None);
    }

    #[test]
    fn test_tracker_reports_only_changes() {
        let mut tracker = ScrollTracker::new();
        assert_eq!(tracker.observe(&PAGES, 0.0, 600.0), None); // already on 1
        assert_eq!(tracker.observe(&PAGES, 820.0, 600.0), Some(2));
        assert_eq!(tracker.observe(&PAGES, 850.0, 600.0), None); // unchanged
        assert_eq!(tracker.current_page(), 2);
    }

    #[test]
    fn test_tracker_keeps_last_on_no_signal() {
        let mut tracker = ScrollTracker::new();
        tracker.observe(&PAGES, 820.0, 600.0);
        // No page qualifies; the indicator keeps its value.
        assert_eq!(tracker.observe(&PAGES, 820.0, 150.0), None);
        assert_eq!(tracker.current_page(), 2);
    }

    #[test]
    fn test_reset() {
        let mut tracker = ScrollTracker::new();
        tracker.observe(&PAGES, 2500.0, 600.0);
        tracker.reset();
        assert_eq!(tracker.current_page(), 1);
    }
}
