mod common;

use common::{TEST_BASE_URL, sample_chapter};
use yomu::prelude::*;
use yomu::reader::{ArrowKey, key_intent};

fn open_session(mode: ReaderMode, chapter: Chapter) -> ReaderSession {
    let settings = Settings {
        reader_mode: mode,
        ..Settings::default()
    };
    let mut session = ReaderSession::with_settings(ApiClient::new(TEST_BASE_URL), settings);
    session.set_chapter(chapter);
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_mode_tracks_position_by_offset() {
        let mut session = open_session(
            ReaderMode::Scroll,
            sample_chapter("one-piece", "2", 4, Some("1"), Some("3")),
        );
        // Paging intents mean nothing in scroll mode.
        assert_eq!(session.handle(NavIntent::NextPage), StepOutcome::Ignored);

        // Scrolling through the stack advances the indicator.
        let heights = vec![800.0; 4];
        assert_eq!(session.observe_scroll(&heights, 0.0, 600.0), None);
        assert_eq!(session.observe_scroll(&heights, 900.0, 600.0), Some(2));
        assert_eq!(session.page_indicator(), Some((2, 4)));

        // Same position again reports no change.
        assert_eq!(session.observe_scroll(&heights, 900.0, 600.0), None);
    }

    #[test]
    fn test_single_mode_walks_pages_then_requests_neighbor() {
        let mut session = open_session(
            ReaderMode::Single,
            sample_chapter("one-piece", "2", 3, Some("1"), Some("3")),
        );

        assert_eq!(session.current_page_id(), Some("one-piece/2/001.png"));
        assert_eq!(session.handle(NavIntent::NextPage), StepOutcome::PageShown);
        assert_eq!(session.handle(NavIntent::NextPage), StepOutcome::PageShown);
        assert_eq!(session.page_indicator(), Some((3, 3)));

        // Past the last page the session asks for the next chapter.
        assert_eq!(
            session.handle(NavIntent::NextPage),
            StepOutcome::ChapterRequest(Direction::Next)
        );
    }

    #[test]
    fn test_dual_mode_steps_spreads_right_to_left() {
        let mut session = open_session(
            ReaderMode::Dual,
            sample_chapter("one-piece", "2", 5, None, None),
        );

        // Pairing: [1], [3,2], [5,4].
        assert!(matches!(session.current_spread(), Some(Spread::Centered(_))));
        assert_eq!(session.handle(NavIntent::NextPage), StepOutcome::PageShown);
        match session.current_spread() {
            Some(Spread::Facing { right, left }) => {
                assert!(right.ends_with("003.png"));
                assert!(left.ends_with("002.png"));
            }
            other => panic!("expected facing spread, got {:?}", other),
        }
        assert_eq!(session.page_indicator(), Some((2, 5)));

        // No neighbors: the series end swallows the turn.
        session.handle(NavIntent::NextPage);
        assert_eq!(session.handle(NavIntent::NextPage), StepOutcome::Ignored);
    }

    #[test]
    fn test_arrow_keys_respect_direction() {
        let ltr = Settings {
            reader_mode: ReaderMode::Single,
            reading_direction: ReadingDirection::Ltr,
            ..Settings::default()
        };
        let rtl = Settings {
            reading_direction: ReadingDirection::Rtl,
            ..ltr.clone()
        };

        assert_eq!(key_intent(ArrowKey::Right, &ltr), Some(NavIntent::NextPage));
        assert_eq!(key_intent(ArrowKey::Right, &rtl), Some(NavIntent::PrevPage));
        assert_eq!(key_intent(ArrowKey::Left, &ltr), Some(NavIntent::PrevPage));
    }

    #[test]
    fn test_preload_wanted_then_filled() {
        let mut session = open_session(
            ReaderMode::Scroll,
            sample_chapter("one-piece", "2", 4, Some("1"), Some("3")),
        );

        // Both neighbors are wanted immediately in scroll mode.
        assert_eq!(
            session.wanted_preloads(),
            vec![Direction::Prev, Direction::Next]
        );

        assert!(session.store_preloaded(
            Direction::Next,
            sample_chapter("one-piece", "3", 4, Some("2"), Some("4")),
        ));
        assert_eq!(session.wanted_preloads(), vec![Direction::Prev]);

        // A response for a neighbor we no longer expect is discarded.
        assert!(!session.store_preloaded(
            Direction::Prev,
            sample_chapter("one-piece", "9", 4, None, None),
        ));
        assert_eq!(session.wanted_preloads(), vec![Direction::Prev]);
    }

    #[test]
    fn test_single_mode_defers_preload_until_near_boundary() {
        let mut session = open_session(
            ReaderMode::Single,
            sample_chapter("one-piece", "2", 10, Some("1"), Some("3")),
        );

        // Page 1 of 10: only the previous neighbor is near.
        assert_eq!(session.wanted_preloads(), vec![Direction::Prev]);

        for _ in 0..7 {
            session.handle(NavIntent::NextPage);
        }
        // Page 8 of 10: within three pages of the end.
        assert_eq!(session.wanted_preloads(), vec![Direction::Next]);
    }

    #[test]
    fn test_chapter_swap_resets_position_and_prunes_cache() {
        let mut session = open_session(
            ReaderMode::Scroll,
            sample_chapter("one-piece", "2", 4, Some("1"), Some("3")),
        );
        let heights = vec![800.0; 4];
        session.observe_scroll(&heights, 1800.0, 600.0);
        assert_eq!(session.page_indicator(), Some((3, 4)));

        session.store_preloaded(
            Direction::Next,
            sample_chapter("one-piece", "3", 6, Some("2"), Some("4")),
        );

        // After the swap the cached chapter 3 is the open one, not a
        // neighbor, so both slots are wanted again.
        session.set_chapter(sample_chapter("one-piece", "3", 6, Some("2"), Some("4")));
        assert_eq!(session.page_indicator(), Some((1, 6)));
        assert_eq!(
            session.wanted_preloads(),
            vec![Direction::Prev, Direction::Next]
        );
    }
}
