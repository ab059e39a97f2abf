//! Input mapping: clicks and arrow keys to page-turn intents.
//!
//! Pure functions from an input position (or key) and the current
//! settings to a [`NavIntent`]. The front end owns the actual event
//! source; this module only encodes the zone and direction rules:
//!
//! - The page surface splits into a left zone (< 40% of the width), a
//!   right zone (> 60%), and a 20% dead zone in the middle.
//! - Single mode is direction-aware: LTR maps left to previous and right
//!   to next, RTL swaps them. Arrow keys mirror the same mapping.
//! - Dual mode is always right-to-left, regardless of the direction
//!   setting.
//! - Scroll mode has no click or arrow-key paging.

use crate::types::{ReaderMode, ReadingDirection, Settings};

/// Left/right boundaries of the click dead zone, as width fractions.
const LEFT_ZONE_END: f64 = 0.4;
const RIGHT_ZONE_START: f64 = 0.6;

/// A requested page turn, before mode-specific handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    PrevPage,
    NextPage,
}

/// A horizontal arrow key, decoupled from any input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

/// Maps a click at `fraction` (0.0 = left edge, 1.0 = right edge) of the
/// page surface to a page-turn intent.
///
/// Returns `None` for the dead zone, for scroll mode, and in single mode
/// when click navigation is disabled in the settings. The toggle only
/// covers single mode; dual-mode spreads always page on click.
///
/// # Examples
///
/// ```rust
/// use yomu::reader::input::{click_intent, NavIntent};
/// use yomu::types::{ReaderMode, Settings};
///
/// let mut settings = Settings::default();
/// settings.reader_mode = ReaderMode::Single;
///
/// assert_eq!(click_intent(0.1, &settings), Some(NavIntent::PrevPage));
/// assert_eq!(click_intent(0.5, &settings), None);
/// assert_eq!(click_intent(0.9, &settings), Some(NavIntent::NextPage));
/// ```
pub fn click_intent(fraction: f64, settings: &Settings) -> Option<NavIntent> {
    if settings.reader_mode == ReaderMode::Single && !settings.single_page_click_navigation {
        return None;
    }

    let side = if fraction < LEFT_ZONE_END {
        Side::Left
    } else if fraction > RIGHT_ZONE_START {
        Side::Right
    } else {
        return None;
    };

    intent_for_side(side, settings)
}

/// Maps an arrow key to a page-turn intent under the current settings.
///
/// Key navigation ignores the click-navigation toggle but follows the
/// same direction rules as clicks.
pub fn key_intent(key: ArrowKey, settings: &Settings) -> Option<NavIntent> {
    let side = match key {
        ArrowKey::Left => Side::Left,
        ArrowKey::Right => Side::Right,
    };
    intent_for_side(side, settings)
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

fn intent_for_side(side: Side, settings: &Settings) -> Option<NavIntent> {
    let direction = match settings.reader_mode {
        ReaderMode::Scroll => return None,
        ReaderMode::Single => settings.reading_direction,
        // Spreads read right-to-left no matter the direction setting.
        ReaderMode::Dual => ReadingDirection::Rtl,
    };

    Some(match (side, direction) {
        (Side::Left, ReadingDirection::Ltr) => NavIntent::PrevPage,
        (Side::Right, ReadingDirection::Ltr) => NavIntent::NextPage,
        (Side::Left, ReadingDirection::Rtl) => NavIntent::NextPage,
        (Side::Right, ReadingDirection::Rtl) => NavIntent::PrevPage,
    })
}
