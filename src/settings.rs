//! Reader settings: load, persist, and apply.
//!
//! A single [`SettingsStore`] instance is shared by the reader session.
//! `load` silently keeps defaults when the server cannot be reached;
//! `save` persists and re-applies on success and no-ops (with a log line)
//! on failure — nothing is retried. [`SettingsStore::apply`] is pure and
//! idempotent: it derives the full surface visibility state from the
//! current settings, so calling it any number of times can never leave
//! two reader modes visible at once.

use log::{debug, error};

use crate::{
    api::ApiClient,
    error::Result,
    types::{FitMode, ReaderMode, Settings},
};

/// Derived visibility state for the reader surfaces and controls.
///
/// Exactly one of the three surface flags is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderLayout {
    pub scroll_visible: bool,
    pub single_visible: bool,
    pub dual_visible: bool,
    /// The reading-direction control is hidden in dual mode, which is
    /// unconditionally right-to-left.
    pub direction_control_visible: bool,
    /// Dual mode owns the offset toggle.
    pub offset_control_visible: bool,
    pub fit: FitMode,
}

/// The process-wide reader preferences, backed by the server.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with known settings, skipping the server fetch.
    pub fn with_settings(settings: Settings) -> Self {
        SettingsStore { settings }
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetches settings from the server.
    ///
    /// On failure the error is logged and the store silently keeps its
    /// current (default) settings.
    pub async fn load(&mut self, client: &ApiClient) {
        match client.settings().await {
            Ok(settings) => {
                debug!("loaded settings: {:?}", settings);
                self.settings = settings;
            }
            Err(e) => {
                error!("Error loading settings: {}", e);
            }
        }
    }

    /// Persists new settings, adopting the server's stored copy on
    /// success.
    ///
    /// On failure the error is logged and the previous settings remain in
    /// force; the caller sees `Err` but nothing is retried.
    pub async fn save(&mut self, client: &ApiClient, new: Settings) -> Result<ReaderLayout> {
        match client.save_settings(&new).await {
            Ok(stored) => {
                self.settings = stored;
                Ok(self.apply())
            }
            Err(e) => {
                error!("Error saving settings: {}", e);
                Err(e)
            }
        }
    }

    /// Persists the default settings (the settings panel's reset button).
    pub async fn reset(&mut self, client: &ApiClient) -> Result<ReaderLayout> {
        self.save(client, Settings::default()).await
    }

    /// Derives the reader layout from the current settings.
    ///
    /// Pure and idempotent: fully resets the visibility of all three
    /// reader surfaces and their controls on every call.
    pub fn apply(&self) -> ReaderLayout {
        let mode = self.settings.reader_mode;
        ReaderLayout {
            scroll_visible: mode == ReaderMode::Scroll,
            single_visible: mode == ReaderMode::Single,
            dual_visible: mode == ReaderMode::Dual,
            direction_control_visible: mode != ReaderMode::Dual,
            offset_control_visible: mode == ReaderMode::Dual,
            fit: self.settings.fit_mode,
        }
    }
}

impl ReaderLayout {
    /// True when exactly one surface is visible.
    pub fn is_consistent(&self) -> bool {
        [self.scroll_visible, self.single_visible, self.dual_visible]
            .iter()
            .filter(|v| **v)
            .count()
            == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReadingDirection;

    fn store_with_mode(mode: ReaderMode) -> SettingsStore {
        let mut store = SettingsStore::new();
        store.settings.reader_mode = mode;
        store
    }

    #[test]
    fn test_apply_is_exclusive() {
        for mode in [ReaderMode::Scroll, ReaderMode::Single, ReaderMode::Dual] {
            let layout = store_with_mode(mode).apply();
            assert!(layout.is_consistent(), "mode {:?} left layout inconsistent", mode);
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let store = store_with_mode(ReaderMode::Dual);
        assert_eq!(store.apply(), store.apply());
    }

    #[test]
    fn test_dual_hides_direction_control() {
        let layout = store_with_mode(ReaderMode::Dual).apply();
        assert!(!layout.direction_control_visible);
        assert!(layout.offset_control_visible);

        let layout = store_with_mode(ReaderMode::Single).apply();
        assert!(layout.direction_control_visible);
        assert!(!layout.offset_control_visible);
    }

    #[test]
    fn test_defaults() {
        let store = SettingsStore::new();
        assert_eq!(store.settings().reader_mode, ReaderMode::Scroll);
        assert_eq!(store.settings().reading_direction, ReadingDirection::Ltr);
        assert_eq!(store.settings().fit_mode, FitMode::Width);
        assert!(store.settings().single_page_click_navigation);
    }
}
