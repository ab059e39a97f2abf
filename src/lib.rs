//! # Yomu - Terminal reading client for self-hosted manga library servers
//!
//! Yomu is an async client library (plus a ratatui front end) for manga
//! library servers that expose their collection over a JSON API. It keeps
//! all reading logic - library browsing, chapter lists, the three reader
//! modes, shared settings, and adjacent-chapter preloading - in pure,
//! testable types, with rendering pushed out to a thin terminal adapter.
//!
//! ## Features
//!
//! - **Library browsing**: Series cards with search over titles and
//!   alternate titles
//! - **Chapter lists**: Formatted chapter rows with client-side sort
//!   toggling
//! - **Three reader modes**: Vertical scroll, single page, and two-page
//!   spreads (always right-to-left)
//! - **Shared settings**: One preferences object round-tripped to the
//!   server so every client sees the same state
//! - **Adjacent-chapter preloading**: Chapter data and boundary page
//!   images fetched in the background for seamless navigation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yomu::prelude::*;
//! use yomu::error::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::new("http://localhost:5000");
//!
//!     // Browse the library
//!     let mut library = LibraryView::new();
//!     library.load(&client).await?;
//!     for card in LibraryView::cards(library.series()) {
//!         println!("{} - {}", card.title, card.chapter_label);
//!     }
//!
//!     // Open a chapter and read
//!     let mut session = ReaderSession::new(client);
//!     session.load_settings().await;
//!     session.open("one-piece", "1").await?;
//!     if let Some((page, total)) = session.page_indicator() {
//!         println!("Page {} / {}", page, total);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`api`]: The JSON API client
//! - [`types`]: Wire-level data structures for series, chapters, and
//!   settings
//! - [`library`] / [`series`]: View-models for the browsing surfaces
//! - [`reader`]: The reader engine - session state, input mapping,
//!   scroll tracking, spread layout, and preloading
//! - [`settings`]: The server-backed settings store and derived layout
//! - [`format`]: Name and chapter-number formatting
//! - [`error`]: Error handling
//!
//! View-models never perform I/O beyond the [`api`] calls that load
//! them; everything a front end renders is a plain value it can also
//! assert on in tests.

pub mod api;
pub mod error;
pub mod format;
pub mod library;
pub mod reader;
pub mod series;
pub mod settings;
pub mod types;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude module for convenient imports.
///
/// Re-exports the most commonly used types, allowing a single
/// `use yomu::prelude::*;` statement.
pub mod prelude {
    pub use crate::{
        api::ApiClient,
        library::{LibraryView, SeriesCard},
        reader::{Direction, NavIntent, ReaderSession, Spread, StepOutcome},
        series::{ChapterRow, SeriesHeader, SeriesView},
        settings::{ReaderLayout, SettingsStore},
        types::{Chapter, FitMode, ReaderMode, ReadingDirection, Series, Settings},
    };

    #[cfg(feature = "tui")]
    pub use crate::tui::*;
}

// Re-export main types at crate root for direct access
pub use api::ApiClient;
pub use error::{Error, Result};
pub use reader::{Direction, NavIntent, ReaderSession, StepOutcome};
pub use types::{Chapter, ReaderMode, Series, Settings};
