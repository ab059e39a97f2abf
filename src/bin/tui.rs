//! Yomu TUI - Terminal reading client for self-hosted manga libraries
//!
//! A full-screen terminal interface over the Yomu view-models: library
//! browsing with search, chapter lists with sort toggling, and a reader
//! with scroll, single, and dual page modes backed by adjacent-chapter
//! preloading.

use color_eyre::{eyre::Result, install};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{collections::HashSet, io, time::Duration};
use tokio::sync::mpsc;
use yomu::prelude::*;
use yomu::reader::{self, ArrowKey, preload};
use yomu::tui::{
    format_chapter_row, format_series_card, format_settings_summary, parse_background_color,
    truncate_text,
};

// Virtual pixel geometry for scroll mode. The terminal has no real
// image layout, so scroll mode runs against a fixed virtual viewport.
const VIRTUAL_PAGE_HEIGHT: f64 = 800.0;
const VIRTUAL_VIEWPORT_HEIGHT: f64 = 600.0;
const SCROLL_STEP: f64 = 120.0;

// Application events delivered from background tasks
#[derive(Debug)]
enum AppEvent {
    LibraryLoaded(Vec<Series>),
    SeriesLoaded(Box<Series>),
    PreloadReady(reader::Direction, Box<Chapter>),
    PreloadFailed(String),
    Error(String),
}

// Application screens
#[derive(Debug, Clone, PartialEq)]
enum AppMode {
    Library,
    Series,
    Reader,
}

// Modal states layered over the current screen
#[derive(Debug, Clone, PartialEq)]
enum ModalState {
    None,
    Settings,
    HelpDialog,
}

// Settings dialog rows
#[derive(Debug, Clone, Copy, PartialEq)]
enum SettingsField {
    Mode = 0,
    Fit = 1,
    Dir = 2,
    ClickNav = 3,
}

impl SettingsField {
    fn all() -> Vec<SettingsField> {
        vec![
            SettingsField::Mode,
            SettingsField::Fit,
            SettingsField::Dir,
            SettingsField::ClickNav,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            SettingsField::Mode => "Reader mode",
            SettingsField::Fit => "Fit",
            SettingsField::Dir => "Direction",
            SettingsField::ClickNav => "Click navigation",
        }
    }
}

// Color scheme
mod theme {
    use ratatui::style::Color;

    pub const PRIMARY: Color = Color::Rgb(120, 90, 255); // Violet

    pub const ACCENT: Color = Color::Rgb(255, 152, 0); // Orange
    pub const SUCCESS: Color = Color::Rgb(76, 175, 80); // Green
    pub const WARNING: Color = Color::Rgb(255, 193, 7); // Yellow
    pub const ERROR: Color = Color::Rgb(244, 67, 54); // Red
    pub const INFO: Color = Color::Rgb(33, 150, 243); // Light Blue

    pub const TEXT_PRIMARY: Color = Color::Rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color = Color::Rgb(189, 189, 189);
    pub const TEXT_MUTED: Color = Color::Rgb(117, 117, 117);

    pub const BORDER: Color = Color::Rgb(66, 66, 66);
    pub const BORDER_FOCUS: Color = PRIMARY;
}

#[derive(Debug, Clone, PartialEq)]
enum StatusType {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusType {
    fn color(&self) -> Color {
        match self {
            StatusType::Info => theme::INFO,
            StatusType::Success => theme::SUCCESS,
            StatusType::Warning => theme::WARNING,
            StatusType::Error => theme::ERROR,
        }
    }
}

struct App {
    // Core state
    mode: AppMode,
    modal_state: ModalState,
    should_quit: bool,

    // Library state
    library: LibraryView,
    library_filter: String,
    library_input_active: bool,
    library_list_state: ListState,

    // Series state
    series_view: Option<SeriesView>,
    chapters_list_state: ListState,

    // Reader state
    session: ReaderSession,
    scroll_top: f64,
    preloads_in_flight: HashSet<String>,

    // Settings dialog state
    settings_draft: Settings,
    settings_selected: usize,

    // UI state
    status_message: String,
    status_type: StatusType,
    last_reader_width: u16,

    // Communication
    event_sender: mpsc::UnboundedSender<AppEvent>,
    event_receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    async fn new(base_url: String) -> Result<Self> {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        let mut session = ReaderSession::new(ApiClient::new(base_url));
        session.load_settings().await;
        let settings_draft = session.settings().clone();

        let mut app = Self {
            mode: AppMode::Library,
            modal_state: ModalState::None,
            should_quit: false,

            library: LibraryView::new(),
            library_filter: String::new(),
            library_input_active: false,
            library_list_state: ListState::default(),

            series_view: None,
            chapters_list_state: ListState::default(),

            session,
            scroll_top: 0.0,
            preloads_in_flight: HashSet::new(),

            settings_draft,
            settings_selected: 0,

            status_message: "Loading library...".to_string(),
            status_type: StatusType::Info,
            last_reader_width: 80,

            event_sender,
            event_receiver,
        };

        app.spawn_library_load();
        Ok(app)
    }

    fn set_status(&mut self, message: String, status_type: StatusType) {
        self.status_message = message;
        self.status_type = status_type;
    }

    fn spawn_library_load(&self) {
        let client = self.session.client().clone();
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            match client.library().await {
                Ok(series) => {
                    let _ = sender.send(AppEvent::LibraryLoaded(series));
                }
                Err(e) => {
                    let _ = sender.send(AppEvent::Error(format!("Library load failed: {}", e)));
                }
            }
        });
    }

    fn spawn_series_load(&self, name: String) {
        let client = self.session.client().clone();
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            match client.series(&name).await {
                Ok(series) => {
                    let _ = sender.send(AppEvent::SeriesLoaded(Box::new(series)));
                }
                Err(e) => {
                    let _ = sender.send(AppEvent::Error(format!("Series load failed: {}", e)));
                }
            }
        });
    }

    /// Kicks off background fetches for the adjacent chapters the
    /// session wants preloaded, skipping ones already in flight.
    fn spawn_wanted_preloads(&mut self) {
        let Some(series) = self.session.chapter().map(|c| c.series_name.clone()) else {
            return;
        };

        for direction in self.session.wanted_preloads() {
            let Some(target) = self
                .session
                .chapter()
                .and_then(|c| c.adjacent_chapter(direction))
                .map(str::to_string)
            else {
                continue;
            };
            if !self.preloads_in_flight.insert(target.clone()) {
                continue;
            }

            let client = self.session.client().clone();
            let sender = self.event_sender.clone();
            let series = series.clone();
            tokio::spawn(async move {
                match client.chapter(&series, &target).await {
                    Ok(chapter) => {
                        let _ = sender.send(AppEvent::PreloadReady(direction, Box::new(chapter)));
                    }
                    Err(e) => {
                        let _ = sender.send(AppEvent::PreloadFailed(target));
                        log::warn!("preload fetch failed: {}", e);
                    }
                }
            });
        }
    }

    fn filtered_series(&self) -> Vec<SeriesCard> {
        LibraryView::cards(self.library.search(&self.library_filter))
    }

    async fn open_selected_series(&mut self) {
        let cards = self.filtered_series();
        let Some(index) = self.library_list_state.selected() else {
            return;
        };
        let Some(card) = cards.get(index) else {
            return;
        };
        self.set_status(format!("Loading {}...", card.title), StatusType::Info);
        self.spawn_series_load(card.name.clone());
    }

    async fn open_selected_chapter(&mut self) {
        let Some(view) = &self.series_view else {
            return;
        };
        let rows = view.chapter_rows();
        let Some(row) = self
            .chapters_list_state
            .selected()
            .and_then(|i| rows.get(i))
        else {
            return;
        };

        let series = view.series().name.clone();
        let number = row.number.clone();
        match self.session.open(&series, &number).await {
            Ok(()) => {
                self.scroll_top = 0.0;
                self.mode = AppMode::Reader;
                let label = self
                    .session
                    .chapter()
                    .map(|c| c.chapter_display.clone())
                    .unwrap_or_default();
                self.set_status(label, StatusType::Success);
                self.spawn_wanted_preloads();
            }
            Err(e) => {
                self.set_status(format!("Chapter load failed: {}", e), StatusType::Error);
            }
        }
    }

    async fn navigate_chapter(&mut self, direction: reader::Direction) {
        match self.session.navigate(direction).await {
            Ok(true) => {
                self.scroll_top = 0.0;
                let label = self
                    .session
                    .chapter()
                    .map(|c| c.chapter_display.clone())
                    .unwrap_or_default();
                self.set_status(label, StatusType::Success);
                self.spawn_wanted_preloads();
            }
            Ok(false) => {
                self.set_status("No more chapters".to_string(), StatusType::Warning);
            }
            Err(e) => {
                self.set_status(format!("Navigation failed: {}", e), StatusType::Error);
            }
        }
    }

    async fn apply_intent(&mut self, intent: NavIntent) {
        match self.session.handle(intent) {
            StepOutcome::PageShown => {
                self.spawn_wanted_preloads();
            }
            StepOutcome::ChapterRequest(direction) => {
                self.navigate_chapter(direction).await;
            }
            StepOutcome::Ignored => {}
        }
    }

    fn scroll_by(&mut self, delta: f64) {
        let Some(chapter) = self.session.chapter() else {
            return;
        };
        let total = chapter.page_count as f64 * VIRTUAL_PAGE_HEIGHT;
        let max_top = (total - VIRTUAL_VIEWPORT_HEIGHT).max(0.0);
        self.scroll_top = (self.scroll_top + delta).clamp(0.0, max_top);

        let heights = vec![VIRTUAL_PAGE_HEIGHT; chapter.page_count];
        self.session
            .observe_scroll(&heights, self.scroll_top, VIRTUAL_VIEWPORT_HEIGHT);
    }

    async fn toggle_offset(&mut self) {
        if self.session.settings().reader_mode != ReaderMode::Dual {
            return;
        }
        match self.session.toggle_offset().await {
            Ok(()) => {
                let state = self
                    .session
                    .chapter()
                    .map(|c| if c.has_offset { "on" } else { "off" })
                    .unwrap_or("off");
                self.set_status(format!("Pairing offset {}", state), StatusType::Success);
            }
            Err(e) => {
                self.set_status(format!("Offset toggle failed: {}", e), StatusType::Error);
            }
        }
    }

    async fn handle_key_event(&mut self, key: KeyCode) -> Result<()> {
        // Modal dialogs swallow input first
        if self.modal_state != ModalState::None {
            return self.handle_modal_key_event(key).await;
        }

        // Text entry for the library filter
        if self.library_input_active {
            match key {
                KeyCode::Esc | KeyCode::Enter => {
                    self.library_input_active = false;
                }
                KeyCode::Backspace => {
                    self.library_filter.pop();
                    self.library_list_state.select(Some(0));
                }
                KeyCode::Char(c) => {
                    self.library_filter.push(c);
                    self.library_list_state.select(Some(0));
                }
                _ => {}
            }
            return Ok(());
        }

        // Global keys
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.modal_state = ModalState::HelpDialog;
                return Ok(());
            }
            KeyCode::Char('s') if self.mode != AppMode::Series => {
                self.settings_draft = self.session.settings().clone();
                self.settings_selected = 0;
                self.modal_state = ModalState::Settings;
                return Ok(());
            }
            _ => {}
        }

        match self.mode {
            AppMode::Library => self.handle_library_key(key).await,
            AppMode::Series => self.handle_series_key(key).await,
            AppMode::Reader => self.handle_reader_key(key).await,
        }
    }

    async fn handle_library_key(&mut self, key: KeyCode) -> Result<()> {
        let count = self.filtered_series().len();
        match key {
            KeyCode::Char('/') => {
                self.library_input_active = true;
            }
            KeyCode::Up => Self::select_previous(&mut self.library_list_state, count),
            KeyCode::Down => Self::select_next(&mut self.library_list_state, count),
            KeyCode::Enter => self.open_selected_series().await,
            KeyCode::Char('r') => {
                self.set_status("Reloading library...".to_string(), StatusType::Info);
                self.spawn_library_load();
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_series_key(&mut self, key: KeyCode) -> Result<()> {
        let count = self
            .series_view
            .as_ref()
            .map(|v| v.series().chapters.len())
            .unwrap_or(0);
        match key {
            KeyCode::Esc => {
                self.mode = AppMode::Library;
            }
            KeyCode::Up => Self::select_previous(&mut self.chapters_list_state, count),
            KeyCode::Down => Self::select_next(&mut self.chapters_list_state, count),
            KeyCode::Enter => self.open_selected_chapter().await,
            KeyCode::Char('s') => {
                if let Some(view) = &mut self.series_view {
                    view.toggle_sort();
                    let order = if view.sort_ascending() {
                        "ascending"
                    } else {
                        "descending"
                    };
                    self.set_status(format!("Sorted {}", order), StatusType::Info);
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_reader_key(&mut self, key: KeyCode) -> Result<()> {
        let settings = self.session.settings().clone();
        match key {
            KeyCode::Esc => {
                self.mode = AppMode::Series;
            }
            KeyCode::Left => {
                if let Some(intent) = reader::key_intent(ArrowKey::Left, &settings) {
                    self.apply_intent(intent).await;
                }
            }
            KeyCode::Right => {
                if let Some(intent) = reader::key_intent(ArrowKey::Right, &settings) {
                    self.apply_intent(intent).await;
                }
            }
            KeyCode::Up if settings.reader_mode == ReaderMode::Scroll => {
                self.scroll_by(-SCROLL_STEP);
            }
            KeyCode::Down if settings.reader_mode == ReaderMode::Scroll => {
                self.scroll_by(SCROLL_STEP);
            }
            KeyCode::Char('n') => {
                self.navigate_chapter(reader::Direction::Next).await;
            }
            KeyCode::Char('p') => {
                self.navigate_chapter(reader::Direction::Prev).await;
            }
            KeyCode::Char('o') => {
                self.toggle_offset().await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_modal_key_event(&mut self, key: KeyCode) -> Result<()> {
        match self.modal_state {
            ModalState::HelpDialog => {
                self.modal_state = ModalState::None;
            }
            ModalState::Settings => match key {
                KeyCode::Esc => {
                    self.modal_state = ModalState::None;
                    self.set_status("Settings unchanged".to_string(), StatusType::Info);
                }
                KeyCode::Up => {
                    if self.settings_selected > 0 {
                        self.settings_selected -= 1;
                    }
                }
                KeyCode::Down => {
                    if self.settings_selected + 1 < SettingsField::all().len() {
                        self.settings_selected += 1;
                    }
                }
                KeyCode::Left | KeyCode::Right => {
                    self.cycle_settings_field();
                }
                KeyCode::Enter => {
                    let draft = self.settings_draft.clone();
                    match self.session.save_settings(draft).await {
                        Ok(_layout) => {
                            self.scroll_top = 0.0;
                            self.modal_state = ModalState::None;
                            self.set_status("Settings saved".to_string(), StatusType::Success);
                            self.spawn_wanted_preloads();
                        }
                        Err(e) => {
                            self.set_status(
                                format!("Settings save failed: {}", e),
                                StatusType::Error,
                            );
                        }
                    }
                }
                KeyCode::Char('r') => match self.session.reset_settings().await {
                    Ok(_layout) => {
                        self.settings_draft = self.session.settings().clone();
                        self.scroll_top = 0.0;
                        self.modal_state = ModalState::None;
                        self.set_status("Settings reset to defaults".to_string(), StatusType::Success);
                        self.spawn_wanted_preloads();
                    }
                    Err(e) => {
                        self.set_status(format!("Settings reset failed: {}", e), StatusType::Error);
                    }
                },
                _ => {}
            },
            ModalState::None => {}
        }
        Ok(())
    }

    fn cycle_settings_field(&mut self) {
        match SettingsField::all()[self.settings_selected] {
            SettingsField::Mode => {
                self.settings_draft.reader_mode = match self.settings_draft.reader_mode {
                    ReaderMode::Scroll => ReaderMode::Single,
                    ReaderMode::Single => ReaderMode::Dual,
                    ReaderMode::Dual => ReaderMode::Scroll,
                };
            }
            SettingsField::Fit => {
                self.settings_draft.fit_mode = match self.settings_draft.fit_mode {
                    FitMode::Width => FitMode::Height,
                    FitMode::Height => FitMode::Original,
                    FitMode::Original => FitMode::Width,
                };
            }
            SettingsField::Dir => {
                self.settings_draft.reading_direction = match self.settings_draft.reading_direction
                {
                    ReadingDirection::Ltr => ReadingDirection::Rtl,
                    ReadingDirection::Rtl => ReadingDirection::Ltr,
                };
            }
            SettingsField::ClickNav => {
                self.settings_draft.single_page_click_navigation =
                    !self.settings_draft.single_page_click_navigation;
            }
        }
    }

    async fn handle_mouse_click(&mut self, column: u16) -> Result<()> {
        if self.mode != AppMode::Reader || self.modal_state != ModalState::None {
            return Ok(());
        }
        let width = self.last_reader_width.max(1) as f64;
        let fraction = column as f64 / width;
        let settings = self.session.settings().clone();
        if let Some(intent) = reader::click_intent(fraction, &settings) {
            self.apply_intent(intent).await;
        }
        Ok(())
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LibraryLoaded(series) => {
                let count = series.len();
                self.library = LibraryView::from_series(series);
                self.library_list_state
                    .select(if count == 0 { None } else { Some(0) });
                self.set_status(format!("{} series in library", count), StatusType::Success);
            }
            AppEvent::SeriesLoaded(series) => {
                let view = SeriesView::from_series(*series);
                self.chapters_list_state
                    .select(if view.series().chapters.is_empty() {
                        None
                    } else {
                        Some(0)
                    });
                let title = view.header().title.clone();
                self.series_view = Some(view);
                self.mode = AppMode::Series;
                self.set_status(title, StatusType::Success);
            }
            AppEvent::PreloadReady(direction, chapter) => {
                self.preloads_in_flight.remove(&chapter.chapter);
                let warm = (*chapter).clone();
                // Only warm images for entries the session kept; a stale
                // fetch is dropped without touching the network again.
                if self.session.store_preloaded(direction, *chapter) {
                    let client = self.session.client().clone();
                    tokio::spawn(async move {
                        preload::warm_page_images(&client, &warm, direction).await;
                    });
                }
            }
            AppEvent::PreloadFailed(target) => {
                self.preloads_in_flight.remove(&target);
            }
            AppEvent::Error(message) => {
                self.set_status(message, StatusType::Error);
            }
        }
    }

    fn select_next(state: &mut ListState, count: usize) {
        if count == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0);
        state.select(Some((current + 1).min(count - 1)));
    }

    fn select_previous(state: &mut ListState, count: usize) {
        if count == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0);
        state.select(Some(current.saturating_sub(1)));
    }
}

// Rendering implementation
impl App {
    fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status bar
            ])
            .split(size);

        self.render_header(f, chunks[0]);

        match self.mode {
            AppMode::Library => self.render_library(f, chunks[1]),
            AppMode::Series => self.render_series(f, chunks[1]),
            AppMode::Reader => self.render_reader(f, chunks[1]),
        }

        self.render_status_bar(f, chunks[2]);

        match self.modal_state {
            ModalState::Settings => self.render_settings_modal(f, size),
            ModalState::HelpDialog => self.render_help_modal(f, size),
            ModalState::None => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title = match self.mode {
            AppMode::Library => "Library".to_string(),
            AppMode::Series => self
                .series_view
                .as_ref()
                .map(|v| v.header().title.clone())
                .unwrap_or_else(|| "Series".to_string()),
            AppMode::Reader => self
                .session
                .chapter()
                .map(|c| c.chapter_display.clone())
                .unwrap_or_else(|| "Reader".to_string()),
        };

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Yomu ",
                Style::default()
                    .fg(theme::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(title, Style::default().fg(theme::TEXT_PRIMARY)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER))
                .border_type(BorderType::Rounded),
        );
        f.render_widget(header, area);
    }

    fn render_library(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let filter_style = if self.library_input_active {
            Style::default().fg(theme::BORDER_FOCUS)
        } else {
            Style::default().fg(theme::BORDER)
        };
        let filter = Paragraph::new(self.library_filter.as_str()).block(
            Block::default()
                .title("Search (/)")
                .borders(Borders::ALL)
                .border_style(filter_style)
                .border_type(BorderType::Rounded),
        );
        f.render_widget(filter, chunks[0]);

        let cards = self.filtered_series();
        let items: Vec<ListItem> = cards
            .iter()
            .map(|card| ListItem::new(format_series_card(card)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Series ({})", cards.len()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .border_type(BorderType::Rounded),
            )
            .highlight_style(
                Style::default()
                    .bg(theme::PRIMARY)
                    .fg(theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, chunks[1], &mut self.library_list_state);
    }

    fn render_series(&mut self, f: &mut Frame, area: Rect) {
        let Some(view) = &self.series_view else {
            return;
        };
        let header = view.header();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let mut info_lines = vec![Line::from(Span::styled(
            header.title.clone(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ))];
        if let Some(author) = &header.author {
            info_lines.push(Line::from(vec![
                Span::styled("Author: ", Style::default().fg(theme::TEXT_MUTED)),
                Span::styled(author.clone(), Style::default().fg(theme::TEXT_PRIMARY)),
            ]));
        }
        if let Some(status) = &header.status {
            info_lines.push(Line::from(vec![
                Span::styled("Status: ", Style::default().fg(theme::TEXT_MUTED)),
                Span::styled(status.clone(), Style::default().fg(theme::TEXT_PRIMARY)),
            ]));
        }
        info_lines.push(Line::from(Span::styled(
            header.total_label.clone(),
            Style::default().fg(theme::TEXT_SECONDARY),
        )));
        if !header.genres.is_empty() {
            info_lines.push(Line::from(Span::styled(
                header.genres.join(", "),
                Style::default().fg(theme::INFO),
            )));
        }
        info_lines.push(Line::from(""));
        info_lines.extend(yomu::tui::format_description(
            &header.description,
            chunks[0].width.saturating_sub(4) as usize,
        ));

        let info = Paragraph::new(info_lines)
            .block(
                Block::default()
                    .title("About")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .border_type(BorderType::Rounded),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(info, chunks[0]);

        let rows = view.chapter_rows();
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| ListItem::new(format_chapter_row(row)))
            .collect();
        let order = if view.sort_ascending() { "1→N" } else { "N→1" };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Chapters [{}] (s to sort)", order))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .border_type(BorderType::Rounded),
            )
            .highlight_style(
                Style::default()
                    .bg(theme::PRIMARY)
                    .fg(theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, chunks[1], &mut self.chapters_list_state);
    }

    fn render_reader(&mut self, f: &mut Frame, area: Rect) {
        self.last_reader_width = area.width;
        let background = parse_background_color(&self.session.settings().background_color);
        let layout = self.session.layout();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        if layout.scroll_visible {
            self.render_scroll_surface(f, chunks[0], background);
        } else if layout.single_visible {
            self.render_single_surface(f, chunks[0], background);
        } else {
            self.render_dual_surface(f, chunks[0], background);
        }

        // Footer: page indicator plus settings summary
        let mut spans = Vec::new();
        if let Some((page, total)) = self.session.page_indicator() {
            spans.push(Span::styled(
                format!("Page {} / {}  ", page, total),
                Style::default()
                    .fg(theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.extend(format_settings_summary(self.session.settings()).spans);
        let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        f.render_widget(footer, chunks[1]);
    }

    fn render_scroll_surface(&self, f: &mut Frame, area: Rect, background: Color) {
        let Some(chapter) = self.session.chapter() else {
            return;
        };
        let current = self
            .session
            .page_indicator()
            .map(|(page, _)| page)
            .unwrap_or(1);

        let lines: Vec<Line> = chapter
            .pages
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let marker = if i + 1 == current { "▶ " } else { "  " };
                let style = if i + 1 == current {
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::TEXT_SECONDARY)
                };
                Line::from(Span::styled(
                    format!(
                        "{}{}",
                        marker,
                        truncate_text(id, (area.width as usize).saturating_sub(4))
                    ),
                    style,
                ))
            })
            .collect();

        let offset = current.saturating_sub(area.height as usize / 2);
        let surface = Paragraph::new(lines)
            .style(Style::default().bg(background))
            .scroll((offset as u16, 0))
            .block(
                Block::default()
                    .title("Scroll (↑/↓)")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .border_type(BorderType::Rounded),
            );
        f.render_widget(surface, area);
    }

    fn render_single_surface(&self, f: &mut Frame, area: Rect, background: Color) {
        let url = self
            .session
            .current_page_id()
            .map(|id| self.session.client().image_url(id))
            .unwrap_or_default();

        let page = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                url,
                Style::default().fg(theme::TEXT_PRIMARY),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "← prev zone | dead zone | next zone →",
                Style::default().fg(theme::TEXT_MUTED),
            )),
        ])
        .style(Style::default().bg(background))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Single")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER))
                .border_type(BorderType::Rounded),
        );
        f.render_widget(page, area);
    }

    fn render_dual_surface(&self, f: &mut Frame, area: Rect, background: Color) {
        let spread = self.session.current_spread();

        match spread {
            Some(Spread::Facing { right, left }) => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(area);

                // Spreads read right-to-left: the earlier page is on the right.
                for (slot, id, title) in [
                    (halves[0], &left, "Left (later)"),
                    (halves[1], &right, "Right (earlier)"),
                ] {
                    let panel = Paragraph::new(self.session.client().image_url(id))
                        .style(Style::default().bg(background))
                        .alignment(Alignment::Center)
                        .block(
                            Block::default()
                                .title(title)
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(theme::BORDER))
                                .border_type(BorderType::Rounded),
                        );
                    f.render_widget(panel, slot);
                }
            }
            Some(Spread::Centered(id)) => {
                let panel = Paragraph::new(self.session.client().image_url(&id))
                    .style(Style::default().bg(background))
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .title("Spread (o to shift pairing)")
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme::BORDER))
                            .border_type(BorderType::Rounded),
                    );
                f.render_widget(panel, area);
            }
            None => {}
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status = Paragraph::new(Line::from(vec![
            Span::styled(
                self.status_message.clone(),
                Style::default().fg(self.status_type.color()),
            ),
            Span::styled(
                "  |  ? help, q quit",
                Style::default().fg(theme::TEXT_MUTED),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER))
                .border_type(BorderType::Rounded),
        );
        f.render_widget(status, area);
    }

    fn render_settings_modal(&self, f: &mut Frame, size: Rect) {
        let area = self.centered_rect(50, 50, size);
        f.render_widget(Clear, area);

        let mut lines = vec![Line::from("")];
        for (i, field) in SettingsField::all().into_iter().enumerate() {
            let value = match field {
                SettingsField::Mode => match self.settings_draft.reader_mode {
                    ReaderMode::Scroll => "scroll",
                    ReaderMode::Single => "single",
                    ReaderMode::Dual => "dual (RTL)",
                }
                .to_string(),
                SettingsField::Fit => match self.settings_draft.fit_mode {
                    FitMode::Width => "width",
                    FitMode::Height => "height",
                    FitMode::Original => "original",
                }
                .to_string(),
                SettingsField::Dir => match self.settings_draft.reading_direction {
                    ReadingDirection::Ltr => "left-to-right",
                    ReadingDirection::Rtl => "right-to-left",
                }
                .to_string(),
                SettingsField::ClickNav => if self.settings_draft.single_page_click_navigation {
                    "enabled"
                } else {
                    "disabled"
                }
                .to_string(),
            };

            let selected = i == self.settings_selected;
            let style = if selected {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT_PRIMARY)
            };
            let marker = if selected { "▶ " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{}{:<18} {}", marker, field.name(), value),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "↑/↓ select, ←/→ change, Enter save, r reset, Esc cancel",
            Style::default().fg(theme::TEXT_MUTED),
        )));

        let modal = Paragraph::new(lines).block(
            Block::default()
                .title("Settings")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER_FOCUS))
                .border_type(BorderType::Rounded),
        );
        f.render_widget(modal, area);
    }

    fn render_help_modal(&self, f: &mut Frame, size: Rect) {
        let area = self.centered_rect(60, 70, size);
        f.render_widget(Clear, area);

        let help_text = vec![
            Line::from(Span::styled(
                "Yomu - Keyboard Reference",
                Style::default()
                    .fg(theme::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Global:"),
            Line::from("  q         - Quit"),
            Line::from("  ?         - This help"),
            Line::from("  s         - Settings (library/reader)"),
            Line::from(""),
            Line::from("Library:"),
            Line::from("  /         - Search series"),
            Line::from("  Enter     - Open series"),
            Line::from("  r         - Reload library"),
            Line::from(""),
            Line::from("Series:"),
            Line::from("  Enter     - Open chapter"),
            Line::from("  s         - Toggle sort order"),
            Line::from("  Esc       - Back to library"),
            Line::from(""),
            Line::from("Reader:"),
            Line::from("  ←/→       - Turn page (single/dual)"),
            Line::from("  ↑/↓       - Scroll (scroll mode)"),
            Line::from("  click     - Turn page via click zones"),
            Line::from("  n / p     - Next / previous chapter"),
            Line::from("  o         - Shift dual pairing offset"),
            Line::from("  Esc       - Back to chapter list"),
            Line::from(""),
            Line::from("Settings:"),
            Line::from("  Enter     - Save"),
            Line::from("  r         - Reset to defaults"),
            Line::from(""),
            Line::from("Press any key to close"),
        ];

        let help = Paragraph::new(help_text)
            .style(Style::default().fg(theme::TEXT_PRIMARY))
            .block(
                Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::INFO))
                    .border_type(BorderType::Rounded),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(help, area);
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install()?;
    env_logger::init();

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("YOMU_SERVER").ok())
        .unwrap_or_else(|| "http://localhost:5000".to_string());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(base_url).await?;

    // Main loop
    loop {
        terminal.draw(|f| app.render(f))?;

        // Handle events
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key_event(key.code).await?;
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        app.handle_mouse_click(mouse.column).await?;
                    }
                }
                _ => {}
            }
        }

        // Handle app events
        while let Ok(app_event) = app.event_receiver.try_recv() {
            app.handle_app_event(app_event);
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
