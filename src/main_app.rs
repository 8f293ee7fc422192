use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyEventKind;
use log::{debug, error, info, warn};
use ratatui::{Frame, Terminal, style::Style, widgets::Block};

use crate::document_library::DocumentLibrary;
use crate::docx::DocxAuthor;
use crate::event_source::{
    Event, EventSource, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use crate::export::{DocumentAuthor, ExportError, QuizExporter, export_file_name};
use crate::extractor::{DocumentTextExtractor, TextExtractor};
use crate::notification::NotificationManager;
use crate::pagination::{self, PageDirection};
use crate::quiz_state::QuizState;
use crate::session::load_quiz;
use crate::settings;
use crate::theme::current_theme;
use crate::view::QuizView;
use crate::widget::document_picker::DocumentPicker;
use crate::widget::help_popup::{HelpPopup, HelpPopupAction};
use crate::widget::hud_message;
use crate::widget::quiz_panel::{self, QuizHit, QuizHitAreas, QuizPanelState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Picker,
    Quiz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizFocus {
    Options,
    Markers,
}

/// Move to the next question once `due` has passed, if the user is still on
/// `from_index`.
#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    from_index: usize,
    due: Instant,
}

/// Start-up configuration, resolved from settings and command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub document_directory: PathBuf,
    pub export_dir: PathBuf,
    pub export_file_name: String,
    pub advance_delay: Duration,
}

impl AppConfig {
    pub fn from_settings(
        document_directory: impl Into<PathBuf>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            document_directory: document_directory.into(),
            export_dir: export_dir.into(),
            export_file_name: settings::get_export_file_name(),
            advance_delay: settings::get_advance_delay(),
        }
    }
}

pub struct App {
    library: DocumentLibrary,
    picker: DocumentPicker,
    screen: Screen,
    quiz: Option<QuizState>,
    loaded_document: Option<PathBuf>,
    focus: QuizFocus,
    option_cursor: usize,
    marker_cursor: usize,
    pending_advance: Option<PendingAdvance>,
    advance_delay: Duration,
    extractor: Box<dyn TextExtractor>,
    author: Option<Box<dyn DocumentAuthor>>,
    export_dir: PathBuf,
    export_file_name: String,
    pub notifications: NotificationManager,
    help_popup: Option<HelpPopup>,
    quiz_hits: QuizHitAreas,
}

impl App {
    pub fn new_with_config(config: AppConfig) -> Self {
        Self::with_backends(
            config,
            Box::new(DocumentTextExtractor),
            Some(Box::new(DocxAuthor::default())),
        )
    }

    /// Build an app with explicit document reader and writer.
    ///
    /// `author` is optional: without one, exports are refused with a
    /// notification.
    pub fn with_backends(
        config: AppConfig,
        extractor: Box<dyn TextExtractor>,
        author: Option<Box<dyn DocumentAuthor>>,
    ) -> Self {
        let library = DocumentLibrary::new_with_directory(&config.document_directory);
        debug!(
            "Found {} documents in {}",
            library.len(),
            config.document_directory.display()
        );

        Self {
            library,
            picker: DocumentPicker::new(),
            screen: Screen::Picker,
            quiz: None,
            loaded_document: None,
            focus: QuizFocus::Options,
            option_cursor: 0,
            marker_cursor: 0,
            pending_advance: None,
            advance_delay: config.advance_delay,
            extractor,
            author,
            export_dir: config.export_dir,
            export_file_name: config.export_file_name,
            notifications: NotificationManager::new(),
            help_popup: None,
            quiz_hits: QuizHitAreas::default(),
        }
    }

    // =============================================================================
    // STATE ACCESSORS
    // =============================================================================

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn quiz(&self) -> Option<&QuizState> {
        self.quiz.as_ref()
    }

    pub fn loaded_document(&self) -> Option<&Path> {
        self.loaded_document.as_deref()
    }

    pub fn library(&self) -> &DocumentLibrary {
        &self.library
    }

    pub fn picker_cursor(&self) -> usize {
        self.picker.cursor()
    }

    pub fn focus(&self) -> QuizFocus {
        self.focus
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn marker_cursor(&self) -> usize {
        self.marker_cursor
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    pub fn is_help_open(&self) -> bool {
        self.help_popup.is_some()
    }

    /// Where the next export will be written.
    pub fn export_target(&self) -> PathBuf {
        let extension = self
            .author
            .as_ref()
            .map(|author| author.extension())
            .unwrap_or("docx");
        self.export_dir
            .join(export_file_name(&self.export_file_name, extension))
    }

    // =============================================================================
    // HIGH-LEVEL APPLICATION ACTIONS
    // =============================================================================

    /// Loads `path` into a fresh quiz. On failure the current quiz, if any,
    /// stays exactly as it was.
    pub fn open_document(&mut self, path: &Path) -> bool {
        match load_quiz(self.extractor.as_ref(), path) {
            Ok(state) => {
                let name = display_name(path);
                self.notifications
                    .info(format!("Loaded {} questions from {name}", state.len()));
                self.quiz = Some(state);
                self.loaded_document = Some(path.to_path_buf());
                self.pending_advance = None;
                self.focus = QuizFocus::Options;
                self.marker_cursor = 0;
                self.sync_option_cursor();
                self.screen = Screen::Quiz;
                if let Some(index) = self.library.find_index_by_path(path) {
                    self.picker.set_cursor(index, self.library.len());
                }
                true
            }
            Err(e) => {
                error!("Failed to load {}: {e}", path.display());
                self.notifications.error(e.to_string());
                false
            }
        }
    }

    pub fn open_selected_document(&mut self) -> bool {
        let Some(path) = self
            .library
            .get(self.picker.cursor())
            .map(|doc| doc.path.clone())
        else {
            self.notifications.warn("No document selected");
            return false;
        };
        self.open_document(&path)
    }

    pub fn refresh_library(&mut self) {
        self.library.refresh();
        self.picker
            .set_cursor(self.picker.cursor(), self.library.len());
        self.notifications
            .info(format!("{} documents found", self.library.len()));
    }

    pub fn show_picker(&mut self) {
        self.pending_advance = None;
        self.screen = Screen::Picker;
    }

    /// Records option `option` for the current question and schedules the
    /// delayed move to the next one.
    pub fn select_option(&mut self, option: usize) -> bool {
        self.select_option_at(option, Instant::now())
    }

    pub fn select_option_at(&mut self, option: usize, now: Instant) -> bool {
        let Some(state) = self.quiz.as_mut() else {
            return false;
        };
        let current = state.current_index();
        let Some(answer) = state.current_question().options.get(option).cloned() else {
            return false;
        };

        if let Err(e) = state.select_answer(current, answer) {
            error!("Failed to record answer: {e}");
            return false;
        }
        self.option_cursor = option;

        if state.has_next() {
            self.pending_advance = Some(PendingAdvance {
                from_index: current,
                due: now + self.advance_delay,
            });
        }
        true
    }

    /// Expires notifications and runs a due auto-advance. Returns whether
    /// anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.notifications.update_at(now);

        if let Some(pending) = self.pending_advance
            && now >= pending.due
        {
            self.pending_advance = None;
            let moved = self
                .quiz
                .as_mut()
                .is_some_and(|state| state.advance_after_selection(pending.from_index));
            if moved {
                self.sync_option_cursor();
                changed = true;
            }
        }

        changed
    }

    pub fn previous_question(&mut self) -> bool {
        self.pending_advance = None;
        let moved = self.quiz.as_mut().is_some_and(QuizState::previous);
        if moved {
            self.sync_option_cursor();
        }
        moved
    }

    pub fn next_question(&mut self) -> bool {
        self.pending_advance = None;
        let moved = self.quiz.as_mut().is_some_and(QuizState::next);
        if moved {
            self.sync_option_cursor();
        }
        moved
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        let Some(state) = self.quiz.as_mut() else {
            return false;
        };
        if let Err(e) = state.go_to(index) {
            warn!("Ignoring jump: {e}");
            return false;
        }
        self.pending_advance = None;
        self.marker_cursor = index;
        self.sync_option_cursor();
        true
    }

    pub fn change_nav_page(&mut self, direction: PageDirection) -> bool {
        let Some(state) = self.quiz.as_mut() else {
            return false;
        };
        if !state.change_nav_page(direction) {
            return false;
        }
        self.marker_cursor = pagination::page_range(state.nav_page(), state.len()).start;
        true
    }

    /// Exports the selections. Every outcome is reported as a notification.
    pub fn export(&mut self) -> Option<PathBuf> {
        let target = self.export_target();
        match QuizExporter::export(self.quiz.as_ref(), self.author.as_deref(), &target) {
            Ok(path) => {
                self.notifications
                    .info(format!("Exported answers to {}", path.display()));
                Some(path)
            }
            Err(e @ ExportError::NoQuestions) => {
                warn!("Export refused: {e}");
                self.notifications.warn(e.to_string());
                None
            }
            Err(e) => {
                error!("Export failed: {e}");
                self.notifications.error(e.to_string());
                None
            }
        }
    }

    fn sync_option_cursor(&mut self) {
        self.option_cursor = self
            .quiz
            .as_ref()
            .map(QuizView::project)
            .and_then(|view| view.selected_option())
            .unwrap_or(0);
    }

    fn current_option_count(&self) -> usize {
        self.quiz
            .as_ref()
            .map_or(0, |state| state.current_question().option_count())
    }

    // =============================================================================
    // INPUT
    // =============================================================================

    pub fn handle_event(&mut self, event: Event) -> Option<AppAction> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                None
            }
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if let Some(popup) = self.help_popup.as_mut() {
            if let Some(HelpPopupAction::Close) = popup.handle_key(key) {
                self.help_popup = None;
            }
            return None;
        }

        if key.code == KeyCode::Char('?') {
            self.help_popup = Some(HelpPopup::new());
            return None;
        }

        match self.screen {
            Screen::Picker => self.handle_picker_key(key),
            Screen::Quiz if self.quiz.is_none() => self.handle_picker_key(key),
            Screen::Quiz => match self.focus {
                QuizFocus::Options => self.handle_options_key(key),
                QuizFocus::Markers => self.handle_markers_key(key),
            },
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Char('q') => return Some(AppAction::Quit),
            KeyCode::Char('j') | KeyCode::Down => self.picker.move_down(self.library.len()),
            KeyCode::Char('k') | KeyCode::Up => self.picker.move_up(),
            KeyCode::Enter => {
                self.open_selected_document();
            }
            KeyCode::Char('r') => self.refresh_library(),
            KeyCode::Esc => {
                if self.quiz.is_some() {
                    self.screen = Screen::Quiz;
                }
            }
            _ => {}
        }
        None
    }

    fn handle_options_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Char('q') => return Some(AppAction::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.option_cursor + 1 < self.current_option_count() {
                    self.option_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.option_cursor = self.option_cursor.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.select_option(self.option_cursor);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let option = c as usize - '1' as usize;
                self.select_option(option);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.previous_question();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.next_question();
            }
            KeyCode::Char('[') => {
                self.change_nav_page(PageDirection::Previous);
            }
            KeyCode::Char(']') => {
                self.change_nav_page(PageDirection::Next);
            }
            KeyCode::Tab => self.focus_markers(),
            KeyCode::Char('e') => {
                self.export();
            }
            KeyCode::Char('o') => self.show_picker(),
            KeyCode::Esc => {
                self.notifications.dismiss_current();
            }
            _ => {}
        }
        None
    }

    fn focus_markers(&mut self) {
        let Some(state) = self.quiz.as_ref() else {
            return;
        };
        let range = pagination::page_range(state.nav_page(), state.len());
        self.marker_cursor = if range.contains(&state.current_index()) {
            state.current_index()
        } else {
            range.start
        };
        self.focus = QuizFocus::Markers;
    }

    fn handle_markers_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        let Some(state) = self.quiz.as_ref() else {
            return None;
        };
        let range = pagination::page_range(state.nav_page(), state.len());

        match key.code {
            KeyCode::Char('q') => return Some(AppAction::Quit),
            KeyCode::Char('h') | KeyCode::Left => {
                if self.marker_cursor > range.start {
                    self.marker_cursor -= 1;
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.marker_cursor + 1 < range.end {
                    self.marker_cursor += 1;
                }
            }
            KeyCode::Char('[') => {
                self.change_nav_page(PageDirection::Previous);
            }
            KeyCode::Char(']') => {
                self.change_nav_page(PageDirection::Next);
            }
            KeyCode::Enter => {
                if self.jump_to(self.marker_cursor) {
                    self.focus = QuizFocus::Options;
                }
            }
            KeyCode::Tab | KeyCode::Esc => self.focus = QuizFocus::Options,
            _ => {}
        }
        None
    }

    /// Left clicks act on whatever the last draw put under the pointer.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.help_popup.is_some() {
            return;
        }

        match self.screen {
            Screen::Picker => {
                if let Some(index) = self.picker.index_at(mouse.column, mouse.row) {
                    self.picker.set_cursor(index, self.library.len());
                    self.open_selected_document();
                }
            }
            Screen::Quiz => match self.quiz_hits.hit(mouse.column, mouse.row) {
                Some(QuizHit::Option(option)) => {
                    self.focus = QuizFocus::Options;
                    self.select_option(option);
                }
                Some(QuizHit::Marker(index)) => {
                    self.jump_to(index);
                }
                Some(QuizHit::PreviousPage) => {
                    self.change_nav_page(PageDirection::Previous);
                }
                Some(QuizHit::NextPage) => {
                    self.change_nav_page(PageDirection::Next);
                }
                None => {}
            },
        }
    }

    // =============================================================================
    // RENDERING
    // =============================================================================

    pub fn draw(&mut self, f: &mut Frame) {
        let palette = current_theme();
        let area = f.area();
        f.render_widget(Block::default().style(Style::default().bg(palette.base_00)), area);

        match (self.screen, self.quiz.as_ref()) {
            (Screen::Quiz, Some(state)) => {
                let view = QuizView::project(state);
                let document_name = self
                    .loaded_document
                    .as_deref()
                    .map(display_name)
                    .unwrap_or_default();
                self.quiz_hits = quiz_panel::render(
                    f,
                    area,
                    &view,
                    QuizPanelState {
                        document_name: &document_name,
                        option_cursor: self.option_cursor,
                        marker_cursor: (self.focus == QuizFocus::Markers)
                            .then_some(self.marker_cursor),
                        markers_focused: self.focus == QuizFocus::Markers,
                    },
                );
            }
            _ => {
                self.quiz_hits = QuizHitAreas::default();
                self.picker.render(f, area, &self.library);
            }
        }

        if let Some(popup) = self.help_popup.as_ref() {
            popup.render(f, area);
        }

        if let Some(notification) = self.notifications.current() {
            hud_message::render(f, area, notification, palette);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn run_app_with_event_source<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    terminal.draw(|f| app.draw(f))?;

    loop {
        let mut events_processed = 0;
        let mut should_quit = false;

        while events_processed < 50 && event_source.poll(Duration::from_millis(0))? {
            let event = event_source.read()?;
            events_processed += 1;

            app.tick(Instant::now());
            if app.handle_event(event) == Some(AppAction::Quit) {
                should_quit = true;
                break;
            }
        }

        let mut needs_redraw = events_processed > 0;

        if last_tick.elapsed() >= tick_rate || app.has_pending_advance() {
            if app.tick(Instant::now()) {
                needs_redraw = true;
            }
            last_tick = Instant::now();
        }

        if needs_redraw {
            terminal.draw(|f| app.draw(f))?;
        }

        if should_quit {
            info!("Quit requested");
            return Ok(());
        }

        // If no events were processed, wait a bit to avoid busy-waiting
        if events_processed == 0 {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));
            let _ = event_source.poll(timeout);
        }
    }
}
