use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::store_io::StoreError;
use crate::model::{AppConfig, FILTERS, Filter, RecordCounts, RecordId};
use crate::ops::store::{FileStore, RecordStore};

use super::input::{self, HostInput};
use super::render;
use super::theme::Theme;
use super::widget::{
    Bounds, CellMeasure, Clickable, FrameInput, ItemEvent, Key, KeyInput, ListItemController,
    Measure, PointerSample, PointerState, TextInput, TextSignal,
};

/// How long a notification stays up unless dismissed
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

pub const EMPTY_TEXT_MESSAGE: &str = "Todo text cannot be empty";
pub const TITLE: &str = "Todo List";
pub const ADD_PLACEHOLDER: &str = "Add a new todo...";
pub const ADD_LABEL: &str = "Add";
pub const CLEAR_LABEL: &str = "Clear completed";

/// Idle wake-up so the caret blinks and notifications expire without input
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Rows taken by the title line and the bordered add-input
const HEADER_HEIGHT: i32 = 4;

/// Actions carried by the app-level clickables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Add,
    SetFilter(Filter),
    ClearCompleted,
    DismissNotice,
}

/// A transient message on the notification line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub shown_at: Instant,
}

/// Which text input owns the keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
enum FocusTarget {
    None,
    AddInput,
    Row(RecordId),
}

/// Screen regions, recomputed on resize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Regions {
    pub screen: Bounds,
    pub title: Bounds,
    pub notice: Bounds,
    pub list: Bounds,
    pub footer: Bounds,
}

impl Regions {
    pub fn compute(w: i32, h: i32) -> Self {
        let w = w.max(0);
        let h = h.max(0);
        Regions {
            screen: Bounds::new(0, 0, w, h),
            title: Bounds::new(0, 0, w, h.min(1)),
            notice: Bounds::new(0, HEADER_HEIGHT, w, 1),
            list: Bounds::new(0, HEADER_HEIGHT + 1, w, (h - HEADER_HEIGHT - 2).max(0)),
            footer: Bounds::new(0, (h - 1).max(0), w, 1),
        }
    }
}

/// Main application state. Generic over the store so tests can run against
/// an in-memory [`RecordList`](crate::model::RecordList).
pub struct App<S: RecordStore = FileStore> {
    pub store: S,
    pub theme: Theme,
    pub filter: Filter,
    pub add_input: TextInput,
    pub add_button: Clickable<UiAction>,
    /// One per entry of `FILTERS`, same order
    pub filter_buttons: Vec<Clickable<UiAction>>,
    pub clear_button: Clickable<UiAction>,
    pub notice_button: Clickable<UiAction>,
    pub notice: Option<Notice>,
    /// One controller per record in the current filtered snapshot
    pub rows: Vec<ListItemController>,
    /// Index of the first visible row
    pub scroll: usize,
    pub regions: Regions,
    pub should_quit: bool,
    pointer: PointerState,
    max_length: usize,
}

impl<S: RecordStore> App<S> {
    pub fn new(store: S, config: &AppConfig, width: u16, height: u16) -> Self {
        let filter_buttons = FILTERS
            .iter()
            .map(|(filter, _)| Clickable::new(Bounds::EMPTY, UiAction::SetFilter(*filter)))
            .collect();

        let mut app = App {
            store,
            theme: Theme::from_config(&config.ui),
            filter: Filter::All,
            add_input: TextInput::new(Bounds::EMPTY, config.max_length)
                .with_placeholder(ADD_PLACEHOLDER)
                .with_padding(2),
            add_button: Clickable::new(Bounds::EMPTY, UiAction::Add),
            filter_buttons,
            clear_button: Clickable::new(Bounds::EMPTY, UiAction::ClearCompleted),
            notice_button: Clickable::new(Bounds::EMPTY, UiAction::DismissNotice),
            notice: None,
            rows: Vec::new(),
            scroll: 0,
            regions: Regions::default(),
            should_quit: false,
            pointer: PointerState::default(),
            max_length: config.max_length,
        };
        app.refresh_rows();
        app.resize(width, height);
        app
    }

    pub fn counts(&self) -> RecordCounts {
        self.store.counts()
    }

    /// Recompute every widget's bounds for a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        let (w, h) = (width as i32, height as i32);
        self.regions = Regions::compute(w, h);

        let add_w = button_width(ADD_LABEL) + 2;
        self.add_input
            .set_bounds(Bounds::new(1, 1, (w - add_w - 3).max(0), 3));
        self.add_button
            .set_bounds(Bounds::new((w - add_w - 1).max(0), 1, add_w, 3));

        let footer = self.regions.footer;
        let mut x = footer.x + 1;
        for (button, (_, label)) in self.filter_buttons.iter_mut().zip(FILTERS) {
            let bw = button_width(label);
            button.set_bounds(Bounds::new(x, footer.y, bw, footer.h));
            x += bw + 1;
        }
        self.clear_button.set_bounds(Bounds::new(
            x + 1,
            footer.y,
            button_width(CLEAR_LABEL),
            footer.h,
        ));

        self.layout_notice();
        self.clamp_scroll();
        self.layout_rows();
    }

    /// Advance every widget by one tick. Order: pointer sampling, focus
    /// routing, widget updates, then the store mutations they asked for.
    pub fn tick(&mut self, sample: PointerSample, keys: Vec<KeyInput>, scroll: i32, now: Instant) {
        self.pointer = self.pointer.advance(sample);
        let input = FrameInput {
            pointer: self.pointer,
            keys,
            now,
        };

        self.expire_notice(now);
        if scroll != 0 {
            self.scroll_by(scroll);
        }
        self.route_focus(&input);

        let add_signal = self.add_input.update(&input);
        let mut actions = Vec::new();
        actions.extend(self.add_button.update(&input.pointer));
        for button in &mut self.filter_buttons {
            actions.extend(button.update(&input.pointer));
        }
        actions.extend(self.clear_button.update(&input.pointer));
        actions.extend(self.notice_button.update(&input.pointer));
        let events: Vec<ItemEvent> = self
            .rows
            .iter_mut()
            .filter_map(|row| row.update(&input))
            .collect();

        let mut stale = false;
        match add_signal {
            Some(TextSignal::Submit) => stale |= self.submit_new(now),
            Some(TextSignal::Cancel) => self.focus(FocusTarget::None, now),
            None => {}
        }
        for action in actions {
            stale |= self.apply_action(action, now);
        }
        for event in events {
            stale |= self.apply_item_event(event, now);
        }
        if stale {
            self.refresh_rows();
        }
    }

    fn route_focus(&mut self, input: &FrameInput) {
        if input.keys.contains(&KeyInput::Key(Key::Tab)) {
            self.focus(FocusTarget::AddInput, input.now);
        }
        if !input.pointer.just_pressed {
            return;
        }
        let target = if self.add_input.focus_hit(&input.pointer) == Some(true) {
            FocusTarget::AddInput
        } else if let Some(row) = self
            .rows
            .iter()
            .find(|r| r.is_editing() && r.editor().focus_hit(&input.pointer) == Some(true))
        {
            FocusTarget::Row(row.id().clone())
        } else {
            FocusTarget::None
        };
        self.focus(target, input.now);
    }

    /// Give focus to exactly one input (or none)
    fn focus(&mut self, target: FocusTarget, now: Instant) {
        tracing::debug!(?target, "focus");
        self.add_input
            .set_focus(target == FocusTarget::AddInput, now);
        for row in &mut self.rows {
            let mine = matches!(&target, FocusTarget::Row(id) if id == row.id());
            let editing = row.is_editing();
            row.editor_mut().set_focus(mine && editing, now);
        }
    }

    /// Add the add-input's text as a new record. Returns whether rows are stale.
    fn submit_new(&mut self, now: Instant) -> bool {
        let text = self.add_input.text().to_string();
        let result = self.store.add(&text);
        if let Err(e) = &result
            && e.is_rejection()
        {
            tracing::debug!(error = %e, "rejected new todo");
            self.report(result, now);
            return false;
        }
        // A failed write still added the record in memory.
        self.report(result, now);
        self.add_input.clear();
        self.focus(FocusTarget::AddInput, now);
        true
    }

    fn apply_action(&mut self, action: UiAction, now: Instant) -> bool {
        match action {
            UiAction::Add => self.submit_new(now),
            UiAction::SetFilter(filter) => {
                if filter == self.filter {
                    return false;
                }
                tracing::debug!(?filter, "filter changed");
                self.filter = filter;
                self.scroll = 0;
                true
            }
            UiAction::ClearCompleted => {
                let result = self.store.clear_completed();
                self.report(result, now);
                true
            }
            UiAction::DismissNotice => {
                self.dismiss_notice();
                false
            }
        }
    }

    fn apply_item_event(&mut self, event: ItemEvent, now: Instant) -> bool {
        match event {
            ItemEvent::Toggle(id) => {
                let result = self.store.toggle(&id);
                self.report_stale(&id, result, now);
                true
            }
            ItemEvent::Delete(id) => {
                let result = self.store.delete(&id);
                self.report_stale(&id, result, now);
                true
            }
            ItemEvent::Rename { id, text } => {
                let result = self.store.rename(&id, &text);
                self.report_stale(&id, result, now);
                true
            }
            ItemEvent::EditStarted(id) => {
                for row in &mut self.rows {
                    if row.id() != &id {
                        row.cancel_edit();
                    }
                }
                self.focus(FocusTarget::Row(id), now);
                false
            }
            ItemEvent::EditCancelled(_) => false,
            ItemEvent::EmptyRejected(_) => {
                self.notify(EMPTY_TEXT_MESSAGE, now);
                false
            }
        }
    }

    fn report_stale(&mut self, id: &RecordId, result: Result<bool, StoreError>, now: Instant) {
        if self.report(result, now) == Some(false) {
            tracing::debug!(id = %id, "row refers to a record that is gone");
        }
    }

    /// Surface a store result. Success clears any notice; failures become one.
    fn report<T>(&mut self, result: Result<T, StoreError>, now: Instant) -> Option<T> {
        match result {
            Ok(value) => {
                self.dismiss_notice();
                Some(value)
            }
            Err(StoreError::EmptyText) => {
                self.notify(EMPTY_TEXT_MESSAGE, now);
                None
            }
            Err(StoreError::TooLong { max }) => {
                self.notify(&format!("Todo text cannot be longer than {max} characters"), now);
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "store mutation failed");
                self.notify(&format!("Failed to save: {e}"), now);
                None
            }
        }
    }

    pub fn notify(&mut self, message: &str, now: Instant) {
        self.notice = Some(Notice {
            message: message.to_string(),
            shown_at: now,
        });
        self.layout_notice();
    }

    pub fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.layout_notice();
        }
    }

    fn expire_notice(&mut self, now: Instant) {
        if let Some(notice) = &self.notice
            && now.saturating_duration_since(notice.shown_at) >= NOTICE_TTL
        {
            self.dismiss_notice();
        }
    }

    fn layout_notice(&mut self) {
        let bounds = if self.notice.is_some() {
            self.regions.notice
        } else {
            Bounds::EMPTY
        };
        self.notice_button.set_bounds(bounds);
    }

    /// Rebuild rows from a fresh filtered query. Controllers are matched by
    /// record id so an open editor survives as long as its record does.
    pub fn refresh_rows(&mut self) {
        let records = self.store.list_filtered(self.filter);
        let mut previous: HashMap<RecordId, ListItemController> = self
            .rows
            .drain(..)
            .map(|row| (row.id().clone(), row))
            .collect();
        let max_length = self.max_length;
        self.rows = records
            .into_iter()
            .map(|record| match previous.remove(&record.id) {
                Some(mut row) => {
                    row.set_record(record);
                    row
                }
                None => ListItemController::new(record, Bounds::EMPTY, max_length),
            })
            .collect();

        self.clear_button
            .set_enabled(self.store.counts().completed > 0);
        self.clamp_scroll();
        self.layout_rows();
    }

    /// Number of rows that fit in the list region
    pub fn visible_rows(&self) -> usize {
        self.regions.list.h.max(0) as usize
    }

    fn max_scroll(&self) -> usize {
        self.rows.len().saturating_sub(self.visible_rows())
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = self.scroll as i64 + delta as i64;
        self.scroll = target.clamp(0, self.max_scroll() as i64) as usize;
        self.layout_rows();
    }

    fn layout_rows(&mut self) {
        let list = self.regions.list;
        let scroll = self.scroll;
        for (i, row) in self.rows.iter_mut().enumerate() {
            let bounds = match i.checked_sub(scroll) {
                Some(offset) if (offset as i32) < list.h => {
                    Bounds::new(list.x, list.y + offset as i32, list.w, 1)
                }
                _ => Bounds::EMPTY,
            };
            row.set_bounds(bounds);
        }
    }
}

/// Cell width of a one-line button: its label plus a space each side
pub fn button_width(label: &str) -> i32 {
    CellMeasure.width(label) + 2
}

/// Run the TUI application
pub fn run(config: &AppConfig, data_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(data_file)?.with_max_length(config.max_length);
    tracing::info!(path = %data_file.display(), "starting tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    let mut app = App::new(store, config, size.width, size.height);

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    tracing::info!("tui exited");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sample = PointerSample::default();
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            match input::translate(event::read()?, sample) {
                HostInput::Quit => app.should_quit = true,
                HostInput::Keys(keys) => app.tick(sample, keys, 0, Instant::now()),
                HostInput::Pointer {
                    sample: next,
                    scroll,
                } => {
                    sample = next;
                    app.tick(sample, Vec::new(), scroll, Instant::now());
                }
                HostInput::Resize(w, h) => app.resize(w, h),
                HostInput::Ignore => {}
            }
        } else {
            app.tick(sample, Vec::new(), 0, Instant::now());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
