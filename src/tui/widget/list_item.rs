//! One row of the list: a toggle control, the record text, a delete control
//! and an inline editor that opens on double-click.
//!
//! The controller never touches the store. It reports what happened as an
//! [`ItemEvent`] tagged with the record id and the host applies it, then
//! rebuilds rows from a fresh filtered query.

use std::time::{Duration, Instant};

use super::clickable::{Clickable, Visual};
use super::pointer::{Bounds, FrameInput};
use super::text_input::{TextInput, TextSignal};
use crate::model::{Record, RecordId};

/// Two primary clicks on the same row closer than this open the editor
pub const DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(300);

/// Width of the toggle and delete hit areas
const CONTROL_WIDTH: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemMode {
    #[default]
    Viewing,
    Editing,
}

/// Something the host has to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Toggle(RecordId),
    Delete(RecordId),
    /// Commit with already-trimmed, non-empty text
    Rename { id: RecordId, text: String },
    /// The editor just took focus; the host must drop focus elsewhere
    EditStarted(RecordId),
    /// Esc, or Enter on a cut-down draft that was never touched
    EditCancelled(RecordId),
    /// Submit with a blank draft; the row stays in edit mode
    EmptyRejected(RecordId),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemEditState {
    pub mode: ItemMode,
    pub last_click: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct ListItemController {
    record: Record,
    bounds: Bounds,
    hovered: bool,
    edit: ItemEditState,
    editor: TextInput,
    /// The draft as opened, when the record was longer than the editor allows
    cut_draft: Option<String>,
    toggle: Clickable<ItemEvent>,
    delete: Clickable<ItemEvent>,
}

impl ListItemController {
    pub fn new(record: Record, bounds: Bounds, max_length: usize) -> Self {
        let id = record.id.clone();
        let mut item = ListItemController {
            record,
            bounds,
            hovered: false,
            edit: ItemEditState::default(),
            editor: TextInput::new(Bounds::EMPTY, max_length),
            cut_draft: None,
            toggle: Clickable::new(Bounds::EMPTY, ItemEvent::Toggle(id.clone())),
            delete: Clickable::new(Bounds::EMPTY, ItemEvent::Delete(id)),
        };
        item.layout();
        item
    }

    fn layout(&mut self) {
        let b = self.bounds;
        if b.is_empty() {
            self.toggle.set_bounds(Bounds::EMPTY);
            self.delete.set_bounds(Bounds::EMPTY);
            self.editor.set_bounds(Bounds::EMPTY);
            return;
        }
        self.toggle
            .set_bounds(Bounds::new(b.x + 1, b.y, CONTROL_WIDTH, b.h));
        self.delete.set_bounds(Bounds::new(
            b.right() - CONTROL_WIDTH - 1,
            b.y,
            CONTROL_WIDTH,
            b.h,
        ));
        self.editor.set_bounds(self.text_bounds());
    }

    /// Area between the two controls where the text (or editor) lives
    pub fn text_bounds(&self) -> Bounds {
        let b = self.bounds;
        let x = b.x + CONTROL_WIDTH + 2;
        let w = (b.w - 2 * (CONTROL_WIDTH + 2)).max(0);
        Bounds::new(x, b.y, w, b.h)
    }

    /// Advance one tick
    pub fn update(&mut self, input: &FrameInput) -> Option<ItemEvent> {
        self.hovered = self.bounds.contains(input.pointer.position);
        match self.edit.mode {
            ItemMode::Viewing => self.update_viewing(input),
            ItemMode::Editing => self.update_editing(input),
        }
    }

    fn update_viewing(&mut self, input: &FrameInput) -> Option<ItemEvent> {
        let pointer = &input.pointer;
        let toggled = self.toggle.update(pointer);
        let deleted = self.delete.update(pointer);
        if toggled.is_some() || deleted.is_some() {
            return toggled.or(deleted);
        }

        let on_control = self.toggle.bounds().contains(pointer.position)
            || self.delete.bounds().contains(pointer.position);
        if !pointer.pressed_in(self.bounds) || on_control {
            return None;
        }

        if let Some(last) = self.edit.last_click
            && input.now.saturating_duration_since(last) < DOUBLE_CLICK_THRESHOLD
        {
            self.begin_edit(input.now);
            return Some(ItemEvent::EditStarted(self.record.id.clone()));
        }
        self.edit.last_click = Some(input.now);
        None
    }

    fn update_editing(&mut self, input: &FrameInput) -> Option<ItemEvent> {
        let id = self.record.id.clone();
        match self.editor.update(input)? {
            TextSignal::Submit => {
                if self.cut_draft.as_deref() == Some(self.editor.text()) {
                    // Committing would drop the tail the editor never held
                    self.finish_edit();
                    return Some(ItemEvent::EditCancelled(id));
                }
                let text = self.editor.text().trim();
                if text.is_empty() {
                    return Some(ItemEvent::EmptyRejected(id));
                }
                let text = text.to_string();
                self.finish_edit();
                Some(ItemEvent::Rename { id, text })
            }
            TextSignal::Cancel => {
                self.finish_edit();
                Some(ItemEvent::EditCancelled(id))
            }
        }
    }

    /// Enter edit mode with a fresh draft of the record's text
    pub fn begin_edit(&mut self, now: Instant) {
        self.edit.mode = ItemMode::Editing;
        self.edit.last_click = None;
        self.editor.set_text(&self.record.text);
        self.cut_draft = (self.editor.text() != self.record.text)
            .then(|| self.editor.text().to_string());
        self.editor.set_focus(true, now);
        self.toggle.reset();
        self.delete.reset();
    }

    /// Leave edit mode, discarding the draft
    pub fn cancel_edit(&mut self) {
        if self.edit.mode == ItemMode::Editing {
            self.finish_edit();
        }
    }

    fn finish_edit(&mut self) {
        self.edit.mode = ItemMode::Viewing;
        self.cut_draft = None;
        self.editor.clear();
        self.editor.set_focus(false, Instant::now());
    }

    /// Refresh the record snapshot after a store query. An open draft is
    /// left alone.
    pub fn set_record(&mut self, record: Record) {
        self.record = record;
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        if bounds.is_empty() {
            self.hovered = false;
        }
        self.layout();
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn mode(&self) -> ItemMode {
        self.edit.mode
    }

    pub fn is_editing(&self) -> bool {
        self.edit.mode == ItemMode::Editing
    }

    pub fn editor(&self) -> &TextInput {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut TextInput {
        &mut self.editor
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn toggle_bounds(&self) -> Bounds {
        self.toggle.bounds()
    }

    pub fn delete_bounds(&self) -> Bounds {
        self.delete.bounds()
    }

    pub fn toggle_visual(&self) -> Visual {
        self.toggle.visual()
    }

    pub fn delete_visual(&self) -> Visual {
        self.delete.visual()
    }
}
