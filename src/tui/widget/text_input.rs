//! Single-line text input: a cursor-aware character buffer, the horizontal
//! viewport that keeps the cursor on screen, and a focus-gated widget that
//! applies the tick's key events to the buffer.
//!
//! Cursor positions are character indices, not byte offsets.

use std::time::{Duration, Instant};

use super::measure::Measure;
use super::pointer::{Bounds, FrameInput, Key, KeyInput, PointerState};
use crate::util::unicode;

/// Caret blink period
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Cursor-aware text buffer.
///
/// Invariants: `cursor <= len()` and `len() <= max_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    cursor: usize,
    max_length: usize,
}

impl TextBuffer {
    pub fn new(max_length: usize) -> Self {
        TextBuffer {
            content: String::new(),
            cursor: 0,
            max_length,
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn cursor_byte(&self) -> usize {
        unicode::char_to_byte(&self.content, self.cursor)
    }

    /// Insert at the cursor. Control characters and inserts into a full
    /// buffer are ignored. Returns whether anything changed.
    pub fn insert(&mut self, c: char) -> bool {
        if c.is_control() || self.len() >= self.max_length {
            return false;
        }
        let at = self.cursor_byte();
        self.content.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Remove the character before the cursor
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.cursor_byte();
        self.content.remove(at);
        true
    }

    /// Remove the character at the cursor
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.cursor_byte();
        self.content.remove(at);
        true
    }

    /// Move by `delta` characters, clamped to the buffer
    pub fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, self.len() as isize) as usize;
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.len();
    }

    /// Replace the content (cut to `max_length` characters) and put the
    /// cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.content = text.chars().take(self.max_length).collect();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// The visible window of the content for a text area `width` units wide.
    ///
    /// Picks the smallest start index (never past the cursor) at which both
    /// the rest of the content and the span up to the cursor fit. If the
    /// rest never fits, the start is the smallest one at which the cursor
    /// fits and the tail is cut character by character until it fits.
    pub fn viewport(&self, measure: &dyn Measure, width: i32) -> ViewportWindow {
        let width = width.max(0);
        let len = self.len();
        let cursor = self.cursor;
        let span_width = |from: usize, to: usize| {
            measure.width(unicode::char_slice(&self.content, from, to))
        };

        let start = (0..=cursor)
            .find(|&s| span_width(s, len) <= width && span_width(s, cursor) <= width)
            .or_else(|| (0..=cursor).find(|&s| span_width(s, cursor) <= width))
            .unwrap_or(cursor);

        let mut end = len;
        while end > cursor && span_width(start, end) > width {
            end -= 1;
        }

        ViewportWindow {
            start,
            end,
            caret_offset: span_width(start, cursor),
        }
    }
}

/// Visible slice of a [`TextBuffer`], recomputed on every draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportWindow {
    /// First visible character index
    pub start: usize,
    /// One past the last visible character index
    pub end: usize,
    /// Caret position measured from the left edge of the window
    pub caret_offset: i32,
}

impl ViewportWindow {
    pub fn slice<'a>(&self, content: &'a str) -> &'a str {
        unicode::char_slice(content, self.start, self.end)
    }
}

/// Caret blink timer. Display state only; never touches the buffer.
#[derive(Debug, Clone, Copy)]
pub struct CursorBlink {
    visible: bool,
    last_toggle: Option<Instant>,
}

impl Default for CursorBlink {
    fn default() -> Self {
        CursorBlink {
            visible: true,
            last_toggle: None,
        }
    }
}

impl CursorBlink {
    pub fn tick(&mut self, now: Instant) {
        match self.last_toggle {
            None => self.last_toggle = Some(now),
            Some(last) if now.saturating_duration_since(last) >= BLINK_INTERVAL => {
                self.visible = !self.visible;
                self.last_toggle = Some(now);
            }
            Some(_) => {}
        }
    }

    /// Show the caret and restart the period
    pub fn reset(&mut self, now: Instant) {
        self.visible = true;
        self.last_toggle = Some(now);
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

/// Signals a text input raises for its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSignal {
    Submit,
    Cancel,
}

/// Focusable single-line input widget.
///
/// Focus is granted and revoked by the host, which guarantees that at most
/// one input is focused. Unfocused inputs ignore keys.
#[derive(Debug, Clone)]
pub struct TextInput {
    buffer: TextBuffer,
    bounds: Bounds,
    /// Horizontal inset between the bounds and the text area
    padding: i32,
    focused: bool,
    blink: CursorBlink,
    placeholder: String,
}

impl TextInput {
    pub fn new(bounds: Bounds, max_length: usize) -> Self {
        TextInput {
            buffer: TextBuffer::new(max_length),
            bounds,
            padding: 0,
            focused: false,
            blink: CursorBlink::default(),
            placeholder: String::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding.max(0);
        self
    }

    /// Apply this tick's keys. Returns the first submit/cancel signal;
    /// keys after it in the same tick are dropped.
    pub fn update(&mut self, input: &FrameInput) -> Option<TextSignal> {
        if !self.focused {
            return None;
        }
        self.blink.tick(input.now);

        for key in &input.keys {
            let edited = match *key {
                KeyInput::Char(c) => self.buffer.insert(c),
                KeyInput::Key(Key::Backspace) => self.buffer.delete_backward(),
                KeyInput::Key(Key::Delete) => self.buffer.delete_forward(),
                KeyInput::Key(Key::Left) => {
                    self.buffer.move_cursor(-1);
                    true
                }
                KeyInput::Key(Key::Right) => {
                    self.buffer.move_cursor(1);
                    true
                }
                KeyInput::Key(Key::Home) => {
                    self.buffer.move_to_start();
                    true
                }
                KeyInput::Key(Key::End) => {
                    self.buffer.move_to_end();
                    true
                }
                KeyInput::Key(Key::Enter) => return Some(TextSignal::Submit),
                KeyInput::Key(Key::Escape) => return Some(TextSignal::Cancel),
                KeyInput::Key(Key::Tab) => false,
            };
            // Keep the caret solid while the user is typing or moving.
            if edited {
                self.blink.reset(input.now);
            }
        }
        None
    }

    /// Whether a click this tick should give (`Some(true)`) or take away
    /// (`Some(false)`) focus. `None` when no click started this tick.
    pub fn focus_hit(&self, pointer: &PointerState) -> Option<bool> {
        pointer
            .just_pressed
            .then(|| self.bounds.contains(pointer.position))
    }

    pub fn set_focus(&mut self, focused: bool, now: Instant) {
        if focused && !self.focused {
            self.blink.reset(now);
        }
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Caret drawn this frame
    pub fn caret_visible(&self) -> bool {
        self.focused && self.blink.visible()
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Placeholder is shown for an empty, unfocused input
    pub fn shows_placeholder(&self) -> bool {
        self.buffer.is_empty() && !self.focused && !self.placeholder.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Where text is drawn: inset by the padding, one row tall, vertically
    /// centered
    pub fn text_area(&self) -> Bounds {
        let b = self.bounds;
        Bounds::new(
            b.x + self.padding,
            b.y + b.h / 2,
            (b.w - 2 * self.padding).max(0),
            b.h.min(1),
        )
    }

    /// Viewport for the current text area. One unit is kept free at the
    /// right edge so a caret after the last character stays inside the area.
    pub fn viewport(&self, measure: &dyn Measure) -> ViewportWindow {
        let width = (self.text_area().w - 1).max(0);
        self.buffer.viewport(measure, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widget::measure::{CellMeasure, GlyphFace};
    use crate::tui::widget::pointer::PointerSample;

    fn buffer_with(text: &str) -> TextBuffer {
        let mut b = TextBuffer::new(100);
        b.set_text(text);
        b
    }

    // ── TextBuffer ─────────────────────────────────────────────────

    #[test]
    fn insert_at_cursor() {
        let mut b = buffer_with("held");
        b.move_cursor(-1);
        assert!(b.insert('l'));
        assert_eq!(b.text(), "helld");
        assert_eq!(b.cursor(), 4);
    }

    #[test]
    fn insert_then_backspace_restores() {
        let mut b = buffer_with("abc");
        b.move_cursor(-2);
        let before = b.clone();
        b.insert('x');
        b.delete_backward();
        assert_eq!(b, before);
    }

    #[test]
    fn control_characters_are_rejected() {
        let mut b = TextBuffer::new(10);
        assert!(!b.insert('\n'));
        assert!(!b.insert('\u{8}'));
        assert!(!b.insert('\t'));
        assert!(b.is_empty());
    }

    #[test]
    fn full_buffer_ignores_insert() {
        let mut b = TextBuffer::new(3);
        b.set_text("abc");
        b.move_cursor(-1);
        assert!(!b.insert('z'));
        assert_eq!(b.text(), "abc");
        assert_eq!(b.cursor(), 2);
    }

    #[test]
    fn set_text_respects_max_length() {
        let mut b = TextBuffer::new(4);
        b.set_text("abcdefg");
        assert_eq!(b.text(), "abcd");
        assert_eq!(b.cursor(), 4);
    }

    #[test]
    fn deletes_at_the_ends_are_no_ops() {
        let mut b = buffer_with("ab");
        assert!(!b.delete_forward());
        b.move_to_start();
        assert!(!b.delete_backward());
        assert_eq!(b.text(), "ab");
        assert!(b.delete_forward());
        assert_eq!(b.text(), "b");
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn move_cursor_clamps() {
        let mut b = buffer_with("abc");
        b.move_cursor(10);
        assert_eq!(b.cursor(), 3);
        b.move_cursor(-10);
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn multibyte_editing() {
        let mut b = buffer_with("你好");
        b.move_cursor(-1);
        b.insert('a');
        assert_eq!(b.text(), "你a好");
        b.delete_forward();
        assert_eq!(b.text(), "你a");
        b.delete_backward();
        assert_eq!(b.text(), "你");
        assert_eq!(b.cursor(), 1);
    }

    #[test]
    fn cursor_stays_in_bounds_for_mixed_sequence() {
        let mut b = TextBuffer::new(8);
        for i in 0..200usize {
            match (i * 7 + i / 3) % 6 {
                0 => {
                    b.insert('a');
                }
                1 => {
                    b.delete_backward();
                }
                2 => {
                    b.delete_forward();
                }
                3 => b.move_cursor(-3),
                4 => b.move_cursor(5),
                _ => {
                    b.insert('é');
                }
            }
            assert!(b.cursor() <= b.len());
            assert!(b.len() <= b.max_length());
        }
    }

    // ── viewport ───────────────────────────────────────────────────

    fn assert_window_fits(b: &TextBuffer, measure: &dyn Measure, width: i32) {
        let v = b.viewport(measure, width);
        assert!(measure.width(v.slice(b.text())) <= width);
        assert!(v.caret_offset <= width);
        assert!(v.start <= b.cursor() && b.cursor() <= v.end);
    }

    #[test]
    fn short_text_is_fully_visible() {
        let b = buffer_with("hello");
        let v = b.viewport(&CellMeasure, 20);
        assert_eq!((v.start, v.end), (0, 5));
        assert_eq!(v.caret_offset, 5);
    }

    #[test]
    fn typing_past_width_scrolls_left() {
        let b = buffer_with("abcdefghijklmnop");
        let v = b.viewport(&CellMeasure, 10);
        assert_eq!(v.slice(b.text()), "ghijklmnop");
        assert_eq!(v.caret_offset, 10);
    }

    #[test]
    fn cursor_at_start_truncates_tail() {
        let mut b = buffer_with("abcdefghijklmnop");
        b.move_to_start();
        let v = b.viewport(&CellMeasure, 10);
        assert_eq!(v.slice(b.text()), "abcdefghij");
        assert_eq!(v.caret_offset, 0);
    }

    #[test]
    fn cursor_in_middle_stays_visible() {
        let mut b = buffer_with("abcdefghijklmnopqrstuvwxyz");
        b.move_to_start();
        b.move_cursor(15);
        let v = b.viewport(&CellMeasure, 10);
        assert!(v.start <= 15 && 15 <= v.end);
        assert_eq!(v.slice(b.text()), "fghijklmno");
        assert_eq!(v.caret_offset, 10);
    }

    #[test]
    fn viewport_with_pixel_face() {
        let face = GlyphFace::FACE_7X13;
        let b = buffer_with("buy milk and eggs and bread");
        let v = b.viewport(&face, 70);
        assert_eq!(v.slice(b.text()), " and bread");
        assert_eq!(v.caret_offset, 70);
    }

    #[test]
    fn viewport_fits_for_every_cursor_and_width() {
        let texts = ["", "a", "hello world", "你好世界 mixed 文字 width", "abcdefghijklmnopqrstuvwxyz0123"];
        for text in texts {
            let mut b = buffer_with(text);
            for cursor in 0..=b.len() {
                b.move_to_start();
                b.move_cursor(cursor as isize);
                for width in 0..=32 {
                    assert_window_fits(&b, &CellMeasure, width);
                }
                for width in [0, 7, 30, 69, 70, 200] {
                    assert_window_fits(&b, &GlyphFace::FACE_7X13, width);
                }
            }
        }
    }

    // ── CursorBlink ────────────────────────────────────────────────

    #[test]
    fn blink_toggles_on_interval() {
        let t0 = Instant::now();
        let mut blink = CursorBlink::default();
        blink.tick(t0);
        assert!(blink.visible());
        blink.tick(t0 + Duration::from_millis(499));
        assert!(blink.visible());
        blink.tick(t0 + Duration::from_millis(500));
        assert!(!blink.visible());
        blink.reset(t0 + Duration::from_millis(600));
        assert!(blink.visible());
    }

    // ── TextInput ──────────────────────────────────────────────────

    fn focused_input() -> (TextInput, Instant) {
        let now = Instant::now();
        let mut input = TextInput::new(Bounds::new(0, 0, 30, 3), 100).with_padding(2);
        input.set_focus(true, now);
        (input, now)
    }

    fn frame(now: Instant) -> FrameInput {
        FrameInput::new(PointerState::default(), now)
    }

    #[test]
    fn unfocused_input_ignores_keys() {
        let now = Instant::now();
        let mut input = TextInput::new(Bounds::new(0, 0, 30, 3), 100);
        assert_eq!(input.update(&frame(now).typing("abc")), None);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn focused_input_applies_keys_in_order() {
        let (mut input, now) = focused_input();
        let keys = frame(now).typing("helo").with_keys([
            KeyInput::Key(Key::Left),
            KeyInput::Char('l'),
            KeyInput::Key(Key::End),
            KeyInput::Char('!'),
            KeyInput::Key(Key::Home),
            KeyInput::Key(Key::Delete),
        ]);
        assert_eq!(input.update(&keys), None);
        assert_eq!(input.text(), "ello!");
        assert_eq!(input.buffer().cursor(), 0);
    }

    #[test]
    fn enter_submits_and_drops_later_keys() {
        let (mut input, now) = focused_input();
        let keys = frame(now)
            .typing("ok")
            .with_keys([KeyInput::Key(Key::Enter), KeyInput::Char('x')]);
        assert_eq!(input.update(&keys), Some(TextSignal::Submit));
        assert_eq!(input.text(), "ok");
    }

    #[test]
    fn escape_cancels() {
        let (mut input, now) = focused_input();
        let keys = frame(now).with_keys([KeyInput::Key(Key::Escape)]);
        assert_eq!(input.update(&keys), Some(TextSignal::Cancel));
    }

    #[test]
    fn focus_hit_only_on_press_edge() {
        let input = TextInput::new(Bounds::new(0, 0, 30, 3), 100);
        let idle = PointerState::default();
        assert_eq!(input.focus_hit(&idle), None);
        let inside = idle.advance(PointerSample::at(5, 1, true));
        assert_eq!(input.focus_hit(&inside), Some(true));
        let outside = idle.advance(PointerSample::at(50, 1, true));
        assert_eq!(input.focus_hit(&outside), Some(false));
    }

    #[test]
    fn gaining_focus_shows_caret() {
        let t0 = Instant::now();
        let (mut input, _) = focused_input();
        input.update(&frame(t0));
        input.update(&frame(t0 + Duration::from_millis(600)));
        input.set_focus(false, t0);
        assert!(!input.caret_visible());
        input.set_focus(true, t0 + Duration::from_millis(700));
        assert!(input.caret_visible());
    }

    #[test]
    fn placeholder_only_when_empty_and_unfocused() {
        let now = Instant::now();
        let mut input = TextInput::new(Bounds::new(0, 0, 30, 3), 100).with_placeholder("Add a new todo...");
        assert!(input.shows_placeholder());
        input.set_focus(true, now);
        assert!(!input.shows_placeholder());
        input.set_focus(false, now);
        input.set_text("x");
        assert!(!input.shows_placeholder());
    }

    #[test]
    fn text_area_reserves_padding() {
        let input = TextInput::new(Bounds::new(1, 1, 30, 3), 100).with_padding(2);
        assert_eq!(input.text_area(), Bounds::new(3, 2, 26, 1));
        let mut long = input.clone();
        long.set_text(&"x".repeat(60));
        let v = long.viewport(&CellMeasure);
        assert_eq!(v.end - v.start, 25);
        assert_eq!(v.caret_offset, 25);
    }
}
