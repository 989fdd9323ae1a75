//! Translation of crossterm events into per-tick widget input.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::widget::{Key, KeyInput, Point, PointerSample};

/// What one terminal event means for the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostInput {
    Quit,
    /// Keys to deliver this tick, in order
    Keys(Vec<KeyInput>),
    /// New pointer sample, plus wheel movement in rows (negative is up)
    Pointer { sample: PointerSample, scroll: i32 },
    Resize(u16, u16),
    Ignore,
}

/// Translate one terminal event. `last` is the previous pointer sample; wheel
/// events keep its button state.
pub fn translate(event: Event, last: PointerSample) -> HostInput {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, last),
        Event::Paste(text) => translate_paste(&text),
        Event::Resize(w, h) => HostInput::Resize(w, h),
        _ => HostInput::Ignore,
    }
}

pub fn translate_key(key: KeyEvent) -> HostInput {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let input = match key.code {
        KeyCode::Char('c' | 'q') if ctrl => return HostInput::Quit,
        // Ctrl+A / Ctrl+E (macOS Cmd+Left/Right send these)
        KeyCode::Char('a') if ctrl => KeyInput::Key(Key::Home),
        KeyCode::Char('e') if ctrl => KeyInput::Key(Key::End),
        KeyCode::Char(_)
            if ctrl
                || key.modifiers.contains(KeyModifiers::ALT)
                || key.modifiers.contains(KeyModifiers::SUPER) =>
        {
            return HostInput::Ignore;
        }
        KeyCode::Char(c) => KeyInput::Char(c),
        KeyCode::Enter => KeyInput::Key(Key::Enter),
        KeyCode::Esc => KeyInput::Key(Key::Escape),
        KeyCode::Backspace => KeyInput::Key(Key::Backspace),
        KeyCode::Delete => KeyInput::Key(Key::Delete),
        KeyCode::Left => KeyInput::Key(Key::Left),
        KeyCode::Right => KeyInput::Key(Key::Right),
        KeyCode::Home => KeyInput::Key(Key::Home),
        KeyCode::End => KeyInput::Key(Key::End),
        KeyCode::Tab => KeyInput::Key(Key::Tab),
        _ => return HostInput::Ignore,
    };
    HostInput::Keys(vec![input])
}

pub fn translate_mouse(mouse: MouseEvent, last: PointerSample) -> HostInput {
    let (primary_down, scroll) = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            (true, 0)
        }
        MouseEventKind::Up(MouseButton::Left) | MouseEventKind::Moved => (false, 0),
        MouseEventKind::ScrollUp => (last.primary_down, -1),
        MouseEventKind::ScrollDown => (last.primary_down, 1),
        _ => return HostInput::Ignore,
    };
    HostInput::Pointer {
        sample: PointerSample {
            position: Point::new(mouse.column as i32, mouse.row as i32),
            primary_down,
        },
        scroll,
    }
}

/// Bracketed paste: single-line inputs get newlines as spaces
fn translate_paste(text: &str) -> HostInput {
    let keys: Vec<KeyInput> = text
        .chars()
        .filter(|&c| c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .map(KeyInput::Char)
        .collect();
    if keys.is_empty() {
        HostInput::Ignore
    } else {
        HostInput::Keys(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn ctrl_c_and_ctrl_q_quit() {
        assert_eq!(
            translate_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            HostInput::Quit
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            HostInput::Quit
        );
        // Plain q is just a character
        assert_eq!(
            translate_key(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            HostInput::Keys(vec![KeyInput::Char('q')])
        );
    }

    #[test]
    fn emacs_line_motion() {
        assert_eq!(
            translate_key(key(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            HostInput::Keys(vec![KeyInput::Key(Key::Home)])
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            HostInput::Keys(vec![KeyInput::Key(Key::End)])
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('x'), KeyModifiers::ALT)),
            HostInput::Ignore
        );
    }

    #[test]
    fn shifted_chars_pass_through() {
        assert_eq!(
            translate_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            HostInput::Keys(vec![KeyInput::Char('A')])
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut release = key(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(
            translate(Event::Key(release), PointerSample::default()),
            HostInput::Ignore
        );
    }

    #[test]
    fn mouse_buttons_map_to_samples() {
        let last = PointerSample::default();
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 4, 7), last),
            HostInput::Pointer {
                sample: PointerSample::at(4, 7, true),
                scroll: 0
            }
        );
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 4, 7), last),
            HostInput::Pointer {
                sample: PointerSample::at(4, 7, false),
                scroll: 0
            }
        );
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 4, 7), last),
            HostInput::Ignore
        );
    }

    #[test]
    fn wheel_keeps_button_state() {
        let held = PointerSample::at(1, 1, true);
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::ScrollDown, 2, 2), held),
            HostInput::Pointer {
                sample: PointerSample::at(2, 2, true),
                scroll: 1
            }
        );
    }

    #[test]
    fn paste_flattens_newlines() {
        assert_eq!(
            translate(Event::Paste("a\r\nb".into()), PointerSample::default()),
            HostInput::Keys(vec![
                KeyInput::Char('a'),
                KeyInput::Char(' '),
                KeyInput::Char('b')
            ])
        );
    }
}
