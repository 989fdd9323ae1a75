//! Hover / press / release-to-activate state machine shared by buttons,
//! checkboxes and row controls.
//!
//! Instead of owning a callback, a `Clickable` carries a tagged action value
//! (usually an enum variant holding a record id) and hands back a clone of it
//! when activated. The caller decides what the action means.

use super::pointer::{Bounds, PointerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

/// What the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Disabled,
    Normal,
    Hovered,
    Pressed,
}

#[derive(Debug, Clone)]
pub struct Clickable<A> {
    bounds: Bounds,
    state: ClickState,
    hovered: bool,
    enabled: bool,
    action: A,
}

impl<A: Clone> Clickable<A> {
    pub fn new(bounds: Bounds, action: A) -> Self {
        Clickable {
            bounds,
            state: ClickState::Idle,
            hovered: false,
            enabled: true,
            action,
        }
    }

    /// Advance one tick. The control becomes pressed whenever it is hovered
    /// with the button down, including a held button dragged in from
    /// outside. Returns the action when that press is released while still
    /// hovered; at most once per press.
    pub fn update(&mut self, pointer: &PointerState) -> Option<A> {
        if !self.enabled {
            self.reset();
            return None;
        }

        self.hovered = self.bounds.contains(pointer.position);

        if self.state == ClickState::Pressed {
            if pointer.primary_down {
                // Still held; dragging off only matters at release.
                return None;
            }
            self.state = self.resting_state();
            return self.hovered.then(|| self.action.clone());
        }

        self.state = if self.hovered && pointer.primary_down {
            ClickState::Pressed
        } else {
            self.resting_state()
        };
        None
    }

    fn resting_state(&self) -> ClickState {
        if self.hovered {
            ClickState::Hovered
        } else {
            ClickState::Idle
        }
    }

    /// Drop any hover or press in progress
    pub fn reset(&mut self) {
        self.state = ClickState::Idle;
        self.hovered = false;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.reset();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn visual(&self) -> Visual {
        if !self.enabled {
            Visual::Disabled
        } else if self.state == ClickState::Pressed && self.hovered {
            Visual::Pressed
        } else if self.hovered {
            Visual::Hovered
        } else {
            Visual::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widget::pointer::PointerSample;

    /// Feed samples through a fresh pointer and collect activations
    fn run(button: &mut Clickable<&'static str>, samples: &[PointerSample]) -> Vec<&'static str> {
        let mut pointer = PointerState::default();
        let mut fired = Vec::new();
        for s in samples {
            pointer = pointer.advance(*s);
            fired.extend(button.update(&pointer));
        }
        fired
    }

    fn button() -> Clickable<&'static str> {
        Clickable::new(Bounds::new(0, 0, 50, 20), "go")
    }

    #[test]
    fn press_release_inside_activates_once() {
        let mut b = button();
        let fired = run(
            &mut b,
            &[
                PointerSample::at(10, 10, true),
                PointerSample::at(10, 10, false),
                PointerSample::at(10, 10, false),
            ],
        );
        assert_eq!(fired, vec!["go"]);
        assert_eq!(b.state(), ClickState::Hovered);
    }

    #[test]
    fn drag_off_before_release_cancels() {
        let mut b = button();
        let fired = run(
            &mut b,
            &[
                PointerSample::at(10, 10, true),
                PointerSample::at(100, 100, false),
            ],
        );
        assert!(fired.is_empty());
        assert_eq!(b.state(), ClickState::Idle);
    }

    #[test]
    fn drag_off_and_back_still_activates() {
        let mut b = button();
        let fired = run(
            &mut b,
            &[
                PointerSample::at(10, 10, true),
                PointerSample::at(100, 100, true),
                PointerSample::at(12, 10, false),
            ],
        );
        assert_eq!(fired, vec!["go"]);
    }

    #[test]
    fn held_button_dragged_in_activates() {
        let mut b = button();
        let fired = run(
            &mut b,
            &[
                PointerSample::at(100, 100, true),
                PointerSample::at(10, 10, true),
                PointerSample::at(10, 10, false),
            ],
        );
        assert_eq!(fired, vec!["go"]);
    }

    #[test]
    fn holding_does_not_repeat() {
        let mut b = button();
        let fired = run(
            &mut b,
            &[
                PointerSample::at(10, 10, true),
                PointerSample::at(10, 10, true),
                PointerSample::at(10, 10, true),
                PointerSample::at(10, 10, false),
            ],
        );
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn pressed_visual_only_while_hovered() {
        let mut b = button();
        let mut pointer = PointerState::default();
        pointer = pointer.advance(PointerSample::at(10, 10, true));
        b.update(&pointer);
        assert_eq!(b.visual(), Visual::Pressed);
        pointer = pointer.advance(PointerSample::at(100, 100, true));
        b.update(&pointer);
        assert_eq!(b.state(), ClickState::Pressed);
        assert_eq!(b.visual(), Visual::Normal);
    }

    #[test]
    fn hover_without_press() {
        let mut b = button();
        let fired = run(&mut b, &[PointerSample::at(1, 1, false)]);
        assert!(fired.is_empty());
        assert_eq!(b.visual(), Visual::Hovered);
    }

    #[test]
    fn disabled_never_fires_or_hovers() {
        let mut b = button();
        b.set_enabled(false);
        let fired = run(
            &mut b,
            &[
                PointerSample::at(10, 10, true),
                PointerSample::at(10, 10, false),
            ],
        );
        assert!(fired.is_empty());
        assert!(!b.is_hovered());
        assert_eq!(b.visual(), Visual::Disabled);
    }

    #[test]
    fn disabling_mid_press_cancels() {
        let mut b = button();
        let mut pointer = PointerState::default();
        pointer = pointer.advance(PointerSample::at(10, 10, true));
        b.update(&pointer);
        b.set_enabled(false);
        b.set_enabled(true);
        pointer = pointer.advance(PointerSample::at(10, 10, false));
        assert_eq!(b.update(&pointer), None);
    }
}
