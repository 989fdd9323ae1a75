//! Per-tick input snapshot shared by every widget.
//!
//! The host builds exactly one [`FrameInput`] per tick. Widgets only ever
//! read from it, so siblings updated in the same tick observe the same
//! pointer position, the same button edges and the same key list.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle. Contains the points `x..x+w` by `y..y+h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Bounds {
    /// Zero-sized bounds; nothing is inside. Used for off-screen widgets.
    pub const EMPTY: Bounds = Bounds {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Bounds { x, y, w, h }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Raw pointer reading supplied by the host once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerSample {
    pub position: Point,
    pub primary_down: bool,
}

impl PointerSample {
    pub fn at(x: i32, y: i32, primary_down: bool) -> Self {
        PointerSample {
            position: Point::new(x, y),
            primary_down,
        }
    }
}

/// A pointer sample plus the button edges relative to the previous tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    pub position: Point,
    pub primary_down: bool,
    /// Button went down this tick
    pub just_pressed: bool,
    /// Button went up this tick
    pub just_released: bool,
}

impl PointerState {
    /// The state for the next tick, given this tick's sample
    pub fn advance(&self, sample: PointerSample) -> PointerState {
        PointerState {
            position: sample.position,
            primary_down: sample.primary_down,
            just_pressed: sample.primary_down && !self.primary_down,
            just_released: !sample.primary_down && self.primary_down,
        }
    }

    /// A primary click started inside `bounds` this tick
    pub fn pressed_in(&self, bounds: Bounds) -> bool {
        self.just_pressed && bounds.contains(self.position)
    }
}

/// Editing and navigation keys delivered to text inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Tab,
}

/// One edge-triggered keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Key(Key),
}

/// Everything a widget may look at during one tick
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub pointer: PointerState,
    /// Keys newly pressed this tick, in arrival order
    pub keys: Vec<KeyInput>,
    pub now: Instant,
}

impl FrameInput {
    pub fn new(pointer: PointerState, now: Instant) -> Self {
        FrameInput {
            pointer,
            keys: Vec::new(),
            now,
        }
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyInput>) -> Self {
        self.keys.extend(keys);
        self
    }

    /// Type each character of `text` as a key event
    pub fn typing(self, text: &str) -> Self {
        self.with_keys(text.chars().map(KeyInput::Char))
    }
}
