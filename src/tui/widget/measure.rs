use crate::util::unicode;

/// Rendered extent of a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Text measurement for a fixed-width glyph face. Must be pure and
/// deterministic; widgets call it on every draw.
pub trait Measure {
    fn measure(&self, text: &str) -> Size;

    fn width(&self, text: &str) -> i32 {
        self.measure(text).width
    }
}

/// Terminal cells: one unit per cell, wide characters take two.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl Measure for CellMeasure {
    fn measure(&self, text: &str) -> Size {
        Size {
            width: unicode::display_width(text) as i32,
            height: 1,
        }
    }
}

/// A bitmap-style face where every character has the same advance. Used to
/// check layout math in units other than terminal cells.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct GlyphFace {
    pub advance: i32,
    pub height: i32,
}

#[cfg(test)]
impl GlyphFace {
    /// The classic 7x13 fixed bitmap face
    pub const FACE_7X13: GlyphFace = GlyphFace {
        advance: 7,
        height: 13,
    };
}

#[cfg(test)]
impl Measure for GlyphFace {
    fn measure(&self, text: &str) -> Size {
        Size {
            width: text.chars().count() as i32 * self.advance,
            height: self.height,
        }
    }
}
