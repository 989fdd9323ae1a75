pub mod clickable;
pub mod list_item;
pub mod measure;
pub mod pointer;
pub mod text_input;

pub use clickable::{ClickState, Clickable, Visual};
pub use list_item::{DOUBLE_CLICK_THRESHOLD, ItemEvent, ItemMode, ListItemController};
pub use measure::{CellMeasure, Measure, Size};
pub use pointer::{Bounds, FrameInput, Key, KeyInput, Point, PointerSample, PointerState};
pub use text_input::{BLINK_INTERVAL, CursorBlink, TextBuffer, TextInput, TextSignal, ViewportWindow};
