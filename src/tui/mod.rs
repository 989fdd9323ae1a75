pub mod app;
pub mod input;
pub mod render;
pub mod theme;
pub mod widget;

pub use app::run;
