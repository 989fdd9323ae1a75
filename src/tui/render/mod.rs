pub mod footer;
pub mod header;
pub mod list_view;
pub mod notice;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;

use crate::ops::store::RecordStore;
use crate::util::unicode::char_slice;

use super::app::App;
use super::theme::Theme;
use super::widget::{Bounds, CellMeasure, TextInput};

/// Main render function: draws every region from the bounds the app laid out
pub fn render<S: RecordStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();

    // Background fill
    frame.render_widget(Block::default().style(app.theme.base()), area);

    header::render_header(frame, app, area);
    notice::render_notice(frame, app, area);
    list_view::render_list(frame, app, area);
    footer::render_footer(frame, app, area);
}

/// Widget bounds as a ratatui rect, clipped to `area`
pub(super) fn rect(bounds: Bounds, area: Rect) -> Rect {
    if bounds.is_empty() || bounds.x < 0 || bounds.y < 0 {
        return Rect::default();
    }
    Rect::new(
        bounds.x as u16,
        bounds.y as u16,
        bounds.w as u16,
        bounds.h as u16,
    )
    .intersection(area)
}

/// One line for a text input: the viewport slice with the caret cell
/// highlighted, or the placeholder
pub(super) fn input_line(input: &TextInput, theme: &Theme) -> Line<'static> {
    let base = theme.base();
    if input.shows_placeholder() {
        return Line::from(Span::styled(
            input.placeholder().to_string(),
            base.fg(theme.dim),
        ));
    }

    let text_style = base.fg(theme.text_bright);
    let caret_style = if input.caret_visible() {
        base.fg(theme.background).bg(theme.highlight)
    } else {
        text_style
    };

    let buffer = input.buffer();
    let content = buffer.text();
    let cursor = buffer.cursor();
    let view = input.viewport(&CellMeasure);

    let mut spans = vec![Span::styled(
        char_slice(content, view.start, cursor).to_string(),
        text_style,
    )];
    if cursor < view.end {
        spans.push(Span::styled(
            char_slice(content, cursor, cursor + 1).to_string(),
            caret_style,
        ));
        spans.push(Span::styled(
            char_slice(content, cursor + 1, view.end).to_string(),
            text_style,
        ));
    } else if input.is_focused() {
        // Caret past the last character
        spans.push(Span::styled(" ", caret_style));
    }
    Line::from(spans)
}
