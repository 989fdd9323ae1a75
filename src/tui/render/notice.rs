use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::store::RecordStore;
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

use super::rect;

const DISMISS_HINT: &str = "click to dismiss";

/// The notification line, if a notice is up
pub fn render_notice<S: RecordStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let theme = &app.theme;
    let line_area = rect(app.regions.notice, area);
    let width = line_area.width as usize;

    let style = theme.base().fg(theme.red);
    let mut spans = vec![
        Span::styled(" ! ", style.add_modifier(Modifier::BOLD)),
        Span::styled(
            truncate_to_width(&notice.message, width.saturating_sub(4)),
            style,
        ),
    ];
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(DISMISS_HINT);
    if used + hint_width + 2 <= width {
        spans.push(Span::styled(
            " ".repeat(width - used - hint_width - 1),
            theme.base(),
        ));
        spans.push(Span::styled(DISMISS_HINT, theme.base().fg(theme.dim)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
}
