use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::store::RecordStore;
use crate::tui::app::{ADD_LABEL, App, TITLE};

use super::{input_line, rect};

/// Title line, the bordered add-input and the Add button
pub fn render_header<S: RecordStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        theme
            .base()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, rect(app.regions.title, area));

    let input = &app.add_input;
    let border = if input.is_focused() {
        theme.highlight
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.base().fg(border))
        .style(theme.base());
    frame.render_widget(block, rect(input.bounds(), area));
    frame.render_widget(
        Paragraph::new(input_line(input, theme)),
        rect(input.text_area(), area),
    );

    let button = &app.add_button;
    let style = theme.button(button.visual(), false);
    let label = Paragraph::new(ADD_LABEL)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(label, rect(button.bounds(), area));
}
