use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

use crate::ops::store::RecordStore;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::tui::widget::{ListItemController, Visual};
use crate::util::unicode::truncate_to_width;

use super::{input_line, rect};

const DELETE_GLYPH: &str = " \u{00D7} ";

/// The visible rows, or the filter's empty message
pub fn render_list<S: RecordStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let list = rect(app.regions.list, area);

    if app.rows.is_empty() {
        if list.height == 0 {
            return;
        }
        let message = Paragraph::new(Span::styled(
            app.filter.empty_message(),
            theme.base().fg(theme.dim),
        ))
        .alignment(Alignment::Center);
        let line = Rect::new(list.x, list.y + list.height / 2, list.width, 1);
        frame.render_widget(message, line);
        return;
    }

    for row in app.rows.iter().filter(|r| !r.bounds().is_empty()) {
        render_row(frame, row, theme, area);
    }
}

fn render_row(frame: &mut Frame, row: &ListItemController, theme: &Theme, area: Rect) {
    let bg = if row.is_hovered() && !row.is_editing() {
        theme.hover_bg
    } else {
        theme.background
    };
    let base = theme.base().bg(bg);
    frame.render_widget(Block::default().style(base), rect(row.bounds(), area));

    if row.is_editing() {
        let editor = row.editor();
        frame.render_widget(
            Paragraph::new(input_line(editor, theme)),
            rect(editor.text_area(), area),
        );
        return;
    }

    let record = row.record();

    let check = if record.completed { "[x]" } else { "[ ]" };
    let check_style = control_style(row.toggle_visual(), base, theme).fg(if record.completed {
        theme.green
    } else {
        theme.text
    });
    frame.render_widget(
        Paragraph::new(Span::styled(check, check_style)),
        rect(row.toggle_bounds(), area),
    );

    let text_area = rect(row.text_bounds(), area);
    let text_style = if record.completed {
        base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else {
        base.fg(theme.text_bright)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            truncate_to_width(&record.text, text_area.width as usize),
            text_style,
        )),
        text_area,
    );

    let delete_style = match row.delete_visual() {
        Visual::Normal => base.fg(theme.dim),
        visual => control_style(visual, base, theme).fg(theme.red),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(DELETE_GLYPH, delete_style)),
        rect(row.delete_bounds(), area),
    );
}

fn control_style(visual: Visual, base: Style, theme: &Theme) -> Style {
    match visual {
        Visual::Pressed => base.bg(theme.highlight).add_modifier(Modifier::BOLD),
        Visual::Hovered => base.add_modifier(Modifier::BOLD),
        _ => base,
    }
}
