use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;

use crate::model::FILTERS;
use crate::ops::store::RecordStore;
use crate::tui::app::{App, CLEAR_LABEL};

use super::rect;

/// Filter buttons, the clear button and the "N of M todos" counter
pub fn render_footer<S: RecordStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let footer = rect(app.regions.footer, area);

    // Counter first so buttons win if the terminal is too narrow for both
    let counts = app.counts();
    let counter = format!(
        "{} of {} todos ",
        counts.for_filter(app.filter),
        counts.total
    );
    frame.render_widget(
        Paragraph::new(counter)
            .style(theme.base().fg(theme.dim))
            .alignment(Alignment::Right),
        footer,
    );

    for (button, (filter, label)) in app.filter_buttons.iter().zip(FILTERS) {
        let style = theme.button(button.visual(), filter == app.filter);
        frame.render_widget(
            Paragraph::new(format!(" {label} ")).style(style),
            rect(button.bounds(), area),
        );
    }

    let clear = &app.clear_button;
    frame.render_widget(
        Paragraph::new(format!(" {CLEAR_LABEL} ")).style(theme.button(clear.visual(), false)),
        rect(clear.bounds(), area),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Filter;
    use crate::tui::render::test_helpers::*;

    fn footer_line(app: &App<crate::model::RecordList>) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_footer(frame, app, area);
        })
        .lines()
        .last()
        .unwrap_or_default()
        .to_string()
    }

    #[test]
    fn footer_lists_filters_in_order() {
        let app = app_with(&["a", "b"]);
        let line = footer_line(&app);
        assert!(line.starts_with("  All   Active   Completed    Clear completed"));
        assert!(line.ends_with("2 of 2 todos"));
    }

    #[test]
    fn counter_follows_filter() {
        let mut app = app_with(&["a", "b", "c"]);
        let id = app.rows[0].id().clone();
        assert!(app.store.toggle(&id));
        app.filter = Filter::Active;
        app.refresh_rows();
        assert!(footer_line(&app).ends_with("2 of 3 todos"));
    }

    #[test]
    fn active_filter_is_highlighted() {
        let mut app = app_with(&[]);
        app.filter = Filter::Completed;
        let theme = app.theme.clone();
        let buffer = render_buffer(TERM_W, TERM_H, |frame, area| {
            render_footer(frame, &app, area);
        });
        let y = TERM_H - 1;
        // "All" at x=2, "Completed" at x=17
        assert_eq!(buffer[(2u16, y)].fg, theme.text);
        assert_eq!(buffer[(17u16, y)].fg, theme.highlight);
    }
}
