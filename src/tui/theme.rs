use ratatui::style::{Color, Modifier, Style};

use crate::model::UiConfig;
use crate::tui::widget::Visual;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub border: Color,
    pub red: Color,
    pub green: Color,
    /// Background of the row under the pointer
    pub hover_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            border: Color::Rgb(0x5A, 0x55, 0x8F),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            hover_bg: Color::Rgb(0x1E, 0x10, 0x33),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui]` config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "border" => theme.border = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "hover_bg" => theme.hover_bg = color,
                _ => tracing::warn!(key = %key, "unknown theme color"),
            }
        }

        theme
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Style for a clickable label. `selected` marks the active filter.
    pub fn button(&self, visual: Visual, selected: bool) -> Style {
        let base = self.base();
        match visual {
            Visual::Disabled => base.fg(self.dim),
            Visual::Pressed => base.fg(self.background).bg(self.highlight),
            Visual::Hovered => base
                .fg(self.text_bright)
                .bg(self.hover_bg)
                .add_modifier(Modifier::BOLD),
            Visual::Normal if selected => base.fg(self.highlight).add_modifier(Modifier::BOLD),
            Visual::Normal => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("red".into(), "not-a-color".into());
        ui.colors.insert("no_such_slot".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        // Invalid values keep the default
        assert_eq!(theme.red, Color::Rgb(0xFF, 0x44, 0x44));
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }

    #[test]
    fn test_button_styles() {
        let theme = Theme::default();
        assert_eq!(theme.button(Visual::Disabled, false).fg, Some(theme.dim));
        assert_eq!(theme.button(Visual::Pressed, false).bg, Some(theme.highlight));
        assert_eq!(theme.button(Visual::Normal, true).fg, Some(theme.highlight));
        assert_eq!(theme.button(Visual::Normal, false).fg, Some(theme.text));
    }
}
