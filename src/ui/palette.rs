//! Conversion from configured hex colors to terminal colors.

use crate::config::ThemeConfig;
use ratatui::style::Color;
use std::str::FromStr;

/// Resolved colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub line: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub axis: Color,
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
}

impl Palette {
    /// Resolve a theme, falling back to named colors for unparseable entries.
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        Self {
            line: parse(&theme.line, Color::Blue),
            accent: parse(&theme.accent, Color::LightRed),
            success: parse(&theme.success, Color::Green),
            warning: parse(&theme.warning, Color::Yellow),
            error: parse(&theme.error, Color::Red),
            axis: parse(&theme.axis, Color::Gray),
            background: parse(&theme.background, Color::Reset),
            foreground: parse(&theme.foreground, Color::White),
            border: parse(&theme.border, Color::DarkGray),
        }
    }
}

fn parse(hex: &str, fallback: Color) -> Color {
    Color::from_str(hex).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors_resolve() {
        let palette = Palette::from_theme(&ThemeConfig::default());
        assert_eq!(palette.line, Color::Rgb(0x4f, 0x8c, 0xff));
    }

    #[test]
    fn test_bad_color_falls_back() {
        let theme = ThemeConfig {
            line: "not-a-color".to_string(),
            ..ThemeConfig::default()
        };
        assert_eq!(Palette::from_theme(&theme).line, Color::Blue);
    }
}
