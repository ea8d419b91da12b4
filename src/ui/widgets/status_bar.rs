//! Status bar and key hint line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::game::Phase;
use crate::state::Store;
use crate::ui::Palette;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let palette = Palette::from_theme(store.game.chart.palette());

        let phase = match store.game.phase {
            Phase::NoGame => "No game",
            Phase::RoundActive => "Playing",
            Phase::RoundOver => "Game over",
        };

        let loading = if store.app.loading {
            Span::styled(
                " Fetching... ",
                Style::default()
                    .fg(palette.warning)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let theme = if store.app.light_theme { "light" } else { "dark" };
        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(palette.axis));

        let status_line = Line::from(vec![
            Span::styled(
                " updown ",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(phase, Style::default().fg(palette.foreground)),
            Span::raw(" | "),
            Span::styled(theme, Style::default().fg(palette.axis)),
            loading,
        ]);

        // Right-align the help hint
        let left_len: usize = status_line.spans.iter().map(|s| s.width()).sum();
        let right_len = help_hint.width();
        let padding = area
            .width
            .saturating_sub(left_len as u16 + right_len as u16);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding as usize)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(palette.border));

        frame.render_widget(paragraph, area);
    }
}

/// Key hints for whatever the current phase accepts.
pub struct KeyHints;

impl KeyHints {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let palette = Palette::from_theme(store.game.chart.palette());
        let key = Style::default().fg(palette.accent);
        let text = Style::default().fg(palette.axis);

        let hints: &[(&str, &str)] = if store.app.is_editing() {
            &[("Enter", "submit"), ("Esc", "cancel")]
        } else {
            match store.game.phase {
                Phase::NoGame => &[
                    ("s", "ticker"),
                    ("k", "API key"),
                    ("t", "theme"),
                    ("q", "quit"),
                ],
                Phase::RoundActive => &[
                    ("u/↑", "higher"),
                    ("d/↓", "lower"),
                    ("e", "end game"),
                    ("s", "ticker"),
                    ("q", "quit"),
                ],
                Phase::RoundOver => &[
                    ("n", "new game"),
                    ("s", "ticker"),
                    ("t", "theme"),
                    ("q", "quit"),
                ],
            }
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (k, label) in hints {
            spans.push(Span::styled(format!(" {} ", k), key));
            spans.push(Span::styled(format!("{} ", label), text));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
