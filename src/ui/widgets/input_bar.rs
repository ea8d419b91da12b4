//! Text input line for tickers and API keys.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{InputMode, Store};
use crate::ui::Palette;

/// Input line widget.
pub struct InputBar;

impl InputBar {
    /// Render the input line and place the cursor while editing.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let palette = Palette::from_theme(store.game.chart.palette());
        let mode = store.app.input_mode;

        let (border, content) = if store.app.is_editing() {
            let shown = match mode {
                // Keys are secrets; only show their length
                InputMode::ApiKey => "•".repeat(store.app.input_buffer.chars().count()),
                _ => store.app.input_buffer.clone(),
            };
            (
                palette.accent,
                Line::from(vec![
                    Span::styled(mode.prompt(), Style::default().fg(palette.axis)),
                    Span::styled(shown, Style::default().fg(palette.foreground)),
                ]),
            )
        } else if store.app.loading {
            (
                palette.warning,
                Line::from(Span::styled("Loading…", Style::default().fg(palette.warning))),
            )
        } else {
            (
                palette.border,
                Line::from(Span::styled(
                    "s: enter ticker   k: set API key",
                    Style::default().fg(palette.axis),
                )),
            )
        };

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);

        if store.app.is_editing() {
            let x = cursor_column(area, mode.prompt().chars().count(), store.app.cursor_position);
            frame.set_cursor_position((x, area.y.saturating_add(1)));
        }
    }
}

/// Terminal column of the cursor, kept inside the bordered input box.
fn cursor_column(area: Rect, prompt_len: usize, cursor: usize) -> u16 {
    let offset = prompt_len.saturating_add(cursor);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_follows_prompt_and_position() {
        let area = Rect::new(0, 20, 80, 3);
        assert_eq!(cursor_column(area, 8, 3), 12);
    }

    #[test]
    fn test_long_paste_keeps_cursor_in_box() {
        let area = Rect::new(2, 20, 40, 3);
        assert_eq!(cursor_column(area, 9, 100_000), 40);
        assert_eq!(cursor_column(area, usize::MAX, usize::MAX), 40);
    }
}
