//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;
use crate::ui::Palette;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings, palette: &Palette) {
        let popup_area = centered_rect(60, 70, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let heading = Style::default()
            .fg(palette.warning)
            .add_modifier(Modifier::BOLD);
        let key = Style::default().fg(palette.accent);
        let entry = |k: String, label: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {:<6}", k), key),
                Span::raw(label),
            ])
        };

        let help_text = vec![
            Line::from(Span::styled("How to play", heading)),
            Line::from(""),
            Line::from("  Guess whether the next trading day closes"),
            Line::from("  higher or lower. One point per correct call."),
            Line::from(""),
            Line::from(Span::styled("Game", heading)),
            Line::from(""),
            entry(keys.symbol.clone(), "Enter a ticker and start"),
            entry(format!("{}/↑", keys.guess_up), "Guess higher"),
            entry(format!("{}/↓", keys.guess_down), "Guess lower"),
            entry(keys.end_game.clone(), "End the game"),
            entry(keys.new_game.clone(), "New game, same ticker"),
            Line::from(""),
            Line::from(Span::styled("Settings", heading)),
            Line::from(""),
            entry(keys.api_key.clone(), "Set API key (blank to reset)"),
            entry(keys.theme.clone(), "Toggle light/dark theme"),
            entry(keys.help.clone(), "Toggle help"),
            entry(keys.quit.clone(), "Quit"),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.warning)),
            )
            .style(Style::default().fg(palette.foreground).bg(palette.background));

        frame.render_widget(help, popup_area);
    }
}
