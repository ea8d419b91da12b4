//! Game info panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use rust_decimal::Decimal;

use crate::game::{Direction, Phase};
use crate::state::Store;
use crate::ui::Palette;

/// Symbol, date, price and score of the game in progress.
pub struct InfoPanel;

impl InfoPanel {
    /// Render the info panel.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let game = &store.game;
        let palette = Palette::from_theme(game.chart.palette());
        let label = Style::default().fg(palette.axis);
        let value = Style::default()
            .fg(palette.foreground)
            .add_modifier(Modifier::BOLD);

        let symbol = game
            .symbol
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "–".to_string());
        let (date, price) = match &game.current {
            Some(point) => (point.date.to_string(), format_usd(point.close)),
            None => ("–".to_string(), "–".to_string()),
        };

        let mut lines = vec![
            Line::from(vec![Span::styled("Symbol  ", label), Span::styled(symbol, value)]),
            Line::from(vec![Span::styled("Date    ", label), Span::styled(date, value)]),
            Line::from(vec![Span::styled("Close   ", label), Span::styled(price, value)]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score   ", label),
                Span::styled(game.score.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Round   ", label),
                Span::styled(format!("{}/{}", game.round_count, game.rounds_per_game), value),
            ]),
            Line::from(vec![
                Span::styled("Best    ", label),
                Span::styled(game.high_score.to_string(), value),
            ]),
            Line::from(""),
        ];

        if let Some(guess) = &game.last_guess {
            let arrow = match guess.direction {
                Direction::Up => "▲",
                Direction::Down => "▼",
            };
            lines.push(Line::from(vec![
                Span::styled(format!("You said {} ", arrow), label),
                Span::styled(
                    format!("{} → {}", format_usd(guess.from), format_usd(guess.to)),
                    value,
                ),
            ]));
        }

        if let Some(result) = game.result_line() {
            let correct = game.last_guess.map(|g| g.correct).unwrap_or(false);
            let color = if game.summary.is_some() {
                palette.accent
            } else if correct {
                palette.success
            } else {
                palette.error
            };
            lines.push(Line::from(Span::styled(
                result,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }

        let hint = match game.phase {
            Phase::NoGame => "Enter a ticker with s",
            Phase::RoundActive => "Higher (u/↑) or lower (d/↓)?",
            Phase::RoundOver => "n: new game  s: new ticker",
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(hint, label)));

        if let Some(warning) = &game.persistence_warning {
            lines.push(Line::from(Span::styled(
                warning.clone(),
                Style::default().fg(palette.warning),
            )));
        }

        let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Game ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .style(Style::default().bg(palette.background)),
        );

        frame.render_widget(panel, area);
    }
}

/// Two-decimal dollar amount.
pub fn format_usd(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(169.2)), "169.20");
        assert_eq!(format_usd(dec!(12.3456)), "12.35");
        assert_eq!(format_usd(dec!(7)), "7.00");
    }
}
