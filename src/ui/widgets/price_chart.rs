//! Close-price line chart.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::state::Store;
use crate::ui::Palette;

/// Chart of the revealed window of closes.
pub struct PriceChart;

impl PriceChart {
    /// Render the chart, or a placeholder before the first game.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let chart = &store.game.chart;
        let palette = Palette::from_theme(chart.palette());

        let title = match &store.game.symbol {
            Some(symbol) => format!(" Close Price ($) - {} ", symbol),
            None => " Close Price ($) ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.background));

        if chart.is_empty() {
            let placeholder = Paragraph::new(Line::from(vec![
                Span::styled("Press ", Style::default().fg(palette.axis)),
                Span::styled(
                    "s",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    " and enter a ticker to start a game",
                    Style::default().fg(palette.axis),
                ),
            ]))
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let data = chart.data();
        let dataset = Dataset::default()
            .name("Close")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette.line))
            .data(&data);

        let points = chart.points();
        let first = points.first().map(|p| p.date.to_string()).unwrap_or_default();
        let last = points.last().map(|p| p.date.to_string()).unwrap_or_default();
        let x_axis = Axis::default()
            .style(Style::default().fg(palette.axis))
            .bounds(chart.x_bounds())
            .labels(vec![Span::raw(first), Span::raw(last)]);

        let [low, high] = chart.y_bounds();
        let y_axis = Axis::default()
            .style(Style::default().fg(palette.axis))
            .bounds([low, high])
            .labels(vec![
                Span::raw(format!("{:.2}", low)),
                Span::raw(format!("{:.2}", (low + high) / 2.0)),
                Span::raw(format!("{:.2}", high)),
            ]);

        let widget = Chart::new(vec![dataset])
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(widget, area);
    }
}
