//! Notification rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::state::{Notification, NotificationLevel};
use crate::ui::Palette;

/// Render a notification popup.
pub fn render_notification(
    frame: &mut Frame,
    area: Rect,
    notification: &Notification,
    palette: &Palette,
) {
    frame.render_widget(Clear, area);

    let (border_color, icon) = match notification.level {
        NotificationLevel::Info => (palette.accent, "ℹ"),
        NotificationLevel::Success => (palette.success, "✓"),
        NotificationLevel::Warning => (palette.warning, "⚠"),
        NotificationLevel::Error => (palette.error, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(format!("{} ", icon), Style::default().fg(border_color)),
        Span::raw(&notification.message),
    ]);

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(palette.foreground).bg(palette.background));

    frame.render_widget(paragraph, area);
}

/// Render an error popup. Dismissed with Esc.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str, palette: &Palette) {
    frame.render_widget(Clear, area);

    let content = vec![
        Line::from(vec![
            Span::styled(
                "✗ ",
                Style::default()
                    .fg(palette.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(error),
        ]),
        Line::from(Span::styled("Esc to dismiss", Style::default().fg(palette.axis))),
    ];

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.error)),
        )
        .style(Style::default().fg(palette.foreground).bg(palette.background));

    frame.render_widget(paragraph, area);
}
