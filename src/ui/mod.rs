//! UI rendering using ratatui.
//!
//! Widgets read from the [`Store`] only; nothing here mutates game state.

mod layout;
mod palette;
mod widgets;

pub use layout::{Layout, centered_rect};
pub use palette::Palette;
pub use widgets::{HelpPanel, InfoPanel, InputBar, KeyHints, PriceChart, StatusBar, format_usd};

use crate::config::{KeyBindings, UiConfig};
use crate::state::Store;
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store, ui: &UiConfig, keys: &KeyBindings) {
        let layout = Layout::new(frame.area(), ui.show_status_bar);
        let palette = Palette::from_theme(store.game.chart.palette());

        if ui.show_status_bar {
            StatusBar::render(frame, layout.status_area, store);
        }

        PriceChart::render(frame, layout.chart_area, store);
        InfoPanel::render(frame, layout.info_area, store);
        InputBar::render(frame, layout.input_area, store);
        KeyHints::render(frame, layout.hints_area, store);

        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), keys, &palette);
        }

        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification, &palette);
        }

        // Errors sit on top of notifications
        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.notification_area, error, &palette);
        }
    }
}
