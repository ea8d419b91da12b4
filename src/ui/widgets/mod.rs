//! TUI widgets.

mod help;
mod info_panel;
mod input_bar;
mod notifications;
mod price_chart;
mod status_bar;

pub use help::HelpPanel;
pub use info_panel::{InfoPanel, format_usd};
pub use input_bar::InputBar;
pub use notifications::{render_error, render_notification};
pub use price_chart::PriceChart;
pub use status_bar::{KeyHints, StatusBar};
