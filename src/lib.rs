//! # updown - a stock closing-price guessing game
//!
//! A terminal game: pick a ticker, look at a week of real daily closes,
//! and call whether the next trading day closes higher or lower.
//!
//! ## Architecture
//!
//! - **Game**: Series model, start-date selection, and the round engine
//! - **API**: Alpha Vantage series provider
//! - **Storage**: Persisted high score and API key override
//! - **Session**: Player commands wired to the provider and engine
//! - **State**: Centralized state store fed by game events
//! - **Events**: Keyboard input mapped to actions
//! - **UI**: Layout and rendering logic
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use session::GameSession;
