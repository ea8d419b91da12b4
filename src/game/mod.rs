//! The guessing game itself.
//!
//! A [`Series`] of daily closes goes in, the [`DateSelector`] picks where the
//! game starts, and the [`RoundEngine`] scores guesses until the game is
//! over. Everything here is independent of the terminal and the network.

mod engine;
mod events;
mod selector;
mod series;

pub use engine::{Phase, RoundEngine, RoundState, score_guess};
pub use events::{ChartSink, Direction, GameEvent, PresentationSink, RoundOverReason};
pub use selector::{DateSelector, is_weekday};
pub use series::{PricePoint, Series, Symbol};
