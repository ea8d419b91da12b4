//! Events emitted by the round engine and the sinks that consume them.

use super::{PricePoint, Symbol};
use crate::config::ThemeConfig;
use rust_decimal::Decimal;

/// The player's call for the next close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOverReason {
    /// All guesses of the game were made.
    BoundReached,
    /// The series has no point after the current one.
    DataExhausted,
    /// The player ended the game.
    ManualEnd,
}

impl std::fmt::Display for RoundOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoundReached => write!(f, "bound-reached"),
            Self::DataExhausted => write!(f, "data-exhausted"),
            Self::ManualEnd => write!(f, "manual-end"),
        }
    }
}

/// Something the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A round began; `window` is the lead-in plus the start point.
    RoundStarted {
        symbol: Symbol,
        window: Vec<PricePoint>,
        score: u32,
        high_score: u32,
    },
    /// A guess was scored and the next point revealed.
    GuessResolved {
        point: PricePoint,
        previous_close: Decimal,
        direction: Direction,
        correct: bool,
        score: u32,
        round_count: u32,
    },
    /// The game reached a terminal state.
    RoundOver {
        final_score: u32,
        high_score: u32,
        new_high_score: bool,
        reason: RoundOverReason,
    },
    /// High-score memory could not be read or written.
    PersistenceUnavailable { message: String },
    /// The running game was discarded without a result.
    GameCleared,
}

/// Receives engine events.
pub trait PresentationSink {
    fn on_round_start(
        &mut self,
        symbol: &Symbol,
        window: &[PricePoint],
        score: u32,
        high_score: u32,
    );

    fn on_guess_resolved(
        &mut self,
        point: &PricePoint,
        previous_close: Decimal,
        direction: Direction,
        correct: bool,
        score: u32,
        round_count: u32,
    );

    fn on_round_over(
        &mut self,
        final_score: u32,
        high_score: u32,
        new_high_score: bool,
        reason: RoundOverReason,
    );

    fn on_persistence_unavailable(&mut self, message: &str);

    fn on_game_cleared(&mut self);

    /// Route an event to the matching callback.
    fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RoundStarted {
                symbol,
                window,
                score,
                high_score,
            } => self.on_round_start(symbol, window, *score, *high_score),
            GameEvent::GuessResolved {
                point,
                previous_close,
                direction,
                correct,
                score,
                round_count,
            } => self.on_guess_resolved(
                point,
                *previous_close,
                *direction,
                *correct,
                *score,
                *round_count,
            ),
            GameEvent::RoundOver {
                final_score,
                high_score,
                new_high_score,
                reason,
            } => self.on_round_over(*final_score, *high_score, *new_high_score, *reason),
            GameEvent::PersistenceUnavailable { message } => {
                self.on_persistence_unavailable(message)
            }
            GameEvent::GameCleared => self.on_game_cleared(),
        }
    }
}

/// A price chart the presentation layer can drive without knowing the
/// charting backend.
pub trait ChartSink {
    /// Replace the plotted points.
    fn render(&mut self, window: &[PricePoint]);

    /// Add one point to the right edge.
    fn append(&mut self, point: &PricePoint);

    /// Change colors in place.
    fn restyle(&mut self, palette: &ThemeConfig);
}
