//! Read-only projection of the game, updated from engine events.

use super::ChartState;
use crate::config::ThemeConfig;
use crate::game::{
    ChartSink, Direction, Phase, PresentationSink, PricePoint, RoundOverReason, Symbol,
};
use rust_decimal::Decimal;

/// The most recent scored guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub direction: Direction,
    pub correct: bool,
    pub from: Decimal,
    pub to: Decimal,
}

/// How the last game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub final_score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub reason: RoundOverReason,
}

impl RoundSummary {
    /// One-line description for the info panel.
    pub fn message(&self) -> String {
        let mut text = match self.reason {
            RoundOverReason::BoundReached => {
                format!("Game over. Final score: {}", self.final_score)
            }
            RoundOverReason::DataExhausted => {
                format!("No more data available. Final score: {}", self.final_score)
            }
            RoundOverReason::ManualEnd => format!("Game ended. Final score: {}", self.final_score),
        };
        if self.new_high_score {
            text.push_str(" - new high score!");
        }
        text
    }
}

/// What the info panel and chart show.
#[derive(Debug, Default)]
pub struct GameView {
    pub symbol: Option<Symbol>,
    pub phase: Phase,
    pub current: Option<PricePoint>,
    pub score: u32,
    pub round_count: u32,
    pub rounds_per_game: u32,
    pub high_score: u32,
    pub last_guess: Option<GuessOutcome>,
    pub summary: Option<RoundSummary>,
    pub persistence_warning: Option<String>,
    pub chart: ChartState,
}

impl GameView {
    pub fn new(rounds_per_game: u32, palette: ThemeConfig) -> Self {
        Self {
            rounds_per_game,
            chart: ChartState::new(palette),
            ..Default::default()
        }
    }

    /// Whether guess and end-game commands are accepted.
    pub fn controls_enabled(&self) -> bool {
        self.phase == Phase::RoundActive
    }

    /// Text for the result line under the info panel.
    pub fn result_line(&self) -> Option<String> {
        if let Some(summary) = &self.summary {
            return Some(summary.message());
        }
        self.last_guess.map(|g| {
            if g.correct {
                "Correct! +1 point".to_string()
            } else {
                "Incorrect. +0 points".to_string()
            }
        })
    }
}

impl PresentationSink for GameView {
    fn on_round_start(
        &mut self,
        symbol: &Symbol,
        window: &[PricePoint],
        score: u32,
        high_score: u32,
    ) {
        self.symbol = Some(symbol.clone());
        self.phase = Phase::RoundActive;
        self.current = window.last().copied();
        self.score = score;
        self.round_count = 0;
        self.high_score = high_score;
        self.last_guess = None;
        self.summary = None;
        self.chart.render(window);
    }

    fn on_guess_resolved(
        &mut self,
        point: &PricePoint,
        previous_close: Decimal,
        direction: Direction,
        correct: bool,
        score: u32,
        round_count: u32,
    ) {
        self.current = Some(*point);
        self.score = score;
        self.round_count = round_count;
        self.last_guess = Some(GuessOutcome {
            direction,
            correct,
            from: previous_close,
            to: point.close,
        });
        self.chart.append(point);
    }

    fn on_round_over(
        &mut self,
        final_score: u32,
        high_score: u32,
        new_high_score: bool,
        reason: RoundOverReason,
    ) {
        self.phase = Phase::RoundOver;
        self.score = final_score;
        self.high_score = high_score;
        self.summary = Some(RoundSummary {
            final_score,
            high_score,
            new_high_score,
            reason,
        });
    }

    fn on_persistence_unavailable(&mut self, message: &str) {
        self.persistence_warning = Some(message.to_string());
    }

    fn on_game_cleared(&mut self) {
        self.symbol = None;
        self.phase = Phase::NoGame;
        self.current = None;
        self.score = 0;
        self.round_count = 0;
        self.last_guess = None;
        self.summary = None;
        self.chart.render(&[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameEvent;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn point(day: u32, close: Decimal) -> PricePoint {
        PricePoint::new(NaiveDate::from_ymd_opt(2024, 5, day).unwrap(), close)
    }

    fn started() -> GameView {
        let mut view = GameView::new(5, ThemeConfig::default());
        let window: Vec<_> = (1..=8).map(|d| point(d, Decimal::from(d))).collect();
        view.apply(&GameEvent::RoundStarted {
            symbol: Symbol::parse("IBM").unwrap(),
            window,
            score: 0,
            high_score: 2,
        });
        view
    }

    #[test]
    fn test_round_start_renders_window() {
        let view = started();
        assert_eq!(view.phase, Phase::RoundActive);
        assert!(view.controls_enabled());
        assert_eq!(view.chart.points().len(), 8);
        assert_eq!(view.current, Some(point(8, dec!(8))));
        assert_eq!(view.high_score, 2);
        assert_eq!(view.result_line(), None);
    }

    #[test]
    fn test_guess_appends_point() {
        let mut view = started();
        view.apply(&GameEvent::GuessResolved {
            point: point(9, dec!(7)),
            previous_close: dec!(8),
            direction: Direction::Down,
            correct: true,
            score: 1,
            round_count: 1,
        });

        assert_eq!(view.chart.points().len(), 9);
        assert_eq!(view.score, 1);
        assert_eq!(view.result_line().as_deref(), Some("Correct! +1 point"));
    }

    #[test]
    fn test_round_over_disables_controls() {
        let mut view = started();
        view.apply(&GameEvent::RoundOver {
            final_score: 4,
            high_score: 4,
            new_high_score: true,
            reason: RoundOverReason::BoundReached,
        });

        assert!(!view.controls_enabled());
        assert_eq!(
            view.result_line().as_deref(),
            Some("Game over. Final score: 4 - new high score!")
        );
    }

    #[test]
    fn test_restart_clears_summary() {
        let mut view = started();
        view.apply(&GameEvent::RoundOver {
            final_score: 0,
            high_score: 2,
            new_high_score: false,
            reason: RoundOverReason::ManualEnd,
        });
        view.apply(&GameEvent::RoundStarted {
            symbol: Symbol::parse("IBM").unwrap(),
            window: vec![point(20, dec!(3))],
            score: 0,
            high_score: 2,
        });

        assert!(view.summary.is_none());
        assert!(view.controls_enabled());
        assert_eq!(view.chart.points().len(), 1);
    }

    #[test]
    fn test_game_cleared_disables_controls() {
        let mut view = started();
        view.apply(&GameEvent::GameCleared);

        assert_eq!(view.phase, Phase::NoGame);
        assert!(!view.controls_enabled());
        assert!(view.symbol.is_none());
        assert!(view.chart.is_empty());
        assert_eq!(view.high_score, 2);
    }
}
