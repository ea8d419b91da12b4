//! The round engine: start, guess, advance, end.

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{DateSelector, Direction, GameEvent, PricePoint, RoundOverReason, Series, Symbol};
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::storage::Persistence;

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NoGame,
    RoundActive,
    RoundOver,
}

/// Whether `direction` was the right call going from `current` to `next`.
///
/// Only a strictly higher close counts as up, so an unchanged price scores
/// a guess of `Up` as wrong and `Down` as right.
pub fn score_guess(current: &PricePoint, next: &PricePoint, direction: Direction) -> bool {
    let went_up = next.close > current.close;
    (direction == Direction::Up) == went_up
}

/// State of the game in progress.
#[derive(Debug, Clone)]
pub struct RoundState {
    series: Series,
    start_index: usize,
    current_index: usize,
    score: u32,
    round_count: u32,
}

impl RoundState {
    fn new(series: Series, start_index: usize) -> Self {
        Self {
            series,
            start_index,
            current_index: start_index,
            score: 0,
            round_count: 0,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        self.series.symbol()
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The most recently revealed point.
    pub fn current_point(&self) -> &PricePoint {
        &self.series.points()[self.current_index]
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    /// Whether a point exists after the current one.
    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.series.len()
    }
}

/// Runs games over a fetched series and keeps the high score.
#[derive(Debug)]
pub struct RoundEngine {
    rules: GameConfig,
    selector: DateSelector,
    persistence: Persistence,
    rng: StdRng,
    high_score: u32,
    phase: Phase,
    round: Option<RoundState>,
}

impl RoundEngine {
    /// Create an engine with an entropy-seeded RNG.
    pub fn new(rules: GameConfig, persistence: Persistence) -> Self {
        let selector = DateSelector::from_config(&rules);
        Self {
            rules,
            selector,
            persistence,
            rng: StdRng::from_entropy(),
            high_score: 0,
            phase: Phase::NoGame,
            round: None,
        }
    }

    /// Use a specific RNG for start-date selection.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn rules(&self) -> &GameConfig {
        &self.rules
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut Persistence {
        &mut self.persistence
    }

    /// Start a game on `series` from a randomly selected date.
    ///
    /// Any previous game is discarded. On failure the engine is left in
    /// [`Phase::NoGame`].
    pub fn start_round(&mut self, series: Series, today: NaiveDate) -> Result<Vec<GameEvent>> {
        self.discard();

        let date = self
            .selector
            .select(&series, today, &mut self.rng)
            .ok_or_else(|| {
                Error::insufficient_history(
                    "Could not find a valid start date in the required window.",
                )
            })?;
        let index = series.index_of(date).ok_or_else(|| {
            Error::insufficient_history("Selected start date is missing from the series.")
        })?;

        self.start_at(series, index)
    }

    /// Start a game on `series` from a specific index.
    pub fn start_at(&mut self, series: Series, start_index: usize) -> Result<Vec<GameEvent>> {
        self.discard();

        if start_index >= series.len() {
            return Err(Error::insufficient_history(format!(
                "Start index {} is past the end of the series.",
                start_index
            )));
        }
        let window = series
            .window(start_index, self.rules.lead_in)
            .ok_or_else(|| {
                Error::insufficient_history("Not enough historical data before start date.")
            })?
            .to_vec();

        let mut events = Vec::new();
        match self.persistence.load_high_score() {
            // Never let a stale store lower the score held in memory
            Ok(stored) => self.high_score = self.high_score.max(stored),
            Err(e) => {
                tracing::warn!("Failed to load high score: {}", e);
                events.push(persistence_unavailable(&e));
            }
        }

        let round = RoundState::new(series, start_index);
        tracing::info!(
            symbol = %round.symbol(),
            start_date = %round.current_point().date,
            start_index,
            "round started"
        );

        events.push(GameEvent::RoundStarted {
            symbol: round.symbol().clone(),
            window,
            score: 0,
            high_score: self.high_score,
        });
        self.round = Some(round);
        self.phase = Phase::RoundActive;

        Ok(events)
    }

    /// Score a guess on the next close and reveal it.
    pub fn guess(&mut self, direction: Direction) -> Result<Vec<GameEvent>> {
        let rounds_per_game = self.rules.rounds_per_game;
        let round = self.active_round("guess")?;

        if !round.has_next() {
            tracing::info!(symbol = %round.symbol(), "no more data");
            return Ok(self.finish(RoundOverReason::DataExhausted));
        }

        let current = *round.current_point();
        let next = round.series.points()[round.current_index + 1];
        let correct = score_guess(&current, &next, direction);

        if correct {
            round.score += 1;
        }
        round.current_index += 1;
        round.round_count += 1;

        tracing::debug!(
            date = %next.date,
            %direction,
            correct,
            score = round.score,
            round = round.round_count,
            "guess resolved"
        );

        let finished = round.round_count >= rounds_per_game;
        let mut events = vec![GameEvent::GuessResolved {
            point: next,
            previous_close: current.close,
            direction,
            correct,
            score: round.score,
            round_count: round.round_count,
        }];

        if finished {
            events.extend(self.finish(RoundOverReason::BoundReached));
        }

        Ok(events)
    }

    /// End the current game early.
    pub fn end_game(&mut self) -> Result<Vec<GameEvent>> {
        self.active_round("end the game")?;
        Ok(self.finish(RoundOverReason::ManualEnd))
    }

    /// Start another game on the same series.
    ///
    /// If no start date can be drawn, the finished game is kept and the
    /// engine stays in [`Phase::RoundOver`].
    pub fn new_game(&mut self, today: NaiveDate) -> Result<Vec<GameEvent>> {
        if self.phase != Phase::RoundOver {
            return Err(Error::invalid_operation(
                "a new game can only start after the current one is over",
            ));
        }
        let previous = self
            .round
            .take()
            .ok_or_else(|| Error::invalid_operation("no series loaded"))?;

        match self.start_round(previous.series.clone(), today) {
            Ok(events) => Ok(events),
            Err(e) => {
                tracing::warn!(symbol = %previous.symbol(), "new game failed: {}", e);
                self.round = Some(previous);
                self.phase = Phase::RoundOver;
                Err(e)
            }
        }
    }

    fn active_round(&mut self, what: &str) -> Result<&mut RoundState> {
        match (self.phase, self.round.as_mut()) {
            (Phase::RoundActive, Some(round)) => Ok(round),
            _ => Err(Error::invalid_operation(format!(
                "cannot {} while no round is active",
                what
            ))),
        }
    }

    fn finish(&mut self, reason: RoundOverReason) -> Vec<GameEvent> {
        self.phase = Phase::RoundOver;
        let final_score = self.round.as_ref().map(|r| r.score).unwrap_or_default();

        let mut events = Vec::new();
        let counts = reason == RoundOverReason::BoundReached
            || self.rules.record_high_score_on_early_end;
        let new_high_score = counts && final_score > self.high_score;

        if new_high_score {
            self.high_score = final_score;
            if let Err(e) = self.persistence.save_high_score(final_score) {
                tracing::warn!("Failed to save high score: {}", e);
                events.push(persistence_unavailable(&e));
            }
        }

        tracing::info!(final_score, high_score = self.high_score, %reason, "round over");
        events.push(GameEvent::RoundOver {
            final_score,
            high_score: self.high_score,
            new_high_score,
            reason,
        });
        events
    }

    fn discard(&mut self) {
        self.round = None;
        self.phase = Phase::NoGame;
    }
}

fn persistence_unavailable(err: &Error) -> GameEvent {
    GameEvent::PersistenceUnavailable {
        message: format!("{}; continuing without high-score memory", err),
    }
}
