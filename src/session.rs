//! The user-facing game commands.
//!
//! A [`GameSession`] owns the series provider and the round engine and turns
//! the commands a player can issue into [`GameEvent`]s or errors.

use crate::api::SeriesProvider;
use crate::error::{Error, Result};
use crate::game::{Direction, GameEvent, Phase, RoundEngine, Symbol};
use chrono::{NaiveDate, Utc};

/// Source of the current UTC calendar date.
pub type Clock = fn() -> NaiveDate;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A player's session: one provider, one engine, one game at a time.
pub struct GameSession {
    provider: Box<dyn SeriesProvider>,
    engine: RoundEngine,
    clock: Clock,
    configured_api_key: String,
}

impl GameSession {
    /// Create a session. A saved API key override, if any, is applied to the provider.
    pub fn new(
        mut provider: Box<dyn SeriesProvider>,
        engine: RoundEngine,
        configured_api_key: impl Into<String>,
    ) -> Self {
        match engine.persistence().load_api_key() {
            Ok(Some(key)) => {
                tracing::info!("using saved API key override");
                provider.set_api_key(key);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load API key override: {}", e),
        }

        Self {
            provider,
            engine,
            clock: utc_today,
            configured_api_key: configured_api_key.into(),
        }
    }

    /// Use a fixed clock instead of the system date.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Fetch `raw_symbol` and start a fresh game on it.
    pub async fn submit_symbol(&mut self, raw_symbol: &str) -> Result<Vec<GameEvent>> {
        let symbol = Symbol::parse(raw_symbol)?;
        let series = self.provider.fetch(&symbol).await.map_err(|e| {
            tracing::warn!(%symbol, "fetch failed: {}", e);
            Error::from(e)
        })?;

        tracing::info!(%symbol, points = series.len(), "series loaded");
        self.engine.start_round(series, (self.clock)())
    }

    pub fn guess(&mut self, direction: Direction) -> Result<Vec<GameEvent>> {
        self.engine.guess(direction)
    }

    pub fn end_game(&mut self) -> Result<Vec<GameEvent>> {
        self.engine.end_game()
    }

    pub fn new_game(&mut self) -> Result<Vec<GameEvent>> {
        self.engine.new_game((self.clock)())
    }

    /// Save an API key override and use it from now on.
    ///
    /// A blank key clears the override and restores the configured key.
    /// Returns a warning message when the key could not be saved; the key is
    /// still used for this session in that case.
    pub fn set_api_key(&mut self, raw_key: &str) -> Option<String> {
        let key = raw_key.trim();
        let effective = if key.is_empty() {
            self.configured_api_key.clone()
        } else {
            key.to_string()
        };
        self.provider.set_api_key(effective);

        match self.engine.persistence_mut().save_api_key(key) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("Failed to save API key override: {}", e);
                Some(format!("{}; the key applies to this session only", e))
            }
        }
    }
}
