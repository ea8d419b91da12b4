//! State management for updown.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture.

mod app_state;
mod chart_state;
mod game_view;

pub use app_state::{AppState, InputMode};
pub use chart_state::ChartState;
pub use game_view::{GameView, GuessOutcome, RoundSummary};

use crate::config::ThemeConfig;
use crate::error::Result;
use crate::game::{ChartSink, Direction, GameEvent, Phase, PresentationSink};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Text input
    SetInputMode(InputMode),
    InputChar(char),
    InputBackspace,
    InputLeft,
    InputRight,
    SubmitInput,

    // Game commands
    SubmitSymbol(String),
    SetApiKey(String),
    Guess(Direction),
    EndGame,
    NewGame,

    // Engine output
    Game(GameEvent),

    // UI actions
    ToggleTheme,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,

    // Error handling
    SetError(String),
    ClearError,

    SetLoading(bool),

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    /// When the notification was created.
    pub shown_at: Instant,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
            shown_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration_secs: 3,
            shown_at: Instant::now(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
            shown_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
            shown_at: Instant::now(),
        }
    }

    /// Whether the notification has been visible for its full duration at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= Duration::from_secs(self.duration_secs)
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Game projection.
    pub game: GameView,
    /// Configured dark palette.
    dark_theme: ThemeConfig,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        rounds_per_game: u32,
        theme: ThemeConfig,
        light_theme: bool,
    ) -> Self {
        let app = AppState {
            light_theme,
            ..AppState::new()
        };
        let palette = if light_theme {
            ThemeConfig::light()
        } else {
            theme.clone()
        };

        Self {
            app,
            game: GameView::new(rounds_per_game, palette),
            dark_theme: theme,
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// The palette currently in use.
    pub fn palette(&self) -> ThemeConfig {
        if self.app.light_theme {
            ThemeConfig::light()
        } else {
            self.dark_theme.clone()
        }
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Text input
            Action::SetInputMode(mode) => {
                self.app.input_mode = mode;
                self.app.clear_input();
            }
            Action::InputChar(c) => self.app.push_char(c),
            Action::InputBackspace => self.app.pop_char(),
            Action::InputLeft => self.app.cursor_left(),
            Action::InputRight => self.app.cursor_right(),
            Action::SubmitInput => self.submit_input(),

            // Game commands are executed by the app; here they only clear stale errors
            Action::SubmitSymbol(_)
            | Action::SetApiKey(_)
            | Action::Guess(_)
            | Action::EndGame
            | Action::NewGame => {
                self.app.error = None;
            }

            Action::Game(event) => self.apply_game_event(event),

            // UI actions
            Action::ToggleTheme => {
                self.app.light_theme = !self.app.light_theme;
                let palette = self.palette();
                self.game.chart.restyle(&palette);
            }
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            // Error handling
            Action::SetError(error) => {
                self.app.error = Some(error);
                self.app.loading = false;
            }
            Action::ClearError => {
                self.app.error = None;
            }

            Action::SetLoading(loading) => {
                self.app.loading = loading;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    fn submit_input(&mut self) {
        let mode = self.app.input_mode;
        let input = self.app.take_input();
        self.app.input_mode = InputMode::Normal;

        let action = match mode {
            InputMode::Normal => return,
            InputMode::Symbol if self.app.loading => {
                self.app.notification = Some(Notification::info("Still loading, please wait"));
                return;
            }
            InputMode::Symbol => Action::SubmitSymbol(input),
            InputMode::ApiKey => Action::SetApiKey(input),
        };

        if let Err(e) = self.dispatch(action) {
            self.app.error = Some(e.to_string());
        }
    }

    /// Bring the projection in line with the engine after a failed command.
    ///
    /// A failed start discards the running game without emitting events, so
    /// a view still showing a game is cleared here.
    pub fn sync_phase(&mut self, engine_phase: Phase) {
        if engine_phase == Phase::NoGame && self.game.phase != Phase::NoGame {
            self.apply_game_event(GameEvent::GameCleared);
        }
    }

    fn apply_game_event(&mut self, event: GameEvent) {
        match &event {
            GameEvent::RoundOver {
                new_high_score: true,
                high_score,
                ..
            } => {
                self.app.notification =
                    Some(Notification::success(format!("New high score: {}", high_score)));
            }
            GameEvent::PersistenceUnavailable { message } => {
                self.app.notification = Some(Notification::warning(message.clone()));
            }
            _ => {}
        }
        self.game.apply(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PricePoint, RoundOverReason, Symbol};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use pretty_assertions::assert_eq;

    fn store() -> (Store, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Store::new(tx, 5, ThemeConfig::default(), false), rx)
    }

    #[test]
    fn test_submit_symbol_input_dispatches() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SetInputMode(InputMode::Symbol));
        for c in "aapl".chars() {
            store.reduce(Action::InputChar(c));
        }
        store.reduce(Action::SubmitInput);

        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(store.app.input_buffer.is_empty());
        match rx.try_recv().unwrap() {
            Action::SubmitSymbol(symbol) => assert_eq!(symbol, "aapl"),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SetLoading(true));
        store.reduce(Action::SetInputMode(InputMode::Symbol));
        store.reduce(Action::InputChar('x'));
        store.reduce(Action::SubmitInput);

        assert!(rx.try_recv().is_err());
        assert!(store.app.notification.is_some());
    }

    #[test]
    fn test_api_key_input_dispatches() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SetInputMode(InputMode::ApiKey));
        store.reduce(Action::InputChar('K'));
        store.reduce(Action::SubmitInput);

        assert!(matches!(rx.try_recv().unwrap(), Action::SetApiKey(k) if k == "K"));
    }

    #[test]
    fn test_toggle_theme_restyles_chart() {
        let (mut store, _rx) = store();
        store.reduce(Action::ToggleTheme);
        assert!(store.app.light_theme);
        assert_eq!(store.game.chart.palette().line, ThemeConfig::light().line);

        store.reduce(Action::ToggleTheme);
        assert_eq!(store.game.chart.palette().line, ThemeConfig::default().line);
    }

    #[test]
    fn test_new_high_score_notifies() {
        let (mut store, _rx) = store();
        store.reduce(Action::Game(GameEvent::RoundOver {
            final_score: 5,
            high_score: 5,
            new_high_score: true,
            reason: RoundOverReason::BoundReached,
        }));

        assert_eq!(store.game.phase, Phase::RoundOver);
        let notification = store.app.notification.unwrap();
        assert_eq!(notification.level, NotificationLevel::Success);
    }

    #[test]
    fn test_error_clears_loading() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetLoading(true));
        store.reduce(Action::SetError("Invalid ticker symbol.".to_string()));
        assert!(!store.app.loading);
        assert_eq!(store.app.error.as_deref(), Some("Invalid ticker symbol."));

        store.reduce(Action::Guess(Direction::Up));
        assert!(store.app.error.is_none());
    }

    fn start_game(store: &mut Store) {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        store.reduce(Action::Game(GameEvent::RoundStarted {
            symbol: Symbol::parse("IBM").unwrap(),
            window: vec![PricePoint::new(date, dec!(180))],
            score: 0,
            high_score: 0,
        }));
    }

    #[test]
    fn test_sync_phase_clears_discarded_game() {
        let (mut store, _rx) = store();
        start_game(&mut store);
        assert!(store.game.controls_enabled());

        store.sync_phase(Phase::NoGame);

        assert_eq!(store.game.phase, Phase::NoGame);
        assert!(!store.game.controls_enabled());
        assert!(store.game.chart.is_empty());
    }

    #[test]
    fn test_sync_phase_keeps_matching_game() {
        let (mut store, _rx) = store();
        start_game(&mut store);

        store.sync_phase(Phase::RoundActive);

        assert_eq!(store.game.phase, Phase::RoundActive);
        assert_eq!(store.game.chart.points().len(), 1);
    }

    #[test]
    fn test_replacing_notification_restarts_its_timer() {
        let (mut store, _rx) = store();
        store.reduce(Action::ShowNotification(Notification::info("API key saved")));
        let first = store.app.notification.clone().unwrap();
        let first_deadline = first.shown_at + Duration::from_secs(first.duration_secs);
        assert!(first.is_expired(first_deadline));

        store.reduce(Action::Game(GameEvent::PersistenceUnavailable {
            message: "cannot write state.json".to_string(),
        }));

        let current = store.app.notification.as_ref().unwrap();
        assert_eq!(current.level, NotificationLevel::Warning);
        assert!(current.shown_at >= first.shown_at);
        assert!(!current.is_expired(first_deadline));
    }
}
