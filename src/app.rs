//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, the game session, and rendering.

use crate::api::ApiClientBuilder;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::EventHandler;
use crate::game::{GameEvent, RoundEngine};
use crate::session::GameSession;
use crate::state::{Action, Notification, Store};
use crate::storage::{FileStore, Persistence};
use crate::ui::Ui;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Provider plus round engine.
    session: GameSession,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        // Build everything fallible before touching the terminal
        let client = ApiClientBuilder::new().config(config.api.clone()).build()?;

        let (persistence, storage_warning) = match FileStore::in_data_dir() {
            Ok(store) => {
                tracing::info!(path = %store.path().display(), "using file store");
                (Persistence::new(store), None)
            }
            Err(e) => {
                tracing::warn!("Falling back to in-memory storage: {}", e);
                (
                    Persistence::in_memory(),
                    Some(format!("{}; scores will not be kept", e)),
                )
            }
        };

        let engine = RoundEngine::new(config.game.clone(), persistence);
        let session = GameSession::new(Box::new(client), engine, config.api.api_key.clone());

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut store = Store::new(
            action_tx,
            config.game.rounds_per_game,
            config.theme.clone(),
            config.ui.light_theme,
        );
        if let Some(warning) = storage_warning {
            store.reduce(Action::ShowNotification(Notification::warning(warning)));
        }

        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms),
        );

        let terminal = setup_terminal()?;

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            session,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("updown started");

        loop {
            self.expire_notification();

            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            self.draw()?;

            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action).await?;
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await?;
                }
            }

            if self.store.app.should_quit {
                break;
            }
        }

        tracing::info!("updown exiting");
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let store = &self.store;
        let config = &self.config;
        self.terminal.draw(|frame| {
            Ui::render(frame, store, &config.ui, &config.keybindings);
        })?;
        Ok(())
    }

    /// Drop a notification once its duration has passed.
    fn expire_notification(&mut self) {
        let expired = self
            .store
            .app
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(Instant::now()));
        if expired {
            self.store.reduce(Action::DismissNotification);
        }
    }

    /// Handle an action.
    async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::SubmitSymbol(raw) => {
                self.store.reduce(Action::SubmitSymbol(raw.clone()));
                self.store.reduce(Action::SetLoading(true));
                self.draw()?;

                let result = self.session.submit_symbol(&raw).await;
                self.store.reduce(Action::SetLoading(false));
                self.apply_result(result);
            }
            Action::Guess(direction) => {
                self.store.reduce(Action::Guess(direction));
                let result = self.session.guess(direction);
                self.apply_result(result);
            }
            Action::EndGame => {
                self.store.reduce(Action::EndGame);
                let result = self.session.end_game();
                self.apply_result(result);
            }
            Action::NewGame => {
                self.store.reduce(Action::NewGame);
                let result = self.session.new_game();
                self.apply_result(result);
            }
            Action::SetApiKey(raw) => {
                self.store.reduce(Action::ClearError);
                let notification = match self.session.set_api_key(&raw) {
                    Some(warning) => Notification::warning(warning),
                    None if raw.trim().is_empty() => {
                        Notification::info("API key reset to the configured default")
                    }
                    None => Notification::success("API key saved"),
                };
                self.store.reduce(Action::ShowNotification(notification));
            }
            other => {
                // Let the store handle the action
                self.store.reduce(other);
            }
        }

        Ok(())
    }

    /// Feed engine events to the store, or surface the error.
    fn apply_result(&mut self, result: Result<Vec<GameEvent>>) {
        match result {
            Ok(events) => {
                for event in events {
                    self.store.reduce(Action::Game(event));
                }
            }
            Err(e) => {
                // A failed start may have discarded the running game
                self.store.sync_phase(self.session.phase());
                self.report(e);
            }
        }
    }

    fn report(&mut self, error: Error) {
        if error.is_user_facing() {
            tracing::warn!("{}", error);
            self.store.reduce(Action::SetError(error.to_string()));
        } else {
            tracing::debug!("ignored: {}", error);
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(|e| Error::terminal(format!("cannot enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| Error::terminal(format!("cannot enter alternate screen: {}", e)))?;
    Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| Error::terminal(format!("cannot initialize terminal: {}", e)))
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
