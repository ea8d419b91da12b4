//! Event handler for processing input events.

use super::InputEvent;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::game::{Direction, Phase};
use crate::state::{Action, InputMode, Store};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// How long to wait for input before returning.
    poll_timeout: Duration,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoreSnapshot {
    input_mode: InputMode,
    phase: Phase,
    loading: bool,
    show_help: bool,
    has_error: bool,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(keybindings: KeyBindings, poll_timeout: Duration) -> Self {
        Self {
            keybindings,
            poll_timeout,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            phase: store.game.phase,
            loading: store.app.loading,
            show_help: store.app.show_help,
            has_error: store.app.error.is_some(),
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.poll_timeout)? {
            if let CrosstermEvent::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
            // Resize and other events only need a redraw
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot?;
        let input = InputEvent::from(key);

        if input.matches("Ctrl+c") {
            return Some(Action::Quit);
        }

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(input, snapshot),
            InputMode::Symbol | InputMode::ApiKey => self.handle_text_mode(input),
        }
    }

    fn handle_normal_mode(&self, input: InputEvent, snapshot: StoreSnapshot) -> Option<Action> {
        let keys = &self.keybindings;

        if input.matches(&keys.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&keys.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&keys.back) {
            return Some(if snapshot.show_help {
                Action::ToggleHelp
            } else if snapshot.has_error {
                Action::ClearError
            } else {
                Action::DismissNotification
            });
        }
        if input.matches(&keys.theme) {
            return Some(Action::ToggleTheme);
        }
        if input.matches(&keys.api_key) {
            return Some(Action::SetInputMode(InputMode::ApiKey));
        }
        if input.matches(&keys.symbol) && !snapshot.loading {
            return Some(Action::SetInputMode(InputMode::Symbol));
        }

        // Game controls are only live in the phase that accepts them
        match snapshot.phase {
            Phase::RoundActive => {
                if input.matches(&keys.guess_up) || input.matches("Up") {
                    return Some(Action::Guess(Direction::Up));
                }
                if input.matches(&keys.guess_down) || input.matches("Down") {
                    return Some(Action::Guess(Direction::Down));
                }
                if input.matches(&keys.end_game) {
                    return Some(Action::EndGame);
                }
            }
            Phase::RoundOver => {
                if input.matches(&keys.new_game) {
                    return Some(Action::NewGame);
                }
            }
            Phase::NoGame => {}
        }

        None
    }

    fn handle_text_mode(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.back) {
            return Some(Action::SetInputMode(InputMode::Normal));
        }
        if input.matches(&self.keybindings.select) {
            return Some(Action::SubmitInput);
        }
        if input.matches("Backspace") {
            return Some(Action::InputBackspace);
        }
        if input.matches("Left") {
            return Some(Action::InputLeft);
        }
        if input.matches("Right") {
            return Some(Action::InputRight);
        }
        input.text().map(Action::InputChar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn handler(snapshot: StoreSnapshot) -> EventHandler {
        let mut handler = EventHandler::new(KeyBindings::default(), Duration::from_millis(10));
        handler.store_snapshot = Some(snapshot);
        handler
    }

    fn snapshot(phase: Phase) -> StoreSnapshot {
        StoreSnapshot {
            input_mode: InputMode::Normal,
            phase,
            loading: false,
            show_help: false,
            has_error: false,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_guess_keys_only_in_active_round() {
        let active = handler(snapshot(Phase::RoundActive));
        assert!(matches!(
            active.handle_key(press(KeyCode::Char('u'))),
            Some(Action::Guess(Direction::Up))
        ));
        assert!(matches!(
            active.handle_key(press(KeyCode::Down)),
            Some(Action::Guess(Direction::Down))
        ));
        assert!(matches!(
            active.handle_key(press(KeyCode::Char('e'))),
            Some(Action::EndGame)
        ));
        assert!(active.handle_key(press(KeyCode::Char('n'))).is_none());

        let idle = handler(snapshot(Phase::NoGame));
        assert!(idle.handle_key(press(KeyCode::Char('u'))).is_none());
        assert!(idle.handle_key(press(KeyCode::Char('e'))).is_none());
    }

    #[test]
    fn test_new_game_only_after_round_over() {
        let over = handler(snapshot(Phase::RoundOver));
        assert!(matches!(
            over.handle_key(press(KeyCode::Char('n'))),
            Some(Action::NewGame)
        ));
        assert!(over.handle_key(press(KeyCode::Char('d'))).is_none());
    }

    #[test]
    fn test_symbol_entry_blocked_while_loading() {
        let loading = handler(StoreSnapshot {
            loading: true,
            ..snapshot(Phase::NoGame)
        });
        assert!(loading.handle_key(press(KeyCode::Char('s'))).is_none());

        let idle = handler(snapshot(Phase::NoGame));
        assert!(matches!(
            idle.handle_key(press(KeyCode::Char('s'))),
            Some(Action::SetInputMode(InputMode::Symbol))
        ));
    }

    #[test]
    fn test_text_mode_types_game_keys() {
        let typing = handler(StoreSnapshot {
            input_mode: InputMode::Symbol,
            ..snapshot(Phase::RoundActive)
        });
        assert!(matches!(
            typing.handle_key(press(KeyCode::Char('u'))),
            Some(Action::InputChar('u'))
        ));
        assert!(matches!(
            typing.handle_key(press(KeyCode::Enter)),
            Some(Action::SubmitInput)
        ));
        assert!(matches!(
            typing.handle_key(press(KeyCode::Esc)),
            Some(Action::SetInputMode(InputMode::Normal))
        ));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let typing = handler(StoreSnapshot {
            input_mode: InputMode::ApiKey,
            ..snapshot(Phase::NoGame)
        });
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(typing.handle_key(key), Some(Action::Quit)));
    }

    #[test]
    fn test_escape_closes_help_first() {
        let help = handler(StoreSnapshot {
            show_help: true,
            has_error: true,
            ..snapshot(Phase::NoGame)
        });
        assert!(matches!(
            help.handle_key(press(KeyCode::Esc)),
            Some(Action::ToggleHelp)
        ));

        let error = handler(StoreSnapshot {
            has_error: true,
            ..snapshot(Phase::NoGame)
        });
        assert!(matches!(
            error.handle_key(press(KeyCode::Esc)),
            Some(Action::ClearError)
        ));
    }
}
