//! Application-level state.

use super::Notification;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a ticker symbol.
    Symbol,
    /// Typing an API key override.
    ApiKey,
}

impl InputMode {
    /// Prompt shown in front of the input buffer.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Symbol => "Ticker: ",
            Self::ApiKey => "API key (empty to clear): ",
        }
    }
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Current error message.
    pub error: Option<String>,
    /// Whether a series fetch is in flight.
    pub loading: bool,
    /// Whether the light palette is active.
    pub light_theme: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current text input.
    pub input_buffer: String,
    /// Cursor position in input buffer, in characters.
    pub cursor_position: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        matches!(self.input_mode, InputMode::Symbol | InputMode::ApiKey)
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Take the buffer contents, leaving it empty.
    pub fn take_input(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.input_buffer)
    }

    /// Add a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_position);
        self.input_buffer.insert(at, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_offset(self.cursor_position);
            self.input_buffer.remove(at);
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.input_buffer
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_buffer() {
        let mut state = AppState::new();
        for c in "ibx".chars() {
            state.push_char(c);
        }
        state.pop_char();
        state.push_char('m');
        assert_eq!(state.input_buffer, "ibm");

        state.cursor_left();
        state.cursor_left();
        state.push_char('_');
        assert_eq!(state.input_buffer, "i_bm");

        assert_eq!(state.take_input(), "i_bm");
        assert!(state.input_buffer.is_empty());
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut state = AppState::new();
        state.cursor_left();
        assert_eq!(state.cursor_position, 0);
        state.push_char('é');
        state.cursor_right();
        assert_eq!(state.cursor_position, 1);
        state.pop_char();
        assert!(state.input_buffer.is_empty());
    }
}
