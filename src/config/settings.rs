//! Configuration settings for updown.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for overrides, e.g. `UPDOWN_API__API_KEY`.
const ENV_PREFIX: &str = "UPDOWN";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// Game rules.
    pub game: GameConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, layered under `UPDOWN_*` environment variables.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);

        let settings = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.game.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Market data API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Alpha Vantage query URL.
    pub base_url: String,
    /// API key used when no override has been saved.
    pub api_key: String,
    /// Primary endpoint function.
    pub function: String,
    /// Endpoint function tried once when the primary yields nothing usable.
    pub fallback_function: String,
    /// `compact` (100 points) or `full`.
    pub output_size: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.alphavantage.co/query".to_string(),
            api_key: "demo".to_string(),
            function: "TIME_SERIES_DAILY_ADJUSTED".to_string(),
            fallback_function: "TIME_SERIES_DAILY".to_string(),
            output_size: "full".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Game rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Guesses per game.
    pub rounds_per_game: u32,
    /// Points shown before the start date.
    pub lead_in: usize,
    /// Closest allowed start date, in days before today.
    pub min_offset_days: i64,
    /// Furthest allowed start date, in days before today.
    pub max_offset_days: i64,
    /// Random draws before falling back to a backward scan.
    pub max_trials: u32,
    /// Compare against the high score when a game ends early.
    pub record_high_score_on_early_end: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds_per_game: 5,
            lead_in: 7,
            min_offset_days: 7,
            max_offset_days: 100,
            max_trials: 200,
            record_high_score_on_early_end: false,
        }
    }
}

impl GameConfig {
    /// Reject rule sets the engine cannot run.
    pub fn validate(&self) -> crate::Result<()> {
        if self.rounds_per_game == 0 {
            return Err(crate::Error::config("game.rounds_per_game must be at least 1"));
        }
        if self.min_offset_days < 0 || self.min_offset_days > self.max_offset_days {
            return Err(crate::Error::config(format!(
                "game offsets must satisfy 0 <= min_offset_days <= max_offset_days (got {} and {})",
                self.min_offset_days, self.max_offset_days
            )));
        }
        Ok(())
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Poll interval in milliseconds for terminal input.
    pub tick_rate_ms: u64,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Start with the light palette.
    pub light_theme: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            show_status_bar: true,
            light_theme: false,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Guess the next close is higher.
    pub guess_up: String,
    /// Guess the next close is lower.
    pub guess_down: String,
    /// End the current game early.
    pub end_game: String,
    /// Start a new game on the loaded series.
    pub new_game: String,
    /// Enter a ticker symbol.
    pub symbol: String,
    /// Enter an API key override.
    pub api_key: String,
    /// Switch between dark and light palettes.
    pub theme: String,
    /// Submit typed input.
    pub select: String,
    /// Cancel/back.
    pub back: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            guess_up: "u".to_string(),
            guess_down: "d".to_string(),
            end_game: "e".to_string(),
            new_game: "n".to_string(),
            symbol: "s".to_string(),
            api_key: "k".to_string(),
            theme: "t".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Price line color (hex).
    pub line: String,
    /// Accent color (hex).
    pub accent: String,
    /// Success color (hex).
    pub success: String,
    /// Warning color (hex).
    pub warning: String,
    /// Error color (hex).
    pub error: String,
    /// Axis label color (hex).
    pub axis: String,
    /// Background color (hex).
    pub background: String,
    /// Foreground/text color (hex).
    pub foreground: String,
    /// Border color (hex).
    pub border: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            line: "#4f8cff".to_string(),
            accent: "#ff7043".to_string(),
            success: "#66bb6a".to_string(),
            warning: "#ffa726".to_string(),
            error: "#ef5350".to_string(),
            axis: "#9aa4b2".to_string(),
            background: "#1e1e2e".to_string(),
            foreground: "#e6edf3".to_string(),
            border: "#45475a".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Built-in palette for light terminals.
    pub fn light() -> Self {
        Self {
            line: "#1f5fd1".to_string(),
            accent: "#d84315".to_string(),
            success: "#2e7d32".to_string(),
            warning: "#ef6c00".to_string(),
            error: "#c62828".to_string(),
            axis: "#57606a".to_string(),
            background: "#ffffff".to_string(),
            foreground: "#1f2328".to_string(),
            border: "#d0d7de".to_string(),
        }
    }
}
