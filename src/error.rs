//! Error types for the updown application.

use thiserror::Error;

/// Failures reported by a series provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider does not know the requested ticker.
    #[error("Invalid ticker symbol.")]
    InvalidSymbol,

    /// The provider refused the request because of its rate limit.
    #[error("API rate limit reached. Please wait and try again.")]
    RateLimited,

    /// The response contained no usable price data.
    #[error("No data available for this ticker.")]
    NoData,

    /// The requested endpoint variant requires a premium plan.
    #[error("This endpoint is not available for the configured API key.")]
    PremiumEndpoint,

    /// Transport or HTTP level failure.
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 429 => Self::RateLimited,
            Some(status) => Self::NetworkError(status.to_string()),
            None => Self::NetworkError(err.to_string()),
        }
    }
}

/// The main error type for updown.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Market data provider errors
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Invalid user input, such as an empty ticker
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The series holds no usable start date for a round
    #[error("{0} Try a different ticker.")]
    InsufficientHistory(String),

    /// A game command was issued in a phase that does not accept it
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Local persistence could not be read or written
    #[error("Persistence unavailable: {0}")]
    Persistence(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new insufficient history error.
    pub fn insufficient_history(msg: impl Into<String>) -> Self {
        Self::InsufficientHistory(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Create a new persistence error.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Provider(_)
                | Self::InvalidInput(_)
                | Self::InsufficientHistory(_)
                | Self::Persistence(_)
                | Self::Channel(_)
        )
    }

    /// Check if this error should be shown to the user.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::InvalidOperation(_))
    }
}
