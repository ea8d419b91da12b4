//! Market data integration.
//!
//! This module defines the [`SeriesProvider`] boundary the game fetches
//! prices through, and its Alpha Vantage implementation.

mod client;
mod converter;

pub use client::{AlphaVantageClient, ApiClientBuilder};
pub use converter::DataConverter;

use crate::error::ProviderError;
use crate::game::{Series, Symbol};
use async_trait::async_trait;

/// Source of daily closing prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Fetch the full daily series for `symbol`, ascending by date.
    async fn fetch(&self, symbol: &Symbol) -> Result<Series, ProviderError>;

    /// Replace the API key used for subsequent requests.
    fn set_api_key(&mut self, key: String);
}
