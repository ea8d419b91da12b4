//! Alpha Vantage client.

use super::{DataConverter, SeriesProvider};
use crate::config::ApiConfig;
use crate::error::{ProviderError, Result};
use crate::game::{Series, Symbol};
use async_trait::async_trait;
use std::time::Duration;

/// Builder for creating an Alpha Vantage client.
pub struct ApiClientBuilder {
    config: ApiConfig,
    api_key: Option<String>,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            api_key: None,
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this key instead of the configured one.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AlphaVantageClient> {
        let mut client = AlphaVantageClient::new(self.config)?;
        if let Some(key) = self.api_key {
            client.api_key = key;
        }
        Ok(client)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches daily closes from Alpha Vantage.
///
/// The configured primary endpoint is tried first. If it answers with a
/// premium notice or without any bars, the fallback endpoint is tried once.
pub struct AlphaVantageClient {
    config: ApiConfig,
    api_key: String,
    http: reqwest::Client,
}

impl AlphaVantageClient {
    /// Create a new client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ProviderError::from)?;

        Ok(Self {
            api_key: config.api_key.clone(),
            config,
            http,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Whether a primary-endpoint failure warrants the fallback endpoint.
    pub fn should_fall_back(err: &ProviderError) -> bool {
        matches!(err, ProviderError::PremiumEndpoint | ProviderError::NoData)
    }

    /// Query parameters for one endpoint variant.
    pub fn query<'a>(&'a self, function: &'a str, symbol: &'a Symbol) -> [(&'a str, &'a str); 4] {
        [
            ("function", function),
            ("symbol", symbol.as_str()),
            ("outputsize", self.config.output_size.as_str()),
            ("apikey", self.api_key.as_str()),
        ]
    }

    async fn fetch_variant(
        &self,
        function: &str,
        symbol: &Symbol,
    ) -> std::result::Result<Series, ProviderError> {
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&self.query(function, symbol))
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProviderError::NetworkError(status.to_string()));
        }

        let json: serde_json::Value = response.json().await?;
        DataConverter::convert_daily_series(symbol, &json)
    }
}

#[async_trait]
impl SeriesProvider for AlphaVantageClient {
    async fn fetch(&self, symbol: &Symbol) -> std::result::Result<Series, ProviderError> {
        tracing::info!(%symbol, function = %self.config.function, "fetching daily series");

        match self.fetch_variant(&self.config.function, symbol).await {
            Err(e) if Self::should_fall_back(&e) => {
                tracing::debug!(
                    %symbol,
                    error = %e,
                    fallback = %self.config.fallback_function,
                    "primary endpoint unusable, trying fallback"
                );
                self.fetch_variant(&self.config.fallback_function, symbol)
                    .await
                    .map_err(|e| match e {
                        // The fallback is the free endpoint, so a premium notice means no data
                        ProviderError::PremiumEndpoint => ProviderError::NoData,
                        other => other,
                    })
            }
            result => result,
        }
    }

    fn set_api_key(&mut self, key: String) {
        self.api_key = key;
    }
}
