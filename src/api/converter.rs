//! Conversion from Alpha Vantage responses to game types.

use crate::error::ProviderError;
use crate::game::{PricePoint, Series, Symbol};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Object holding the daily bars in both endpoint variants.
const DAILY_SERIES_KEY: &str = "Time Series (Daily)";
/// Field holding the unadjusted close.
const CLOSE_KEY: &str = "4. close";

/// Converts Alpha Vantage JSON into game types.
pub struct DataConverter;

impl DataConverter {
    /// Map the error envelopes Alpha Vantage returns with HTTP 200.
    pub fn check_envelope(json: &Value) -> Result<(), ProviderError> {
        if json.get("Error Message").is_some() {
            return Err(ProviderError::InvalidSymbol);
        }
        if json.get("Note").is_some() {
            return Err(ProviderError::RateLimited);
        }
        if let Some(info) = json.get("Information") {
            let text = info.as_str().unwrap_or_default().to_lowercase();
            if text.contains("rate limit") || text.contains("requests per") {
                return Err(ProviderError::RateLimited);
            }
            // Typically a premium-only endpoint notice
            if json.get(DAILY_SERIES_KEY).is_none() {
                return Err(ProviderError::PremiumEndpoint);
            }
        }
        Ok(())
    }

    /// Parse a daily time series response into a [`Series`].
    pub fn convert_daily_series(symbol: &Symbol, json: &Value) -> Result<Series, ProviderError> {
        Self::check_envelope(json)?;

        let Some(entries) = json.get(DAILY_SERIES_KEY).and_then(Value::as_object) else {
            return Err(ProviderError::NoData);
        };

        let points: Vec<PricePoint> = entries
            .iter()
            .filter_map(|(date, bar)| Self::convert_point(date, bar))
            .collect();

        if points.len() < entries.len() {
            tracing::warn!(
                %symbol,
                skipped = entries.len() - points.len(),
                "skipped unparseable daily bars"
            );
        }
        if points.is_empty() {
            return Err(ProviderError::NoData);
        }

        // Keys of a JSON object are unique, so only malformed data can fail here
        Series::new(symbol.clone(), points).map_err(|e| {
            tracing::warn!(%symbol, "rejected series: {}", e);
            ProviderError::NoData
        })
    }

    /// Convert one `"YYYY-MM-DD": { "4. close": "123.45", ... }` entry.
    pub fn convert_point(date: &str, bar: &Value) -> Option<PricePoint> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        let close = match bar.get(CLOSE_KEY)? {
            Value::String(s) => Decimal::from_str(s.trim()).ok()?,
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
            _ => return None,
        };
        (close > Decimal::ZERO).then_some(PricePoint::new(date, close))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn symbol() -> Symbol {
        Symbol::parse("IBM").unwrap()
    }

    fn sample() -> Value {
        json!({
            "Meta Data": { "2. Symbol": "IBM" },
            "Time Series (Daily)": {
                "2024-06-14": { "1. open": "169.0", "4. close": "169.21", "5. volume": "1" },
                "2024-06-12": { "4. close": "169.00" },
                "2024-06-13": { "4. close": "169.12" }
            }
        })
    }

    #[test]
    fn test_convert_sorts_ascending() {
        let series = DataConverter::convert_daily_series(&symbol(), &sample()).unwrap();

        let closes: Vec<_> = series.points().iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![dec!(169.00), dec!(169.12), dec!(169.21)]);
        assert_eq!(
            series.first().date,
            NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
        );
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let json = json!({
            "Time Series (Daily)": {
                "2024-06-14": { "4. close": "169.21" },
                "2024-06-13": { "4. close": "n/a" },
                "not-a-date": { "4. close": "1.0" },
                "2024-06-11": { "4. close": "0" },
                "2024-06-10": { "1. open": "12" }
            }
        });
        let series = DataConverter::convert_daily_series(&symbol(), &json).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_error_message_is_invalid_symbol() {
        let json = json!({ "Error Message": "Invalid API call." });
        assert_eq!(
            DataConverter::convert_daily_series(&symbol(), &json),
            Err(ProviderError::InvalidSymbol)
        );
    }

    #[test]
    fn test_note_is_rate_limited() {
        let json = json!({
            "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
        });
        assert_eq!(
            DataConverter::check_envelope(&json),
            Err(ProviderError::RateLimited)
        );
    }

    #[test]
    fn test_information_rate_limit() {
        let json = json!({
            "Information": "We have detected your API key and our standard API rate limit is 25 requests per day."
        });
        assert_eq!(
            DataConverter::check_envelope(&json),
            Err(ProviderError::RateLimited)
        );
    }

    #[test]
    fn test_information_premium() {
        let json = json!({
            "Information": "Thank you for using Alpha Vantage! This is a premium endpoint."
        });
        assert_eq!(
            DataConverter::check_envelope(&json),
            Err(ProviderError::PremiumEndpoint)
        );
    }

    #[test]
    fn test_missing_series_is_no_data() {
        assert_eq!(
            DataConverter::convert_daily_series(&symbol(), &json!({})),
            Err(ProviderError::NoData)
        );
        assert_eq!(
            DataConverter::convert_daily_series(&symbol(), &json!({ "Time Series (Daily)": {} })),
            Err(ProviderError::NoData)
        );
    }
}
