//! Daily closing-price series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Longest accepted ticker.
const MAX_SYMBOL_LEN: usize = 12;

/// A normalized ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Trim and upper-case raw user input.
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_uppercase();

        if symbol.is_empty() {
            return Err(Error::invalid_input("Please enter a ticker symbol."));
        }
        if symbol.len() > MAX_SYMBOL_LEN {
            return Err(Error::invalid_input(format!(
                "Ticker symbols are at most {} characters.",
                MAX_SYMBOL_LEN
            )));
        }
        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(Error::invalid_input(format!(
                "'{}' is not a valid ticker symbol.",
                symbol
            )));
        }

        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One trading day's close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self { date, close }
    }

    /// Close as a float, for plotting.
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or_default()
    }
}

/// Daily closes for one symbol, strictly increasing by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    symbol: Symbol,
    points: Vec<PricePoint>,
}

impl Series {
    /// Build a series from points in any order.
    ///
    /// Points are sorted ascending by date. Duplicate dates, non-positive
    /// closes and empty input are rejected.
    pub fn new(symbol: Symbol, mut points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::invalid_input(format!(
                "Series for {} has no points",
                symbol
            )));
        }

        points.sort_by_key(|p| p.date);

        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(Error::invalid_input(format!(
                "Series for {} repeats date {}",
                symbol, pair[0].date
            )));
        }
        if let Some(point) = points.iter().find(|p| p.close <= Decimal::ZERO) {
            return Err(Error::invalid_input(format!(
                "Series for {} has non-positive close on {}",
                symbol, point.date
            )));
        }

        Ok(Self { symbol, points })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a series holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    /// Index of the point on `date`, if present.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.points.binary_search_by_key(&date, |p| p.date).ok()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    /// Points from `index - lead_in` through `index`, inclusive.
    pub fn window(&self, index: usize, lead_in: usize) -> Option<&[PricePoint]> {
        if index >= self.points.len() || index < lead_in {
            return None;
        }
        Some(&self.points[index - lead_in..=index])
    }
}
