//! Plot data behind the price chart widget.

use crate::config::ThemeConfig;
use crate::game::{ChartSink, PricePoint};

/// The revealed points and the colors to draw them with.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    points: Vec<PricePoint>,
    palette: ThemeConfig,
}

impl ChartState {
    pub fn new(palette: ThemeConfig) -> Self {
        Self {
            points: Vec::new(),
            palette,
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn palette(&self) -> &ThemeConfig {
        &self.palette
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(x, close)` pairs with x the position in the window.
    pub fn data(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.close_f64()))
            .collect()
    }

    /// X axis bounds covering every point.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.points.len().saturating_sub(1).max(1) as f64]
    }

    /// Y axis bounds with a little headroom above and below.
    pub fn y_bounds(&self) -> [f64; 2] {
        let closes = self.points.iter().map(PricePoint::close_f64);
        let min = closes.clone().fold(f64::INFINITY, f64::min);
        let max = closes.fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }
        let pad = ((max - min) * 0.1).max(max.abs() * 0.005).max(0.01);
        [(min - pad).max(0.0), max + pad]
    }
}

impl ChartSink for ChartState {
    fn render(&mut self, window: &[PricePoint]) {
        self.points = window.to_vec();
    }

    fn append(&mut self, point: &PricePoint) {
        self.points.push(*point);
    }

    fn restyle(&mut self, palette: &ThemeConfig) {
        self.palette = palette.clone();
    }
}
