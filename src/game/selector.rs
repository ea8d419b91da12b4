//! Random start-date selection.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;

use super::Series;
use crate::config::GameConfig;

/// Picks the date a round starts from.
///
/// A candidate must be a weekday, lie between `min_offset_days` and
/// `max_offset_days` calendar days before `today` (both inclusive), and be
/// present in the series. Random offsets are tried first because the series
/// may have holes the calendar cannot predict; if every draw misses, the
/// latest qualifying date in the series is used instead.
#[derive(Debug, Clone)]
pub struct DateSelector {
    min_offset_days: i64,
    max_offset_days: i64,
    max_trials: u32,
}

impl Default for DateSelector {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl DateSelector {
    pub fn new(min_offset_days: i64, max_offset_days: i64, max_trials: u32) -> Self {
        Self {
            min_offset_days,
            max_offset_days,
            max_trials,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.min_offset_days,
            config.max_offset_days,
            config.max_trials,
        )
    }

    /// Select a start date, or `None` when no date in the series qualifies.
    pub fn select<R: Rng + ?Sized>(
        &self,
        series: &Series,
        today: NaiveDate,
        rng: &mut R,
    ) -> Option<NaiveDate> {
        for _ in 0..self.max_trials {
            let offset = rng.gen_range(self.min_offset_days..=self.max_offset_days);
            let candidate = today - Duration::days(offset);
            if is_weekday(candidate) && series.contains(candidate) {
                return Some(candidate);
            }
        }

        tracing::debug!(
            symbol = %series.symbol(),
            trials = self.max_trials,
            "random start date draws missed, scanning series"
        );
        self.latest_qualifying(series, today)
    }

    /// Latest series date satisfying the weekday and range constraints.
    pub fn latest_qualifying(&self, series: &Series, today: NaiveDate) -> Option<NaiveDate> {
        series
            .points()
            .iter()
            .rev()
            .map(|p| p.date)
            .find(|&d| is_weekday(d) && self.in_range(d, today))
    }

    /// Whether `date` lies inside the allowed offset range.
    pub fn in_range(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let earliest = today - Duration::days(self.max_offset_days);
        let latest = today - Duration::days(self.min_offset_days);
        date >= earliest && date <= latest
    }
}

/// Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PricePoint, Symbol};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        // A Friday
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    /// Every calendar day from `today - span` to `today`.
    fn daily_series(span: i64) -> Series {
        let points = (0..=span)
            .rev()
            .map(|back| PricePoint::new(today() - Duration::days(back), Decimal::from(100 + back)))
            .collect();
        Series::new(Symbol::parse("TEST").unwrap(), points).unwrap()
    }

    /// Weekdays only, from `today - span` to `today`.
    fn trading_series(span: i64) -> Series {
        let points = (0..=span)
            .rev()
            .map(|back| today() - Duration::days(back))
            .filter(|d| is_weekday(*d))
            .map(|d| PricePoint::new(d, Decimal::from(50)))
            .collect();
        Series::new(Symbol::parse("TEST").unwrap(), points).unwrap()
    }

    #[test]
    fn test_is_weekday() {
        assert!(is_weekday(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()));
        assert!(!is_weekday(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
        assert!(!is_weekday(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()));
        assert!(is_weekday(NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()));
    }

    #[test]
    fn test_selected_date_satisfies_constraints() {
        let selector = DateSelector::default();
        let series = trading_series(200);

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = selector.select(&series, today(), &mut rng).unwrap();

            assert!(is_weekday(picked), "seed {seed}: {picked} is a weekend");
            assert!(series.contains(picked), "seed {seed}: {picked} not in series");
            let offset = (today() - picked).num_days();
            assert!((7..=100).contains(&offset), "seed {seed}: offset {offset}");
        }
    }

    #[test]
    fn test_weekend_entries_are_never_picked() {
        // Calendar-daily data includes weekends that must still be skipped
        let selector = DateSelector::default();
        let series = daily_series(150);

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = selector.select(&series, today(), &mut rng).unwrap();
            assert!(is_weekday(picked));
        }
    }

    #[test]
    fn test_fallback_returns_latest_qualifying_date() {
        // No random draws at all forces the backward scan
        let selector = DateSelector::new(7, 100, 0);
        let series = trading_series(200);
        let mut rng = StdRng::seed_from_u64(1);

        let picked = selector.select(&series, today(), &mut rng).unwrap();

        // today - 7 is Friday 2024-06-07, the latest allowed weekday
        assert_eq!(picked, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
    }

    #[test]
    fn test_fallback_skips_gaps() {
        let selector = DateSelector::new(7, 100, 0);
        let holiday = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let points = trading_series(200)
            .points()
            .iter()
            .copied()
            .filter(|p| p.date != holiday)
            .collect();
        let series = Series::new(Symbol::parse("TEST").unwrap(), points).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let picked = selector.select(&series, today(), &mut rng).unwrap();
        assert_eq!(picked, NaiveDate::from_ymd_opt(2024, 6, 6).unwrap());
    }

    #[test]
    fn test_not_found_when_series_outside_range() {
        let selector = DateSelector::default();
        // Only the last six days: all too recent
        let series = trading_series(6);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(selector.select(&series, today(), &mut rng), None);
    }

    #[test]
    fn test_not_found_when_series_is_too_old() {
        let selector = DateSelector::default();
        let old = today() - Duration::days(400);
        let points = (0..30)
            .map(|i| PricePoint::new(old + Duration::days(i), Decimal::from(10)))
            .collect();
        let series = Series::new(Symbol::parse("OLD").unwrap(), points).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(selector.select(&series, today(), &mut rng), None);
    }

    #[test]
    fn test_same_seed_same_date() {
        let selector = DateSelector::default();
        let series = trading_series(200);

        let a = selector.select(&series, today(), &mut StdRng::seed_from_u64(42));
        let b = selector.select(&series, today(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let selector = DateSelector::default();
        assert!(selector.in_range(today() - Duration::days(7), today()));
        assert!(selector.in_range(today() - Duration::days(100), today()));
        assert!(!selector.in_range(today() - Duration::days(6), today()));
        assert!(!selector.in_range(today() - Duration::days(101), today()));
    }
}
