//! Crossover of a fast and a slow moving average.
//!
//! Not ready until both averages are ready. A cross only registers on a
//! strictly signed fast-minus-slow difference; equality reports [`Cross::Neutral`].
//! The first ready bar compares against a flat baseline, so a series that is
//! already trending when the windows fill registers its cross immediately.

use crate::domain::indicator::sma::Sma;
use crate::domain::indicator::Indicator;
use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cross {
    /// Fast average moved strictly above the slow average this bar.
    Up,
    /// Fast average moved strictly below the slow average this bar.
    Down,
    /// No cross this bar.
    Neutral,
}

#[derive(Debug, Clone)]
pub struct SmaCrossover {
    fast: Sma,
    slow: Sma,
    prev_diff: Option<f64>,
}

impl SmaCrossover {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        SmaCrossover {
            fast: Sma::new(fast_period),
            slow: Sma::new(slow_period),
            prev_diff: None,
        }
    }
}

impl Indicator for SmaCrossover {
    type Output = Cross;

    fn update(&mut self, bar: &OhlcvBar) -> Option<Cross> {
        let fast = self.fast.update(bar);
        let slow = self.slow.update(bar);

        let (Some(fast), Some(slow)) = (fast, slow) else {
            return None;
        };

        let diff = fast - slow;
        let prev = self.prev_diff.unwrap_or(0.0);
        self.prev_diff = Some(diff);

        let cross = if diff > 0.0 && prev <= 0.0 {
            Cross::Up
        } else if diff < 0.0 && prev >= 0.0 {
            Cross::Down
        } else {
            Cross::Neutral
        };
        Some(cross)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn feed(crossover: &mut SmaCrossover, prices: &[f64]) -> Vec<Option<Cross>> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let bar = OhlcvBar {
                    symbol: "TEST".into(),
                    date: NaiveDate::from_ymd_opt(2024, 1, 1)
                        .unwrap()
                        .checked_add_days(chrono::Days::new(i as u64))
                        .unwrap(),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1000.0,
                };
                crossover.update(&bar)
            })
            .collect()
    }

    #[test]
    fn not_ready_until_slow_window_fills() {
        let mut crossover = SmaCrossover::new(2, 4);
        let signals = feed(&mut crossover, &[10.0, 10.0, 10.0, 10.0, 10.0]);

        assert_eq!(signals[0], None);
        assert_eq!(signals[1], None);
        assert_eq!(signals[2], None);
        assert_eq!(signals[3], Some(Cross::Neutral));
        assert_eq!(signals[4], Some(Cross::Neutral));
    }

    #[test]
    fn up_cross_on_strict_inequality() {
        let mut crossover = SmaCrossover::new(1, 2);
        // fast = close, slow = 2-bar avg; fast pulls above slow on the rise
        let signals = feed(&mut crossover, &[10.0, 10.0, 10.0, 20.0, 30.0]);

        assert_eq!(signals[1], Some(Cross::Neutral));
        assert_eq!(signals[2], Some(Cross::Neutral));
        assert_eq!(signals[3], Some(Cross::Up));
        // still above: no second cross
        assert_eq!(signals[4], Some(Cross::Neutral));
    }

    #[test]
    fn down_cross_after_up_cross() {
        let mut crossover = SmaCrossover::new(1, 2);
        let signals = feed(&mut crossover, &[10.0, 10.0, 20.0, 30.0, 10.0, 5.0]);

        assert_eq!(signals[2], Some(Cross::Up));
        assert_eq!(signals[4], Some(Cross::Down));
        assert_eq!(signals[5], Some(Cross::Neutral));
    }

    #[test]
    fn equality_is_not_a_cross() {
        let mut crossover = SmaCrossover::new(1, 2);
        // constant series keeps fast == slow forever
        let signals = feed(&mut crossover, &[10.0, 10.0, 10.0, 10.0]);

        for signal in &signals[1..] {
            assert_eq!(*signal, Some(Cross::Neutral));
        }
    }

    #[test]
    fn trending_series_crosses_at_readiness() {
        let mut crossover = SmaCrossover::new(2, 3);
        // rising from the start: first ready bar is already fast > slow
        let signals = feed(&mut crossover, &[10.0, 20.0, 30.0, 40.0]);

        assert_eq!(signals[2], Some(Cross::Up));
        assert_eq!(signals[3], Some(Cross::Neutral));
    }
}
