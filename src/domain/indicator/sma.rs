//! Simple Moving Average over closing prices.
//!
//! Warmup: not ready until `period` bars have been observed.

use std::collections::VecDeque;

use crate::domain::indicator::Indicator;
use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Sma {
            period,
            window: VecDeque::with_capacity(period),
            sum: 0.0,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn update(&mut self, bar: &OhlcvBar) -> Option<f64> {
        // period 0 can never fill a window
        if self.period == 0 {
            return None;
        }

        self.window.push_back(bar.close);
        self.sum += bar.close;
        if self.window.len() > self.period {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
            }
        }

        if self.window.len() == self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }
}
