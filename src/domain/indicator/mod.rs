//! Incremental technical indicators.
//!
//! Indicators are rolling computations fed one bar at a time. [`Indicator::update`]
//! returns `None` until the warmup window has filled; strategies must treat
//! `None` as "no signal", never as zero.

pub mod crossover;
pub mod sma;

pub use crossover::{Cross, SmaCrossover};
pub use sma::Sma;

use crate::domain::ohlcv::OhlcvBar;

pub trait Indicator {
    type Output;

    /// Feed the next bar in chronological order.
    fn update(&mut self, bar: &OhlcvBar) -> Option<Self::Output>;
}
