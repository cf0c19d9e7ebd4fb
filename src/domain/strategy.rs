//! Strategy decision contract and the reference crossover strategy.
//!
//! A strategy observes one bar at a time plus the current position and emits
//! at most one [`Intent`]. Strategies own their indicator state, so a fresh
//! strategy value is built per run.

use crate::domain::error::TradesimError;
use crate::domain::indicator::{Cross, Indicator, SmaCrossover};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::position::Position;

/// A strategy's requested action for the current bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Buy { quantity: i64 },
    Sell,
    Hold,
}

pub trait Strategy: std::fmt::Debug {
    fn name(&self) -> &str;

    /// Per-bar decision: current bar in, at most one intent out.
    fn on_bar(&mut self, bar: &OhlcvBar, position: Option<&Position>) -> Intent;
}

/// Descriptor for constructing a strategy, as collected from config or a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySpec {
    pub name: String,
    pub fast_period: usize,
    pub slow_period: usize,
    pub quantity: i64,
}

impl Default for StrategySpec {
    fn default() -> Self {
        StrategySpec {
            name: "sma_cross".into(),
            fast_period: 10,
            slow_period: 30,
            quantity: 1,
        }
    }
}

/// Build a strategy from its descriptor.
pub fn build_strategy(spec: &StrategySpec) -> Result<Box<dyn Strategy>, TradesimError> {
    match spec.name.as_str() {
        "sma_cross" => {
            if spec.fast_period == 0 || spec.slow_period == 0 {
                return Err(TradesimError::InvalidStrategy {
                    reason: "moving average periods must be at least 1".into(),
                });
            }
            if spec.fast_period >= spec.slow_period {
                return Err(TradesimError::InvalidStrategy {
                    reason: format!(
                        "fast period {} must be below slow period {}",
                        spec.fast_period, spec.slow_period
                    ),
                });
            }
            if spec.quantity <= 0 {
                return Err(TradesimError::InvalidStrategy {
                    reason: format!("quantity must be positive, got {}", spec.quantity),
                });
            }
            Ok(Box::new(SmaCross::new(
                spec.fast_period,
                spec.slow_period,
                spec.quantity,
            )))
        }
        other => Err(TradesimError::InvalidStrategy {
            reason: format!("unknown strategy '{other}'"),
        }),
    }
}

/// Moving-average crossover: buy one fixed-size lot on an upward cross while
/// flat, close the position on a downward cross. Long-only, single position.
#[derive(Debug, Clone)]
pub struct SmaCross {
    crossover: SmaCrossover,
    quantity: i64,
}

impl SmaCross {
    pub fn new(fast_period: usize, slow_period: usize, quantity: i64) -> Self {
        SmaCross {
            crossover: SmaCrossover::new(fast_period, slow_period),
            quantity,
        }
    }
}

impl Strategy for SmaCross {
    fn name(&self) -> &str {
        "sma_cross"
    }

    fn on_bar(&mut self, bar: &OhlcvBar, position: Option<&Position>) -> Intent {
        let Some(cross) = self.crossover.update(bar) else {
            return Intent::Hold;
        };

        match (position, cross) {
            (None, Cross::Up) => Intent::Buy {
                quantity: self.quantity,
            },
            (Some(_), Cross::Down) => Intent::Sell,
            _ => Intent::Hold,
        }
    }
}
