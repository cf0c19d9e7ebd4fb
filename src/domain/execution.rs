//! Simulated broker: fills, rejections and per-run state.
//!
//! Fill model: intents fill at the decision bar's closing price, whole fills
//! only, no slippage, no commission. This is a documented simplification;
//! callers needing realistic execution costs extend [`enter_long`]/[`exit_long`].
//! The broker never lets cash go negative and never opens a short position.

use chrono::NaiveDate;

use crate::domain::ohlcv::OhlcvBar;
use crate::domain::position::Position;
use crate::domain::strategy::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// A recorded execution. Appended to the trade log, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub date: NaiveDate,
    pub side: Side,
    pub quantity: i64,
    pub price: f64,
    pub cash_after: f64,
}

/// Broker-level rejection. Does not abort the run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("insufficient funds: need {required:.2}, have {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("no open position to sell")]
    NoOpenPosition,

    #[error("already holding a position")]
    AlreadyLong,

    #[error("quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: i64 },
}

/// An intent the broker refused, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedIntent {
    pub date: NaiveDate,
    pub intent: Intent,
    pub reason: Rejection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// All mutable state of one backtest run. Owned by a single run; separate
/// runs share nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub cash: f64,
    pub position: Option<Position>,
    pub trades: Vec<Fill>,
    pub equity_curve: Vec<EquityPoint>,
    pub rejections: Vec<RejectedIntent>,
}

impl RunState {
    pub fn new(cash: f64) -> Self {
        RunState {
            cash,
            position: None,
            trades: Vec::new(),
            equity_curve: Vec::new(),
            rejections: Vec::new(),
        }
    }

    /// Cash plus the open position valued at `price`.
    pub fn mark_to_market(&self, price: f64) -> f64 {
        let position_value = self
            .position
            .as_ref()
            .map(|pos| pos.market_value(price))
            .unwrap_or(0.0);
        self.cash + position_value
    }

    pub fn record_equity(&mut self, date: NaiveDate, equity: f64) {
        self.equity_curve.push(EquityPoint { date, equity });
    }
}

/// Open a long position at the bar's close.
pub fn enter_long(
    state: &mut RunState,
    quantity: i64,
    bar: &OhlcvBar,
) -> Result<Fill, Rejection> {
    if quantity <= 0 {
        return Err(Rejection::InvalidQuantity { quantity });
    }
    if state.position.is_some() {
        return Err(Rejection::AlreadyLong);
    }

    let price = bar.close;
    let cost = quantity as f64 * price;
    if cost > state.cash {
        return Err(Rejection::InsufficientFunds {
            required: cost,
            available: state.cash,
        });
    }

    state.cash -= cost;
    state.position = Some(Position {
        quantity,
        entry_price: price,
        entry_date: bar.date,
    });

    let fill = Fill {
        date: bar.date,
        side: Side::Buy,
        quantity,
        price,
        cash_after: state.cash,
    };
    state.trades.push(fill.clone());
    Ok(fill)
}

/// Close the full open position at the bar's close.
pub fn exit_long(state: &mut RunState, bar: &OhlcvBar) -> Result<Fill, Rejection> {
    let Some(position) = state.position.take() else {
        return Err(Rejection::NoOpenPosition);
    };

    let price = bar.close;
    state.cash += position.market_value(price);

    let fill = Fill {
        date: bar.date,
        side: Side::Sell,
        quantity: position.quantity,
        price,
        cash_after: state.cash,
    };
    state.trades.push(fill.clone());
    Ok(fill)
}
