//! Backtest orchestrator and event loop.
//!
//! Bars are processed in strict chronological order; indicator and position
//! state accumulate causally, so no decision ever sees a future bar. Each run
//! owns its [`RunState`] outright and runs single-threaded.

use chrono::NaiveDate;

use crate::domain::error::TradesimError;
use crate::domain::execution::{
    self, EquityPoint, Fill, RejectedIntent, RunState,
};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::position::Position;
use crate::domain::strategy::{Intent, Strategy};
use crate::ports::data_port::DataPort;

/// Starting cash when the caller does not configure one.
pub const DEFAULT_CASH: f64 = 10_000.0;

/// Outcome of one run. Immutable once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub start_value: f64,
    pub final_value: f64,
    pub trades: Vec<Fill>,
    pub equity_curve: Vec<EquityPoint>,
    pub rejections: Vec<RejectedIntent>,
    /// Position still held after the last bar, already marked to market in
    /// `final_value`.
    pub open_position: Option<Position>,
}

/// Drive the simulation loop over an already-loaded bar series.
///
/// Records starting equity before the first bar, then one mark-to-market
/// equity point per bar, so the curve has `bars.len() + 1` entries. Broker
/// rejections are recorded and the run continues.
pub fn run_series(
    bars: &[OhlcvBar],
    strategy: &mut dyn Strategy,
    cash: f64,
) -> Result<BacktestResult, TradesimError> {
    let Some(first) = bars.first() else {
        return Err(TradesimError::DataUnavailable {
            reason: "cannot run a backtest over an empty bar series".into(),
        });
    };

    let mut state = RunState::new(cash);
    state.record_equity(first.date, cash);

    for bar in bars {
        let intent = strategy.on_bar(bar, state.position.as_ref());
        let outcome = match intent {
            Intent::Hold => Ok(()),
            Intent::Buy { quantity } => {
                execution::enter_long(&mut state, quantity, bar).map(|_| ())
            }
            Intent::Sell => execution::exit_long(&mut state, bar).map(|_| ()),
        };
        if let Err(reason) = outcome {
            state.rejections.push(RejectedIntent {
                date: bar.date,
                intent,
                reason,
            });
        }

        let equity = state.mark_to_market(bar.close);
        state.record_equity(bar.date, equity);
    }

    let final_value = state
        .equity_curve
        .last()
        .map(|point| point.equity)
        .unwrap_or(cash);

    Ok(BacktestResult {
        start_value: cash,
        final_value,
        trades: state.trades,
        equity_curve: state.equity_curve,
        rejections: state.rejections,
        open_position: state.position,
    })
}

/// Core entry point: fetch the series for `symbol` over `[start, end]` and
/// simulate `strategy` against it.
///
/// Fails with `InvalidStrategy` when no strategy is supplied, and with
/// `DataUnavailable` when the loader errors or returns an empty series; no
/// partial simulation is attempted.
pub fn run_backtest(
    port: &dyn DataPort,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    strategy: Option<&mut dyn Strategy>,
    cash: f64,
) -> Result<BacktestResult, TradesimError> {
    let Some(strategy) = strategy else {
        return Err(TradesimError::InvalidStrategy {
            reason: "no strategy supplied".into(),
        });
    };

    let bars = port.fetch_ohlcv(symbol, start, end)?;
    if bars.is_empty() {
        return Err(TradesimError::DataUnavailable {
            reason: format!("no bars for {symbol} between {start} and {end}"),
        });
    }

    run_series(&bars, strategy, cash)
}
