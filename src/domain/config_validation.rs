//! Configuration validation and typed parameter building.
//!
//! All config fields are checked before a backtest runs.

use chrono::NaiveDate;

use crate::domain::backtest::DEFAULT_CASH;
use crate::domain::error::TradesimError;
use crate::domain::strategy::{build_strategy, StrategySpec};
use crate::ports::config_port::ConfigPort;

/// Run parameters collected from the `[backtest]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestParams {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cash: f64,
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), TradesimError> {
    build_backtest_params(config).map(|_| ())
}

/// Full strategy check: the section must both parse and build.
pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), TradesimError> {
    let spec = build_strategy_spec(config)?;
    build_strategy(&spec).map(|_| ())
}

pub fn build_backtest_params(config: &dyn ConfigPort) -> Result<BacktestParams, TradesimError> {
    let symbol = config
        .get_string("backtest", "symbol")
        .ok_or_else(|| TradesimError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
        })?;

    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;
    if end < start {
        return Err(TradesimError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "end_date".to_string(),
            reason: format!("end_date {end} is before start_date {start}"),
        });
    }

    let cash = config.get_double("backtest", "initial_capital", DEFAULT_CASH);
    if !cash.is_finite() || cash <= 0.0 {
        return Err(TradesimError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }

    Ok(BacktestParams {
        symbol,
        start,
        end,
        cash,
    })
}

pub fn build_strategy_spec(config: &dyn ConfigPort) -> Result<StrategySpec, TradesimError> {
    let defaults = StrategySpec::default();

    let name = config
        .get_string("strategy", "name")
        .unwrap_or(defaults.name);

    let fast_period = parse_period(config, "fast_period", defaults.fast_period)?;
    let slow_period = parse_period(config, "slow_period", defaults.slow_period)?;

    let quantity = config.get_int("strategy", "quantity", defaults.quantity);
    if quantity <= 0 {
        return Err(TradesimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "quantity".to_string(),
            reason: "quantity must be positive".to_string(),
        });
    }

    Ok(StrategySpec {
        name,
        fast_period,
        slow_period,
        quantity,
    })
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, TradesimError> {
    let value = config
        .get_string("backtest", key)
        .ok_or_else(|| TradesimError::ConfigMissing {
            section: "backtest".to_string(),
            key: key.to_string(),
        })?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| TradesimError::ConfigInvalid {
        section: "backtest".to_string(),
        key: key.to_string(),
        reason: format!("expected YYYY-MM-DD, got '{value}': {e}"),
    })
}

fn parse_period(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
) -> Result<usize, TradesimError> {
    let value = config.get_int("strategy", key, default as i64);
    if value <= 0 {
        return Err(TradesimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: "period must be at least 1".to_string(),
        });
    }
    Ok(value as usize)
}
