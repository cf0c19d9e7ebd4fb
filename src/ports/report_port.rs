//! Result export port trait.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::TradesimError;

/// Port for writing a backtest result to disk.
pub trait ReportPort {
    fn write(&self, result: &BacktestResult, output_dir: &Path) -> Result<(), TradesimError>;
}
