//! CSV result export adapter.
//!
//! Writes `equity.csv` and `trades.csv` into the given output directory so the
//! consuming layer (spreadsheet, web frontend) can render the run.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::TradesimError;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    fn csv_error(e: csv::Error) -> TradesimError {
        TradesimError::Report {
            reason: e.to_string(),
        }
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &BacktestResult, output_dir: &Path) -> Result<(), TradesimError> {
        fs::create_dir_all(output_dir)?;

        let mut equity = csv::Writer::from_path(output_dir.join("equity.csv"))
            .map_err(Self::csv_error)?;
        equity
            .write_record(["date", "equity"])
            .map_err(Self::csv_error)?;
        for point in &result.equity_curve {
            equity
                .write_record([point.date.to_string(), format!("{:.2}", point.equity)])
                .map_err(Self::csv_error)?;
        }
        equity.flush()?;

        let mut trades = csv::Writer::from_path(output_dir.join("trades.csv"))
            .map_err(Self::csv_error)?;
        trades
            .write_record(["date", "side", "quantity", "price", "cash_after"])
            .map_err(Self::csv_error)?;
        for fill in &result.trades {
            trades
                .write_record([
                    fill.date.to_string(),
                    fill.side.to_string(),
                    fill.quantity.to_string(),
                    format!("{:.4}", fill.price),
                    format!("{:.2}", fill.cash_after),
                ])
                .map_err(Self::csv_error)?;
        }
        trades.flush()?;

        Ok(())
    }
}
