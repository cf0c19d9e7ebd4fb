//! CSV file data adapter.
//!
//! Reads `{symbol}.csv` files with a header row and columns
//! date,open,high,low,close,volume. Rows outside the requested range are
//! dropped, the remainder is sorted and deduplicated, and an empty result is
//! reported as `DataUnavailable` per the loader contract.

use crate::domain::error::TradesimError;
use crate::domain::ohlcv::{normalize_series, OhlcvBar};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}.csv"))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<OhlcvBar>, TradesimError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| TradesimError::DataUnavailable {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TradesimError::DataUnavailable {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| TradesimError::DataUnavailable {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                TradesimError::DataUnavailable {
                    reason: format!("invalid date '{date_str}': {e}"),
                }
            })?;

            let field = |idx: usize, name: &str| -> Result<f64, TradesimError> {
                record
                    .get(idx)
                    .ok_or_else(|| TradesimError::DataUnavailable {
                        reason: format!("missing {name} column"),
                    })?
                    .parse()
                    .map_err(|e| TradesimError::DataUnavailable {
                        reason: format!("invalid {name} value: {e}"),
                    })
            };

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open: field(1, "open")?,
                high: field(2, "high")?,
                low: field(3, "low")?,
                close: field(4, "close")?,
                volume: field(5, "volume")?,
            });
        }

        Ok(normalize_series(bars))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, TradesimError> {
        let mut bars = self.read_all(symbol)?;
        bars.retain(|bar| bar.date >= start && bar.date <= end);

        if bars.is_empty() {
            return Err(TradesimError::DataUnavailable {
                reason: format!("no bars for {symbol} between {start} and {end}"),
            });
        }
        Ok(bars)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TradesimError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let bars = self.read_all(symbol)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
