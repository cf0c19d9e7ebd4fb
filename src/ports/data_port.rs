//! Price series loader port trait.
//!
//! Implementations fetch and normalize historical OHLCV data; the engine only
//! relies on this contract: chronologically ordered, deduplicated bars, with
//! `DataUnavailable` for source errors, unknown symbols, or an empty range.

use crate::domain::error::TradesimError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Fetch bars for `symbol` with dates in `[start, end]`, both inclusive.
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, TradesimError>;

    /// First date, last date and bar count available for `symbol`, or `None`
    /// when the source has never seen the symbol.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TradesimError>;
}
