//! OHLCV bar representation and series normalization.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Sort bars chronologically and drop duplicate dates (first occurrence wins).
///
/// Data adapters call this before handing a series to the engine, so the
/// engine can rely on strictly increasing dates.
pub fn normalize_series(mut bars: Vec<OhlcvBar>) -> Vec<OhlcvBar> {
    bars.sort_by_key(|bar| bar.date);
    bars.dedup_by_key(|bar| bar.date);
    bars
}

/// True when every bar's date is strictly greater than its predecessor's.
pub fn strictly_ascending(bars: &[OhlcvBar]) -> bool {
    bars.windows(2).all(|pair| pair[0].date < pair[1].date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> OhlcvBar {
        OhlcvBar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn normalize_sorts_by_date() {
        let bars = normalize_series(vec![bar(3, 30.0), bar(1, 10.0), bar(2, 20.0)]);
        assert_eq!(bars.len(), 3);
        assert!(strictly_ascending(&bars));
        assert!((bars[0].close - 10.0).abs() < f64::EPSILON);
        assert!((bars[2].close - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_drops_duplicate_dates() {
        let bars = normalize_series(vec![bar(1, 10.0), bar(1, 99.0), bar(2, 20.0)]);
        assert_eq!(bars.len(), 2);
        // first occurrence wins
        assert!((bars[0].close - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ascending_check() {
        assert!(strictly_ascending(&[bar(1, 1.0), bar(2, 2.0)]));
        assert!(!strictly_ascending(&[bar(2, 1.0), bar(2, 2.0)]));
        assert!(strictly_ascending(&[]));
        assert!(strictly_ascending(&[bar(5, 1.0)]));
    }

    #[test]
    fn calendar_gaps_are_fine() {
        let bars = normalize_series(vec![bar(1, 10.0), bar(15, 20.0)]);
        assert_eq!(bars.len(), 2);
        assert!(strictly_ascending(&bars));
    }
}
