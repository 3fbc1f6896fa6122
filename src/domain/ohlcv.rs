//! OHLCV bar representation and price series validation.

use chrono::NaiveDate;

use super::error::SmacrossError;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// (close - prev_close) / prev_close
    pub fn pct_change(&self, prev_close: f64) -> f64 {
        (self.close - prev_close) / prev_close
    }

    /// ln(close / prev_close)
    pub fn log_return(&self, prev_close: f64) -> f64 {
        (self.close / prev_close).ln()
    }
}

/// Checks the preconditions every downstream stage relies on: a non-empty
/// series, strictly ascending dates, and a finite positive close on each bar.
pub fn validate_series(symbol: &str, bars: &[OhlcvBar]) -> Result<(), SmacrossError> {
    if bars.is_empty() {
        return Err(SmacrossError::NoData {
            symbol: symbol.to_string(),
        });
    }

    for (i, bar) in bars.iter().enumerate() {
        if !bar.close.is_finite() || bar.close <= 0.0 {
            return Err(SmacrossError::InvalidSeries {
                symbol: symbol.to_string(),
                date: bar.date,
                reason: format!("close must be positive, got {}", bar.close),
            });
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(SmacrossError::InvalidSeries {
                symbol: symbol.to_string(),
                date: bar.date,
                reason: format!("date does not follow {}", bars[i - 1].date),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: f64) -> OhlcvBar {
        OhlcvBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn pct_change() {
        let b = bar("2024-01-02", 110.0);
        assert!((b.pct_change(100.0) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn log_return() {
        let b = bar("2024-01-02", 110.0);
        assert!((b.log_return(100.0) - (1.1_f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn validate_accepts_ascending_series() {
        let bars = vec![bar("2024-01-01", 100.0), bar("2024-01-03", 101.0)];
        assert!(validate_series("TEST", &bars).is_ok());
    }

    #[test]
    fn validate_rejects_empty() {
        let err = validate_series("TEST", &[]).unwrap_err();
        assert!(matches!(err, SmacrossError::NoData { symbol } if symbol == "TEST"));
    }

    #[test]
    fn validate_rejects_duplicate_dates() {
        let bars = vec![bar("2024-01-01", 100.0), bar("2024-01-01", 101.0)];
        let err = validate_series("TEST", &bars).unwrap_err();
        assert!(matches!(err, SmacrossError::InvalidSeries { .. }));
    }

    #[test]
    fn validate_rejects_descending_dates() {
        let bars = vec![bar("2024-01-02", 100.0), bar("2024-01-01", 101.0)];
        assert!(validate_series("TEST", &bars).is_err());
    }

    #[test]
    fn validate_rejects_zero_close() {
        let bars = vec![bar("2024-01-01", 100.0), bar("2024-01-02", 0.0)];
        let err = validate_series("TEST", &bars).unwrap_err();
        match err {
            SmacrossError::InvalidSeries { date, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_rejects_nan_close() {
        let bars = vec![bar("2024-01-01", f64::NAN)];
        assert!(validate_series("TEST", &bars).is_err());
    }
}
