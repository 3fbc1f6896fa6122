//! Domain error types.

/// Top-level error type for smacross.
#[derive(Debug, thiserror::Error)]
pub enum SmacrossError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("invalid price series for {symbol} at {date}: {reason}")]
    InvalidSeries {
        symbol: String,
        date: chrono::NaiveDate,
        reason: String,
    },

    #[error("valuation series needs at least 2 entries, have {have}")]
    InsufficientValuations { have: usize },

    #[error("valuation for {date} is not after the last recorded date {last}")]
    ValuationOrder {
        date: chrono::NaiveDate,
        last: chrono::NaiveDate,
    },

    #[error("signal count {signals} does not match bar count {bars}")]
    SignalLength { bars: usize, signals: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SmacrossError> for std::process::ExitCode {
    fn from(err: &SmacrossError) -> Self {
        let code: u8 = match err {
            SmacrossError::Io(_) => 1,
            SmacrossError::ConfigParse { .. }
            | SmacrossError::ConfigMissing { .. }
            | SmacrossError::ConfigInvalid { .. } => 2,
            SmacrossError::DataSource { .. } => 3,
            SmacrossError::NoData { .. }
            | SmacrossError::InvalidSeries { .. }
            | SmacrossError::InsufficientValuations { .. } => 5,
            SmacrossError::ValuationOrder { .. } | SmacrossError::SignalLength { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn no_data_message_names_symbol() {
        let err = SmacrossError::NoData {
            symbol: "NSEI".into(),
        };
        assert_eq!(err.to_string(), "no data for NSEI");
    }

    #[test]
    fn invalid_series_message() {
        let err = SmacrossError::InvalidSeries {
            symbol: "NSEI".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            reason: "close must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid price series for NSEI at 2024-01-02: close must be positive"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SmacrossError = io.into();
        assert!(matches!(err, SmacrossError::Io(_)));
    }
}
