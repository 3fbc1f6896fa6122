#![allow(dead_code)]

use chrono::NaiveDate;
use smacross::domain::backtest::BacktestConfig;
use smacross::domain::error::SmacrossError;
pub use smacross::domain::ohlcv::OhlcvBar;
use smacross::domain::strategy::Strategy;
use smacross::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, SmacrossError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SmacrossError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date < end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SmacrossError> {
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive daily bars starting 2024-01-01, one per close.
pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    let start = date(2024, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000 + i as i64,
        })
        .collect()
}

/// Rises for `up` bars, then falls for `down` bars.
pub fn up_then_down(up: usize, down: usize, start_price: f64) -> Vec<f64> {
    let mut closes: Vec<f64> = (0..up).map(|i| start_price + i as f64).collect();
    let peak = start_price + up as f64;
    closes.extend((0..down).map(|i| peak - 2.0 * i as f64));
    closes
}

pub fn sample_config(symbol: &str) -> BacktestConfig {
    BacktestConfig {
        symbol: symbol.to_string(),
        start_date: date(2020, 1, 1),
        end_date: date(2030, 1, 1),
        initial_capital: 100_000.0,
        risk_free_rate: 0.0,
        periods_per_year: 252.0,
    }
}

pub fn small_strategy() -> Strategy {
    Strategy {
        name: "SMA 3/5".into(),
        fast_window: 3,
        slow_window: 5,
        volume_window: 3,
        volatility_window: 3,
    }
}
