//! Joins a price series with its derived indicator columns.

use chrono::NaiveDate;

use crate::domain::indicator::returns::{
    calculate_daily_return, calculate_lagged_close, calculate_lagged_log_return,
    calculate_log_return,
};
use crate::domain::indicator::sma::{calculate_sma, calculate_volume_sma};
use crate::domain::indicator::volatility::calculate_volatility;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::strategy::Strategy;

/// A bar with its derived fields; `None` means the field is still in warmup.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedBar {
    pub bar: OhlcvBar,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub daily_return: Option<f64>,
    pub log_return: Option<f64>,
    pub lagged_close: Option<f64>,
    pub lagged_log_return: Option<f64>,
    pub volatility: Option<f64>,
    pub volume_ma: Option<f64>,
}

impl EnrichedBar {
    pub fn date(&self) -> NaiveDate {
        self.bar.date
    }

    pub fn close(&self) -> f64 {
        self.bar.close
    }
}

pub fn enrich(bars: &[OhlcvBar], strategy: &Strategy, periods_per_year: f64) -> Vec<EnrichedBar> {
    let sma_fast = calculate_sma(bars, strategy.fast_window);
    let sma_slow = calculate_sma(bars, strategy.slow_window);
    let daily_return = calculate_daily_return(bars);
    let log_return = calculate_log_return(bars);
    let lagged_close = calculate_lagged_close(bars);
    let lagged_log_return = calculate_lagged_log_return(&log_return);
    let volatility = calculate_volatility(&log_return, strategy.volatility_window, periods_per_year);
    let volume_ma = calculate_volume_sma(bars, strategy.volume_window);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| EnrichedBar {
            bar: bar.clone(),
            sma_fast: sma_fast.get(i),
            sma_slow: sma_slow.get(i),
            daily_return: daily_return.get(i),
            log_return: log_return.get(i),
            lagged_close: lagged_close.get(i),
            lagged_log_return: lagged_log_return.get(i),
            volatility: volatility.get(i),
            volume_ma: volume_ma.get(i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    fn small_strategy() -> Strategy {
        Strategy {
            name: "Test".into(),
            fast_window: 2,
            slow_window: 3,
            volume_window: 2,
            volatility_window: 2,
        }
    }

    #[test]
    fn enrich_preserves_length_and_bars() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        let enriched = enrich(&bars, &small_strategy(), 252.0);

        assert_eq!(enriched.len(), 4);
        for (e, b) in enriched.iter().zip(&bars) {
            assert_eq!(&e.bar, b);
        }
    }

    #[test]
    fn enrich_warmup_fields_are_none() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        let enriched = enrich(&bars, &small_strategy(), 252.0);

        let first = &enriched[0];
        assert_eq!(first.sma_fast, None);
        assert_eq!(first.sma_slow, None);
        assert_eq!(first.daily_return, None);
        assert_eq!(first.log_return, None);
        assert_eq!(first.lagged_close, None);
        assert_eq!(first.volume_ma, None);

        assert_eq!(enriched[1].sma_fast, Some(10.5));
        assert_eq!(enriched[1].sma_slow, None);
        assert_eq!(enriched[2].sma_slow, Some(11.0));
        assert_eq!(enriched[1].lagged_log_return, None);
        assert!(enriched[2].lagged_log_return.is_some());
        assert_eq!(enriched[1].volatility, None);
        assert!(enriched[2].volatility.is_some());
    }

    #[test]
    fn enrich_empty_series() {
        assert!(enrich(&[], &small_strategy(), 252.0).is_empty());
    }
}
