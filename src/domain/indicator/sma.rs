//! Simple Moving Average over closes and over volume.
//!
//! SMA(n)[i] = sum(X[i-j] for j in 0..n) / n
//! Warmup: first (n-1) bars are invalid.

use chrono::NaiveDate;

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values: rolling_mean(bars, &closes, period),
    }
}

pub fn calculate_volume_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    IndicatorSeries {
        indicator_type: IndicatorType::VolumeSma(period),
        values: rolling_mean(bars, &volumes, period),
    }
}

/// Trailing-window mean; each window is summed independently. A window of
/// identical values yields that value exactly, whatever the window length.
fn rolling_mean(bars: &[OhlcvBar], xs: &[f64], period: usize) -> Vec<IndicatorPoint> {
    let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();
    if period == 0 {
        return dates.into_iter().map(IndicatorPoint::invalid).collect();
    }

    // Length of the run of equal values ending at each index.
    let mut equal_run = 0usize;

    dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            equal_run = if i > 0 && xs[i] == xs[i - 1] {
                equal_run + 1
            } else {
                1
            };

            if i + 1 < period {
                IndicatorPoint::invalid(date)
            } else if equal_run >= period {
                IndicatorPoint::valid(date, xs[i])
            } else {
                let window = &xs[i + 1 - period..=i];
                IndicatorPoint::valid(date, window.iter().sum::<f64>() / period as f64)
            }
        })
        .collect()
}
