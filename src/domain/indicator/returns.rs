//! Bar-to-bar return series and lagged values.
//!
//! DAILY_RETURN[i] = C[i] / C[i-1] - 1
//! LOG_RETURN[i] = ln(C[i] / C[i-1])
//! LAGGED_CLOSE[i] = C[i-1]
//! LAGGED_LOG_RETURN[i] = LOG_RETURN[i-1]
//! Warmup: the first bar is invalid (the first two for LAGGED_LOG_RETURN).

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_daily_return(bars: &[OhlcvBar]) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::DailyReturn,
        values: with_previous(bars, |bar, prev| bar.pct_change(prev.close)),
    }
}

pub fn calculate_log_return(bars: &[OhlcvBar]) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::LogReturn,
        values: with_previous(bars, |bar, prev| bar.log_return(prev.close)),
    }
}

pub fn calculate_lagged_close(bars: &[OhlcvBar]) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::LaggedClose,
        values: with_previous(bars, |_, prev| prev.close),
    }
}

/// Shifts an already computed log return series forward by one bar.
pub fn calculate_lagged_log_return(log_returns: &IndicatorSeries) -> IndicatorSeries {
    let values = log_returns
        .values
        .iter()
        .enumerate()
        .map(|(i, point)| match i.checked_sub(1).map(|p| &log_returns.values[p]) {
            Some(prev) if prev.valid => IndicatorPoint::valid(point.date, prev.value),
            _ => IndicatorPoint::invalid(point.date),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::LaggedLogReturn,
        values,
    }
}

fn with_previous<F>(bars: &[OhlcvBar], f: F) -> Vec<IndicatorPoint>
where
    F: Fn(&OhlcvBar, &OhlcvBar) -> f64,
{
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                IndicatorPoint::invalid(bar.date)
            } else {
                IndicatorPoint::valid(bar.date, f(bar, &bars[i - 1]))
            }
        })
        .collect()
}
