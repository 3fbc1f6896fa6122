//! Annualized rolling volatility of log returns.
//!
//! Sample standard deviation (n-1 denominator) over n log returns, scaled by
//! sqrt(periods_per_year).
//! VOL(n)[i] = sqrt(sum((R[i-j] - mean)^2 for j in 0..n) / (n-1)) * sqrt(P)
//! Warmup: the window must hold n valid log returns, so the first n bars are
//! invalid. Periods below 2 never become valid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};

pub fn calculate_volatility(
    log_returns: &IndicatorSeries,
    period: usize,
    periods_per_year: f64,
) -> IndicatorSeries {
    let points = &log_returns.values;
    let mut values = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        if period < 2 || i + 1 < period {
            values.push(IndicatorPoint::invalid(point.date));
            continue;
        }

        let window = &points[i + 1 - period..=i];
        if window.iter().any(|p| !p.valid) {
            values.push(IndicatorPoint::invalid(point.date));
            continue;
        }

        let n = period as f64;
        let mean = window.iter().map(|p| p.value).sum::<f64>() / n;
        let variance = window
            .iter()
            .map(|p| {
                let diff = p.value - mean;
                diff * diff
            })
            .sum::<f64>()
            / (n - 1.0);

        values.push(IndicatorPoint::valid(
            point.date,
            variance.sqrt() * periods_per_year.sqrt(),
        ));
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Volatility(period),
        values,
    }
}
