//! Performance metrics over a completed valuation series.

use super::error::SmacrossError;
use super::portfolio::ValuationSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub total_return: f64,
    pub annualized_return: f64,
    /// `None` when the return series has no dispersion to divide by.
    pub sharpe_ratio: Option<f64>,
    /// Fraction <= 0.
    pub max_drawdown: f64,
    /// Longest run of bars spent below a previous peak.
    pub max_drawdown_duration: usize,
    pub bars: usize,
}

impl PerformanceReport {
    pub fn compute(
        valuations: &ValuationSeries,
        risk_free_rate: f64,
        periods_per_year: f64,
    ) -> Result<Self, SmacrossError> {
        let values = valuations.values();
        let (first, last) = match (values.first(), values.last()) {
            (Some(&first), Some(&last)) if values.len() >= 2 => (first, last),
            _ => {
                return Err(SmacrossError::InsufficientValuations { have: values.len() });
            }
        };

        let bars = values.len();
        let total_return = last / first - 1.0;
        let annualized_return = (last / first).powf(periods_per_year / bars as f64) - 1.0;

        let returns = period_returns(&values);
        let sharpe_ratio = compute_sharpe(&returns, risk_free_rate / periods_per_year, periods_per_year);
        let (max_drawdown, max_drawdown_duration) = compute_drawdown(&values);

        Ok(PerformanceReport {
            total_return,
            annualized_return,
            sharpe_ratio,
            max_drawdown,
            max_drawdown_duration,
            bars,
        })
    }
}

/// Percent change between consecutive values; one shorter than the input.
pub fn period_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Annualized Sharpe ratio using the sample standard deviation.
fn compute_sharpe(returns: &[f64], period_rf: f64, periods_per_year: f64) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();

    if !stddev.is_finite() || stddev <= 0.0 {
        return None;
    }

    let sharpe = (mean - period_rf) / stddev * periods_per_year.sqrt();
    sharpe.is_finite().then_some(sharpe)
}

fn compute_drawdown(values: &[f64]) -> (f64, usize) {
    let Some(&start) = values.first() else {
        return (0.0, 0);
    };

    let mut peak = start;
    let mut max_dd = 0.0_f64;
    let mut current_duration = 0usize;
    let mut max_duration = 0usize;

    for &value in values {
        if value >= peak {
            peak = value;
            current_duration = 0;
        } else {
            let dd = value / peak - 1.0;
            if dd < max_dd {
                max_dd = dd;
            }
            current_duration += 1;
            max_duration = max_duration.max(current_duration);
        }
    }

    (max_dd, max_duration)
}
