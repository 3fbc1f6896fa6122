//! Backtest parameters and the sequential portfolio simulation.

use chrono::NaiveDate;
use tracing::debug;

use super::enrichment::EnrichedBar;
use super::error::SmacrossError;
use super::portfolio::{PortfolioState, ValuationPoint, ValuationSeries};
use super::signal::Signal;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    pub risk_free_rate: f64,
    pub periods_per_year: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub valuations: ValuationSeries,
    pub final_state: PortfolioState,
    /// Signals that changed the portfolio (entries plus exits).
    pub trades: usize,
}

/// Walks the bars in order, applying each bar's signal at that bar's close
/// and recording the resulting valuation.
pub fn simulate(
    bars: &[EnrichedBar],
    signals: &[Signal],
    initial_capital: f64,
) -> Result<BacktestResult, SmacrossError> {
    if bars.len() != signals.len() {
        return Err(SmacrossError::SignalLength {
            bars: bars.len(),
            signals: signals.len(),
        });
    }

    let mut state = PortfolioState::new(initial_capital);
    let mut valuations = ValuationSeries::with_capacity(bars.len());
    let mut trades = 0usize;

    for (bar, &signal) in bars.iter().zip(signals) {
        let close = bar.close();
        let next = state.apply(signal, close);

        if next.is_invested() != state.is_invested() {
            trades += 1;
            debug!(
                date = %bar.date(),
                %signal,
                close,
                cash = next.cash,
                shares = next.shares_held,
                "position changed"
            );
        }
        state = next;

        valuations.push(ValuationPoint {
            date: bar.date(),
            close,
            signal,
            cash: state.cash,
            shares_held: state.shares_held,
            value: state.value(close),
        })?;
    }

    Ok(BacktestResult {
        valuations,
        final_state: state,
        trades,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;

    fn enriched(day: u32, close: f64) -> EnrichedBar {
        EnrichedBar {
            bar: OhlcvBar {
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            },
            sma_fast: None,
            sma_slow: None,
            daily_return: None,
            log_return: None,
            lagged_close: None,
            lagged_log_return: None,
            volatility: None,
            volume_ma: None,
        }
    }

    #[test]
    fn buy_then_sell_scenario() {
        let bars = vec![enriched(1, 100.0), enriched(2, 110.0)];
        let signals = vec![Signal::Buy, Signal::Sell];
        let result = simulate(&bars, &signals, 100_000.0).unwrap();

        let points = result.valuations.points();
        assert!((points[0].shares_held - 1000.0).abs() < 1e-9);
        assert_eq!(points[0].cash, 0.0);
        assert!((points[0].value - 100_000.0).abs() < 1e-6);

        assert_eq!(points[1].shares_held, 0.0);
        assert!((points[1].cash - 110_000.0).abs() < 1e-6);
        assert!((points[1].value - 110_000.0).abs() < 1e-6);
        assert_eq!(result.trades, 2);
    }

    #[test]
    fn valuation_marks_to_market_while_invested() {
        let bars = vec![enriched(1, 100.0), enriched(2, 120.0), enriched(3, 90.0)];
        let signals = vec![Signal::Buy, Signal::Buy, Signal::Hold];
        let result = simulate(&bars, &signals, 1_000.0).unwrap();

        assert_eq!(result.valuations.values(), vec![1_000.0, 1_200.0, 900.0]);
        assert_eq!(result.trades, 1);
        assert!(result.final_state.is_invested());
    }

    #[test]
    fn all_hold_keeps_initial_capital() {
        let bars = vec![enriched(1, 100.0), enriched(2, 50.0), enriched(3, 150.0)];
        let signals = vec![Signal::Hold; 3];
        let result = simulate(&bars, &signals, 100_000.0).unwrap();

        assert!(result.valuations.values().iter().all(|&v| v == 100_000.0));
        assert_eq!(result.final_state, PortfolioState::new(100_000.0));
        assert_eq!(result.trades, 0);
    }

    #[test]
    fn sell_before_any_buy_is_noop() {
        let bars = vec![enriched(1, 100.0), enriched(2, 80.0)];
        let signals = vec![Signal::Sell, Signal::Sell];
        let result = simulate(&bars, &signals, 5_000.0).unwrap();

        assert_eq!(result.valuations.values(), vec![5_000.0, 5_000.0]);
        assert_eq!(result.trades, 0);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let bars = vec![enriched(1, 100.0)];
        let err = simulate(&bars, &[], 100.0).unwrap_err();
        assert!(matches!(
            err,
            SmacrossError::SignalLength {
                bars: 1,
                signals: 0
            }
        ));
    }

    #[test]
    fn out_of_order_bars_are_rejected() {
        let bars = vec![enriched(2, 100.0), enriched(1, 100.0)];
        let err = simulate(&bars, &[Signal::Hold, Signal::Hold], 100.0).unwrap_err();
        assert!(matches!(err, SmacrossError::ValuationOrder { .. }));
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let result = simulate(&[], &[], 100.0).unwrap();
        assert!(result.valuations.is_empty());
        assert_eq!(result.final_state.cash, 100.0);
    }
}
