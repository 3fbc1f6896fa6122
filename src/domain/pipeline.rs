//! End-to-end run: fetch, validate, enrich, signal, simulate, evaluate.
//!
//! Each stage completes before the next starts.

use tracing::{info, warn};

use crate::domain::backtest::{self, BacktestConfig, BacktestResult};
use crate::domain::enrichment::{self, EnrichedBar};
use crate::domain::error::SmacrossError;
use crate::domain::metrics::PerformanceReport;
use crate::domain::ohlcv::validate_series;
use crate::domain::signal::{self, Signal, SignalMarker};
use crate::domain::strategy::Strategy;
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub symbol: String,
    pub bars: Vec<EnrichedBar>,
    pub signals: Vec<Signal>,
    pub markers: Vec<SignalMarker>,
    pub backtest: BacktestResult,
    pub report: PerformanceReport,
}

pub fn run_pipeline(
    data_port: &dyn DataPort,
    config: &BacktestConfig,
    strategy: &Strategy,
) -> Result<PipelineOutput, SmacrossError> {
    info!(
        symbol = %config.symbol,
        start = %config.start_date,
        end = %config.end_date,
        "fetching price data"
    );
    let ohlcv = data_port.fetch_ohlcv(&config.symbol, config.start_date, config.end_date)?;
    validate_series(&config.symbol, &ohlcv)?;
    info!(bars = ohlcv.len(), "price data loaded");

    if ohlcv.len() < strategy.warmup_bars() {
        warn!(
            bars = ohlcv.len(),
            needed = strategy.warmup_bars(),
            "insufficient history for the slow average; every signal will be hold"
        );
    }

    let bars = enrichment::enrich(&ohlcv, strategy, config.periods_per_year);
    let signals = signal::generate_signals(&bars);
    let markers = signal::signal_markers(&bars, &signals);

    info!(strategy = %strategy.name, "running backtest");
    let backtest = backtest::simulate(&bars, &signals, config.initial_capital)?;
    let report = PerformanceReport::compute(
        &backtest.valuations,
        config.risk_free_rate,
        config.periods_per_year,
    )?;
    info!(trades = backtest.trades, "backtest complete");

    Ok(PipelineOutput {
        symbol: config.symbol.clone(),
        bars,
        signals,
        markers,
        backtest,
        report,
    })
}
