//! Annotated series export for charting tools.
//!
//! One row per bar: prices, derived fields (empty while undefined), the
//! signal, portfolio state, and a buy/sell marker column.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::error::SmacrossError;
use crate::domain::pipeline::PipelineOutput;
use crate::domain::signal::{Signal, SignalMarker};
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct AnnotatedRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
    sma_fast: Option<f64>,
    sma_slow: Option<f64>,
    daily_return: Option<f64>,
    log_return: Option<f64>,
    lagged_close: Option<f64>,
    lagged_log_return: Option<f64>,
    volatility: Option<f64>,
    volume_ma: Option<f64>,
    signal: i8,
    cash: f64,
    shares_held: f64,
    portfolio_value: f64,
    marker: &'static str,
    transition: bool,
}

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        CsvReportAdapter
    }

    pub fn to_writer<W: std::io::Write>(
        &self,
        output: &PipelineOutput,
        writer: W,
    ) -> Result<(), SmacrossError> {
        let markers: HashMap<NaiveDate, &SignalMarker> =
            output.markers.iter().map(|m| (m.date, m)).collect();

        let mut wtr = csv::Writer::from_writer(writer);
        let rows = output
            .bars
            .iter()
            .zip(&output.signals)
            .zip(output.backtest.valuations.points());

        for ((bar, signal), valuation) in rows {
            let marker = markers.get(&bar.date());
            let row = AnnotatedRow {
                date: bar.date(),
                open: bar.bar.open,
                high: bar.bar.high,
                low: bar.bar.low,
                close: bar.bar.close,
                volume: bar.bar.volume,
                sma_fast: bar.sma_fast,
                sma_slow: bar.sma_slow,
                daily_return: bar.daily_return,
                log_return: bar.log_return,
                lagged_close: bar.lagged_close,
                lagged_log_return: bar.lagged_log_return,
                volatility: bar.volatility,
                volume_ma: bar.volume_ma,
                signal: signal.as_i8(),
                cash: valuation.cash,
                shares_held: valuation.shares_held,
                portfolio_value: valuation.value,
                marker: marker.map_or("", |m| marker_label(m.signal)),
                transition: marker.is_some_and(|m| m.is_transition),
            };
            wtr.serialize(row).map_err(csv_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

fn marker_label(signal: Signal) -> &'static str {
    match signal {
        Signal::Buy => "buy",
        Signal::Sell => "sell",
        Signal::Hold => "",
    }
}

fn csv_error(e: csv::Error) -> SmacrossError {
    SmacrossError::Io(std::io::Error::other(e))
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, output: &PipelineOutput, output_path: &Path) -> Result<(), SmacrossError> {
        let file = std::fs::File::create(output_path)?;
        self.to_writer(output, file)
    }
}
