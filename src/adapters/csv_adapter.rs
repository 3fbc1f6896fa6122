//! CSV file data adapter.
//!
//! Each symbol lives in `<base_path>/<SYMBOL>.csv` with the header
//! `date,open,high,low,close,volume`. Rows with an empty field are dropped.

use crate::domain::error::SmacrossError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<OhlcvBar>, SmacrossError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| SmacrossError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();
        let mut dropped = 0usize;

        for result in rdr.records() {
            let record = result.map_err(|e| SmacrossError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            if (0..6).any(|i| record.get(i).is_none_or(|f| f.trim().is_empty())) {
                dropped += 1;
                continue;
            }

            let date_str = record.get(0).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                SmacrossError::DataSource {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            bars.push(OhlcvBar {
                date,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_volume(&record)?,
            });
        }

        if dropped > 0 {
            warn!(symbol, dropped, "dropped rows with missing values");
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, SmacrossError> {
    record
        .get(index)
        .unwrap_or_default()
        .trim()
        .parse()
        .map_err(|e| SmacrossError::DataSource {
            reason: format!("invalid {} value: {}", name, e),
        })
}

/// Integer volume; whole-number floats such as `1200.0` are accepted too.
fn parse_volume(record: &csv::StringRecord) -> Result<i64, SmacrossError> {
    let raw = record.get(5).unwrap_or_default().trim();
    raw.parse::<i64>()
        .or_else(|_| raw.parse::<f64>().map(|v| v.round() as i64))
        .map_err(|e| SmacrossError::DataSource {
            reason: format!("invalid volume value: {}", e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, SmacrossError> {
        let bars = self
            .read_all(symbol)?
            .into_iter()
            .filter(|b| b.date >= start_date && b.date < end_date)
            .collect();
        Ok(bars)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SmacrossError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let bars = self.read_all(symbol)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
