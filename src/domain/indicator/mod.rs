//! Windowed indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A time series of indicator values
//!
//! Points inside an indicator's warmup carry `valid == false` and must not be
//! read; [`IndicatorSeries::get`] turns them into `None`.

pub mod returns;
pub mod sma;
pub mod volatility;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

impl IndicatorPoint {
    pub fn invalid(date: NaiveDate) -> Self {
        IndicatorPoint {
            date,
            valid: false,
            value: 0.0,
        }
    }

    pub fn valid(date: NaiveDate, value: f64) -> Self {
        IndicatorPoint {
            date,
            valid: true,
            value,
        }
    }

    pub fn as_option(&self) -> Option<f64> {
        self.valid.then_some(self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    VolumeSma(usize),
    DailyReturn,
    LogReturn,
    LaggedClose,
    LaggedLogReturn,
    Volatility(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value at bar `index`, or `None` during warmup or past the end.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(IndicatorPoint::as_option)
    }

    pub fn first_valid_index(&self) -> Option<usize> {
        self.values.iter().position(|p| p.valid)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::VolumeSma(period) => write!(f, "VOLUME_SMA({})", period),
            IndicatorType::DailyReturn => write!(f, "DAILY_RETURN"),
            IndicatorType::LogReturn => write!(f, "LOG_RETURN"),
            IndicatorType::LaggedClose => write!(f, "LAGGED_CLOSE"),
            IndicatorType::LaggedLogReturn => write!(f, "LAGGED_LOG_RETURN"),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
        }
    }
}
