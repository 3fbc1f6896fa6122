//! Portfolio state and valuation tracking.
//!
//! The portfolio holds a single asset and is always either fully in cash or
//! fully invested; a signal never produces a partial or short position.

use chrono::NaiveDate;

use super::error::SmacrossError;
use super::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioState {
    pub cash: f64,
    pub shares_held: f64,
}

impl PortfolioState {
    pub fn new(initial_capital: f64) -> Self {
        PortfolioState {
            cash: initial_capital,
            shares_held: 0.0,
        }
    }

    /// State after acting on `signal` at `close`. Requires `close > 0` for
    /// Buy and Sell.
    pub fn apply(self, signal: Signal, close: f64) -> Self {
        match signal {
            Signal::Buy => PortfolioState {
                shares_held: self.shares_held + self.cash / close,
                cash: 0.0,
            },
            Signal::Sell => PortfolioState {
                cash: self.cash + self.shares_held * close,
                shares_held: 0.0,
            },
            Signal::Hold => self,
        }
    }

    pub fn value(&self, close: f64) -> f64 {
        self.shares_held * close + self.cash
    }

    pub fn is_invested(&self) -> bool {
        self.shares_held > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub signal: Signal,
    pub cash: f64,
    pub shares_held: f64,
    pub value: f64,
}

/// Append-only, strictly date-ordered portfolio valuations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuationSeries {
    points: Vec<ValuationPoint>,
}

impl ValuationSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ValuationSeries {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: ValuationPoint) -> Result<(), SmacrossError> {
        if let Some(last) = self.points.last() {
            if point.date <= last.date {
                return Err(SmacrossError::ValuationOrder {
                    date: point.date,
                    last: last.date,
                });
            }
        }
        self.points.push(point);
        Ok(())
    }

    pub fn points(&self) -> &[ValuationPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&ValuationPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ValuationPoint> {
        self.points.last()
    }
}
