//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod enrichment;
pub mod signal;
pub mod portfolio;
pub mod backtest;
pub mod metrics;
pub mod strategy;
pub mod pipeline;
pub mod config_validation;
pub mod error;
