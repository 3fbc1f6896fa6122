//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::SmacrossError;
use crate::domain::strategy::{
    DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW, DEFAULT_VOLATILITY_WINDOW, DEFAULT_VOLUME_WINDOW,
};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    validate_initial_capital(config)?;
    validate_risk_free_rate(config)?;
    validate_periods_per_year(config)?;
    validate_dates(config)?;
    validate_symbol(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    let fast = validate_window(config, "fast_window", DEFAULT_FAST_WINDOW)?;
    let slow = validate_window(config, "slow_window", DEFAULT_SLOW_WINDOW)?;
    validate_window(config, "volume_window", DEFAULT_VOLUME_WINDOW)?;
    validate_window(config, "volatility_window", DEFAULT_VOLATILITY_WINDOW)?;

    if fast >= slow {
        return Err(invalid(
            "strategy",
            "fast_window",
            "fast_window must be shorter than slow_window",
        ));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> SmacrossError {
    SmacrossError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    let value = parse_double(config, "backtest", "initial_capital", 100_000.0)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be positive",
        ));
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    let value = parse_double(config, "backtest", "risk_free_rate", 0.0)?;
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(
            "backtest",
            "risk_free_rate",
            "risk_free_rate must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_periods_per_year(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    let value = parse_double(config, "backtest", "periods_per_year", 252.0)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(
            "backtest",
            "periods_per_year",
            "periods_per_year must be positive",
        ));
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(invalid(
            "backtest",
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok(())
}

pub fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, SmacrossError> {
    match value {
        None => Err(SmacrossError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            invalid(
                "backtest",
                field,
                &format!("invalid {} format, expected YYYY-MM-DD", field),
            )
        }),
    }
}

/// A numeric key is optional, but when present it must parse as a number.
pub fn parse_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, SmacrossError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .map_err(|_| invalid(section, key, &format!("{key} must be a number, got '{raw}'")))
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    match config.get_string("backtest", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(SmacrossError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

/// A window is optional, but when present it must be a positive integer.
fn validate_window(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
) -> Result<usize, SmacrossError> {
    let Some(raw) = config.get_string("strategy", key) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(invalid(
            "strategy",
            key,
            &format!("{key} must be a positive integer"),
        )),
    }
}
