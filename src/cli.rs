//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{BacktestConfig, TRADING_DAYS_PER_YEAR};
use crate::domain::config_validation::{
    parse_date, parse_double, validate_backtest_config, validate_strategy_config,
};
use crate::domain::error::SmacrossError;
use crate::domain::metrics::PerformanceReport;
use crate::domain::pipeline::{run_pipeline, PipelineOutput};
use crate::domain::strategy::{
    Strategy, DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW, DEFAULT_VOLATILITY_WINDOW,
    DEFAULT_VOLUME_WINDOW,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "smacross", about = "Moving-average crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the available data range for a symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            data_dir,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest(
                    &config,
                    symbol.as_deref(),
                    data_dir.as_deref(),
                    output.as_deref(),
                )
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info {
            config,
            symbol,
            data_dir,
        } => run_info(&config, symbol.as_deref(), data_dir.as_deref()),
    }
}

fn fail(err: SmacrossError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SmacrossError> {
    FileConfigAdapter::from_file(path)
}

/// Loads and validates both config sections.
fn load_validated(path: &Path) -> Result<FileConfigAdapter, SmacrossError> {
    info!(path = %path.display(), "loading config");
    let adapter = load_config(path)?;
    validate_backtest_config(&adapter)?;
    validate_strategy_config(&adapter)?;
    Ok(adapter)
}

fn run_backtest(
    config_path: &Path,
    symbol_override: Option<&str>,
    data_dir_override: Option<&Path>,
    output_override: Option<&Path>,
) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let mut bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    if let Some(symbol) = symbol_override {
        bt_config.symbol = symbol.trim().to_uppercase();
    }
    let strategy = build_strategy(&adapter);

    let data_port = CsvAdapter::new(resolve_data_dir(data_dir_override, &adapter));
    let output = output_override
        .map(Path::to_path_buf)
        .or_else(|| adapter.get_string("report", "output").map(PathBuf::from));

    match run_backtest_pipeline(&data_port, &bt_config, &strategy, output.as_deref()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, SmacrossError> {
    let symbol = adapter
        .get_string("backtest", "symbol")
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SmacrossError::ConfigMissing {
            section: "backtest".into(),
            key: "symbol".into(),
        })?;

    let start_date = parse_date(
        adapter.get_string("backtest", "start_date").as_deref(),
        "start_date",
    )?;
    let end_date = parse_date(
        adapter.get_string("backtest", "end_date").as_deref(),
        "end_date",
    )?;

    Ok(BacktestConfig {
        symbol,
        start_date,
        end_date,
        initial_capital: parse_double(adapter, "backtest", "initial_capital", 100_000.0)?,
        risk_free_rate: parse_double(adapter, "backtest", "risk_free_rate", 0.0)?,
        periods_per_year: parse_double(
            adapter,
            "backtest",
            "periods_per_year",
            TRADING_DAYS_PER_YEAR,
        )?,
    })
}

pub fn build_strategy(adapter: &dyn ConfigPort) -> Strategy {
    let window = |key: &str, default: usize| -> usize {
        let value = adapter.get_int("strategy", key, default as i64);
        usize::try_from(value).unwrap_or(default)
    };

    let fast_window = window("fast_window", DEFAULT_FAST_WINDOW);
    let slow_window = window("slow_window", DEFAULT_SLOW_WINDOW);
    let name = adapter
        .get_string("strategy", "name")
        .unwrap_or_else(|| format!("SMA {fast_window}/{slow_window} Crossover"));

    Strategy {
        name,
        fast_window,
        slow_window,
        volume_window: window("volume_window", DEFAULT_VOLUME_WINDOW),
        volatility_window: window("volatility_window", DEFAULT_VOLATILITY_WINDOW),
    }
}

pub fn resolve_data_dir(data_dir_override: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    data_dir_override
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("data", "directory").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Runs the pipeline, prints the summary, and writes the annotated series
/// when an output path is given.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    bt_config: &BacktestConfig,
    strategy: &Strategy,
    output_path: Option<&Path>,
) -> Result<PipelineOutput, SmacrossError> {
    let output = run_pipeline(data_port, bt_config, strategy)?;

    eprintln!("\n=== {} | {} ===", output.symbol, strategy.name);
    eprintln!("{}", format_summary(&output.report));
    eprintln!(
        "Final Value:      {:.2} (from {:.2})",
        output
            .backtest
            .valuations
            .last()
            .map_or(bt_config.initial_capital, |p| p.value),
        bt_config.initial_capital
    );
    eprintln!("Trades:           {}", output.backtest.trades);

    if let Some(path) = output_path {
        CsvReportAdapter::new().write(&output, path)?;
        info!(path = %path.display(), "annotated series written");
    }

    Ok(output)
}

pub fn format_summary(report: &PerformanceReport) -> String {
    let sharpe = match report.sharpe_ratio {
        Some(s) => format!("{s:.2}"),
        None => "undefined".to_string(),
    };
    format!(
        "Annual Return:    {:.2}%\nSharpe Ratio:     {}\nMax Drawdown:     {:.2}%",
        report.annualized_return * 100.0,
        sharpe,
        report.max_drawdown * 100.0
    )
}

pub fn run_dry_run(config_path: &Path) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    let strategy = build_strategy(&adapter);

    eprintln!("Config validated successfully");
    eprintln!("\nBacktest:");
    eprintln!("  symbol:          {}", bt_config.symbol);
    eprintln!(
        "  period:          {} to {} (end exclusive)",
        bt_config.start_date, bt_config.end_date
    );
    eprintln!("  initial capital: {:.2}", bt_config.initial_capital);
    eprintln!("\nStrategy: {}", strategy.name);
    eprintln!("  fast SMA:        {}", strategy.fast_window);
    eprintln!("  slow SMA:        {}", strategy.slow_window);
    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let strategy = build_strategy(&adapter);
    eprintln!("Strategy settings:");
    for key in ["fast_window", "slow_window", "volume_window", "volatility_window"] {
        let origin = if adapter.has_key("strategy", key) {
            "configured"
        } else {
            "default"
        };
        let value = match key {
            "fast_window" => strategy.fast_window,
            "slow_window" => strategy.slow_window,
            "volume_window" => strategy.volume_window,
            _ => strategy.volatility_window,
        };
        eprintln!("  {key:<18} {value:>5} ({origin})");
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_info(config_path: &Path, symbol: Option<&str>, data_dir: Option<&Path>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    let symbol = match symbol
        .map(str::to_string)
        .or_else(|| config.get_string("backtest", "symbol"))
    {
        Some(s) if !s.trim().is_empty() => s.trim().to_uppercase(),
        _ => {
            return fail(SmacrossError::ConfigMissing {
                section: "backtest".into(),
                key: "symbol".into(),
            });
        }
    };

    let adapter = CsvAdapter::new(resolve_data_dir(data_dir, &config));
    match adapter.get_data_range(&symbol) {
        Ok(Some((first, last, count))) => {
            println!("{}: {} bars, {} to {}", symbol, count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => fail(SmacrossError::NoData { symbol }),
        Err(e) => fail(e),
    }
}
