//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest;
use crate::domain::config_validation::{
    build_backtest_params, build_strategy_spec, validate_backtest_config,
    validate_strategy_config, BacktestParams,
};
use crate::domain::error::TradesimError;
use crate::domain::strategy::build_strategy;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "tradesim", about = "Historical trading strategy backtester")]
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
        /// Override [backtest] symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Override [backtest] start_date
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Override [backtest] end_date
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Directory to write equity.csv and trades.csv into
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override [data] path
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a config file without running
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the available data range for a symbol
    Info {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            start,
            end,
            output,
            data_dir,
        } => run_backtest_cmd(
            &config,
            symbol.as_deref(),
            start,
            end,
            output.as_deref(),
            data_dir,
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Info {
            symbol,
            config,
            data_dir,
        } => run_info(&symbol, config.as_ref(), data_dir),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TradesimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Resolve the CSV data directory: CLI flag beats `[data] path` beats `./data`.
pub fn resolve_data_dir(override_dir: Option<PathBuf>, config: Option<&dyn ConfigPort>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }
    config
        .and_then(|c| c.get_string("data", "path"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./data"))
}

fn run_backtest_cmd(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    start_override: Option<NaiveDate>,
    end_override: Option<NaiveDate>,
    output_dir: Option<&std::path::Path>,
    data_dir: Option<PathBuf>,
) -> ExitCode {
    // Stage 1: load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: build run parameters, applying CLI overrides
    let mut params = match build_backtest_params(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Some(symbol) = symbol_override {
        params.symbol = symbol.to_string();
    }
    if let Some(start) = start_override {
        params.start = start;
    }
    if let Some(end) = end_override {
        params.end = end;
    }

    // Stage 3: build strategy
    let spec = match build_strategy_spec(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let mut strategy = match build_strategy(&spec) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Strategy: {} {spec:?}", strategy.name());

    // Stage 4: run
    let port = CsvAdapter::new(resolve_data_dir(data_dir, Some(&adapter)));
    eprintln!(
        "Running backtest for {} from {} to {}",
        params.symbol, params.start, params.end
    );
    let result = match backtest::run_backtest(
        &port,
        &params.symbol,
        params.start,
        params.end,
        Some(strategy.as_mut()),
        params.cash,
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_summary(&params, &result);

    // Stage 5: optional export
    if let Some(dir) = output_dir {
        if let Err(e) = CsvReportAdapter.write(&result, dir) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Wrote equity.csv and trades.csv to {}", dir.display());
    }

    ExitCode::SUCCESS
}

fn print_summary(params: &BacktestParams, result: &backtest::BacktestResult) {
    println!("Backtest: {}", params.symbol);
    println!("  start value: {:.2}", result.start_value);
    println!("  final value: {:.2}", result.final_value);
    println!(
        "  net change:  {:+.2}",
        result.final_value - result.start_value
    );
    println!("  trades: {}", result.trades.len());
    for fill in &result.trades {
        println!(
            "    {} {} {} @ {:.4} (cash after: {:.2})",
            fill.date, fill.side, fill.quantity, fill.price, fill.cash_after
        );
    }
    if !result.rejections.is_empty() {
        println!("  rejected intents: {}", result.rejections.len());
        for rejected in &result.rejections {
            println!("    {} {:?}: {}", rejected.date, rejected.intent, rejected.reason);
        }
    }
    if let Some(position) = &result.open_position {
        println!(
            "  open position: {} shares @ {:.4} since {}",
            position.quantity, position.entry_price, position.entry_date
        );
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    println!("{} is valid", config_path.display());
    ExitCode::SUCCESS
}

fn run_info(symbol: &str, config_path: Option<&PathBuf>, data_dir: Option<PathBuf>) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => Some(a),
            Err(code) => return code,
        },
        None => None,
    };
    let port = CsvAdapter::new(resolve_data_dir(
        data_dir,
        adapter.as_ref().map(|a| a as &dyn ConfigPort),
    ));

    match port.get_data_range(symbol) {
        Ok(Some((first, last, count))) => {
            println!("{symbol}: {count} bars from {first} to {last}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("no data for {symbol}");
            ExitCode::from(4)
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
