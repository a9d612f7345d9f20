//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_trade_adapter::JsonTradeAdapter;
use crate::domain::analysis::{
    analyze, AnalysisConfig, AnalysisWindow, DEFAULT_BENCHMARK, DEFAULT_LOOKBACK_DAYS,
};
use crate::domain::error::PickwiseError;
use crate::domain::metrics::Summary;
use crate::domain::price_table::fetch_price_table;
use crate::domain::trade::{
    collect_tags, filter_by_tags, instrument_universe, sample_trades, validate_trades,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::trade_store_port::TradeStorePort;

#[derive(Parser, Debug)]
#[command(name = "pickwise", about = "Stock picking vs. benchmark investing tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the valuation and print the portfolio vs. benchmark summary
    Report {
        #[arg(short, long)]
        config: PathBuf,
        /// Only include trades carrying at least one of these tags (comma separated)
        #[arg(long)]
        tags: Option<String>,
        /// Analysis end date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Validate a trades file
    Validate {
        #[arg(short, long)]
        trades: PathBuf,
    },
    /// List distinct tags across a trades file
    Tags {
        #[arg(short, long)]
        trades: PathBuf,
    },
    /// Write a starter trades file
    Init {
        #[arg(short, long)]
        trades: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report {
            config,
            tags,
            as_of,
        } => run_report(&config, tags.as_deref(), as_of),
        Command::Validate { trades } => run_validate(&trades),
        Command::Tags { trades } => run_tags(&trades),
        Command::Init { trades } => run_init(&trades),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PickwiseError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_analysis_config(adapter: &dyn ConfigPort, as_of: Option<NaiveDate>) -> AnalysisConfig {
    AnalysisConfig {
        benchmark: adapter
            .get_string("analysis", "benchmark")
            .unwrap_or_else(|| DEFAULT_BENCHMARK.to_string())
            .to_uppercase(),
        lookback_days: adapter.get_int("analysis", "lookback_days", DEFAULT_LOOKBACK_DAYS),
        today: as_of.unwrap_or_else(|| Local::now().date_naive()),
    }
}

pub fn parse_tags(input: Option<&str>) -> Vec<String> {
    input
        .map(|s| {
            s.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn run_report(config_path: &PathBuf, tags: Option<&str>, as_of: Option<NaiveDate>) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let config = build_analysis_config(&adapter, as_of);

    // Stage 2: Load and select trades
    let trades_path = match adapter.get_string("trades", "path") {
        Some(p) => PathBuf::from(p),
        None => {
            let err = PickwiseError::ConfigMissing {
                section: "trades".into(),
                key: "path".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let store = JsonTradeAdapter::new(trades_path);
    let all_trades = match store.load() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let enabled: Vec<_> = all_trades
        .into_iter()
        .filter(|t| t.enabled.unwrap_or(true))
        .collect();
    let selected_tags = parse_tags(tags);
    let trades = filter_by_tags(&enabled, &selected_tags);

    // Stage 3: Validate the selection
    if let Err(e) = validate_trades(&trades, config.today) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 4: Derive window and universe
    let window = match AnalysisWindow::from_trades(&trades, &config) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let universe = instrument_universe(&trades, &config.benchmark);

    // Stage 5: Build the price table
    let prices_dir = match adapter.get_string("prices", "dir") {
        Some(d) => PathBuf::from(d),
        None => {
            let err = PickwiseError::ConfigMissing {
                section: "prices".into(),
                key: "dir".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };
    let price_port = CsvPriceAdapter::new(prices_dir);

    eprintln!(
        "Pricing {} instruments, {} to {}",
        universe.len(),
        window.start,
        window.end,
    );
    let table = fetch_price_table(&price_port, &universe, &window);

    // Stage 6: Run the engine
    let valuation = analyze(&trades, &table, &config);
    if valuation.unpriced_trades > 0 {
        eprintln!(
            "warning: {} trade(s) had no valid price on their date and were skipped",
            valuation.unpriced_trades,
        );
    }

    // Stage 7: Summarize and print
    let summary = Summary::compute(&valuation.records, &table, &config.benchmark);

    eprintln!("\n=== Portfolio vs. {} ===", config.benchmark);
    for metric in summary.metrics() {
        match &metric.delta {
            Some(delta) => eprintln!("{:<30} {}  ({})", metric.label, metric.value, delta),
            None => eprintln!("{:<30} {}", metric.label, metric.value),
        }
    }

    if !summary.rows.is_empty() {
        eprintln!("\n=== Trades ===");
        for row in &summary.rows {
            eprintln!(
                "  {} {:<6} return: {:>8}  market: {:>8}",
                row.date.format("%Y-%m-%d"),
                row.ticker,
                format_return(row.trade_return),
                format_return(row.market_return),
            );
        }
    }

    // Stage 8: Write CSV exports
    let daily_path = adapter
        .get_string("report", "daily_path")
        .unwrap_or_else(|| "daily.csv".to_string());
    let summary_path = adapter
        .get_string("report", "summary_path")
        .unwrap_or_else(|| "summary.csv".to_string());
    let report = CsvReportAdapter::new(PathBuf::from(&daily_path), PathBuf::from(&summary_path));

    if let Err(e) = report.write_daily(&valuation.records) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = report.write_summary(&summary) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("\nDaily records written to: {daily_path}");
    eprintln!("Trade summary written to: {summary_path}");
    ExitCode::SUCCESS
}

fn format_return(value: Option<f64>) -> String {
    match value {
        Some(r) => format!("{:+.2}%", r * 100.0),
        None => "n/a".to_string(),
    }
}

fn run_validate(trades_path: &PathBuf) -> ExitCode {
    eprintln!("Validating trades in {}", trades_path.display());
    let store = JsonTradeAdapter::new(trades_path.clone());

    let trades = match store.load() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match validate_trades(&trades, Local::now().date_naive()) {
        Ok(()) => {
            eprintln!("Trades file is valid ({} trades)", trades.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_tags(trades_path: &PathBuf) -> ExitCode {
    let store = JsonTradeAdapter::new(trades_path.clone());
    let trades = match store.load() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tags = collect_tags(&trades);
    if tags.is_empty() {
        eprintln!("No tags found");
    } else {
        for tag in &tags {
            println!("{tag}");
        }
        eprintln!("{} tags found", tags.len());
    }
    ExitCode::SUCCESS
}

fn run_init(trades_path: &PathBuf) -> ExitCode {
    if trades_path.exists() {
        eprintln!("error: {} already exists", trades_path.display());
        return ExitCode::from(1);
    }

    let store = JsonTradeAdapter::new(trades_path.clone());
    match store.save(&sample_trades()) {
        Ok(()) => {
            eprintln!("Starter trades written to: {}", trades_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
