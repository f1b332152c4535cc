//! CLI argument definitions for SectorLens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `returns` | Cumulative and investment return of one ticker |
//! | `risk` | Annualized volatility and Sharpe ratio of one ticker |
//! | `screen` | Risk/return table for the whole universe |
//! | `sectors` | Sector mean returns, high to low |
//! | `sector-history` | Aggregate cumulative return curves per sector |
//! | `sector-long` | Periodic sector means in long format |
//! | `fundamentals` | Sector market cap, P/E and dividend yield |
//! | `volume` | Mean traded volume ranking |
//! | `distribution` | Histogram of investment returns |
//! | `benchmarks` | Cumulative return of benchmark indices |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--snapshot` | `$SECTORLENS_HOME/snapshot.json` | Universe snapshot file |
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--log-level` | `$SECTORLENS_LOG` or `warn` | Log filter written to stderr |
//!
//! # Examples
//!
//! ```bash
//! sectorlens --snapshot sp500.json returns AAPL --start 2023-01-01 --sampling W
//! sectorlens sectors --start 2023-01-01 --end 2023-12-31 --format table
//! sectorlens risk MSFT --risk-free dgs10.json --sampling M --strict
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// SectorLens - return, risk and sector analytics for stock-index universes.
#[derive(Debug, Parser)]
#[command(
    name = "sectorlens",
    author,
    version,
    about = "Return, risk and sector analytics for stock-index universes"
)]
pub struct Cli {
    /// Universe snapshot (JSON) to analyze.
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Log filter directive, e.g. `debug` or `sectorlens_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cumulative return series and investment return of one ticker.
    ///
    ///   sectorlens returns AAPL --start 2023-01-01 --percent
    Returns(ReturnsArgs),

    /// Annualized volatility and Sharpe ratio of one ticker.
    ///
    ///   sectorlens risk AAPL --risk-free dgs10.json --sampling W
    Risk(RiskArgs),

    /// Return, volatility, Sharpe and price levels for every ticker.
    Screen(ScreenArgs),

    /// Mean investment return per sector, sorted high to low.
    Sectors(SectorsArgs),

    /// Aggregate cumulative return curve for one or more sectors.
    ///
    ///   sectorlens sector-history Energy "Health Care" --sampling M
    SectorHistory(SectorHistoryArgs),

    /// Sector mean returns over consecutive month or quarter windows.
    SectorLong(SectorLongArgs),

    /// Summed market cap and average valuation figures per sector.
    Fundamentals,

    /// Mean traded volume per ticker, highest first.
    Volume(VolumeArgs),

    /// Histogram of investment returns across the universe.
    Distribution(DistributionArgs),

    /// Cumulative return of benchmark index levels carried by the snapshot.
    ///
    ///   sectorlens benchmarks SP500 Nasdaq --sampling M --common
    Benchmarks(BenchmarksArgs),
}

/// Inclusive date bounds shared by every analytics command.
#[derive(Debug, Clone, Default, Args)]
pub struct WindowArgs {
    /// First date of the window (YYYY-MM-DD); open when omitted.
    #[arg(long)]
    pub start: Option<String>,

    /// Last date of the window (YYYY-MM-DD); open when omitted.
    #[arg(long)]
    pub end: Option<String>,
}

/// Resampling options; omitted values fall back to the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct SamplingArgs {
    /// Resampling frequency: D, W, M or Q.
    #[arg(long)]
    pub sampling: Option<String>,

    /// Bar field feeding the calculation: open, high, low or close.
    #[arg(long)]
    pub price_field: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReturnsArgs {
    /// Ticker symbol.
    pub symbol: String,

    #[command(flatten)]
    pub window: WindowArgs,

    #[command(flatten)]
    pub sampling: SamplingArgs,

    /// Report the cumulative series in percent.
    #[arg(long, default_value_t = false)]
    pub percent: bool,

    /// Dollar amount invested at the start of the window.
    #[arg(long)]
    pub initial_investment: Option<f64>,
}

#[derive(Debug, Args)]
pub struct RiskArgs {
    /// Ticker symbol.
    pub symbol: String,

    /// Risk-free quotes file (JSON); defaults to the config file entry.
    #[arg(long)]
    pub risk_free: Option<PathBuf>,

    #[command(flatten)]
    pub window: WindowArgs,

    #[command(flatten)]
    pub sampling: SamplingArgs,
}

#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// Risk-free quotes file (JSON); Sharpe ratios are omitted without one.
    #[arg(long)]
    pub risk_free: Option<PathBuf>,

    #[command(flatten)]
    pub window: WindowArgs,

    #[command(flatten)]
    pub sampling: SamplingArgs,
}

#[derive(Debug, Args)]
pub struct SectorsArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    #[command(flatten)]
    pub sampling: SamplingArgs,
}

#[derive(Debug, Args)]
pub struct SectorHistoryArgs {
    /// One or more sector names as listed by `sectors`.
    #[arg(required = true, num_args = 1..)]
    pub sectors: Vec<String>,

    #[command(flatten)]
    pub window: WindowArgs,

    #[command(flatten)]
    pub sampling: SamplingArgs,

    /// Report the curves in percent.
    #[arg(long, default_value_t = false)]
    pub percent: bool,
}

#[derive(Debug, Args)]
pub struct SectorLongArgs {
    /// Period boundaries: M (month ends) or Q (quarter ends).
    #[arg(long, default_value = "M")]
    pub frequency: String,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Debug, Args)]
pub struct VolumeArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Only rank tickers whose history covers the whole window.
    #[arg(long, default_value_t = false)]
    pub fully_within: bool,
}

#[derive(Debug, Args)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    #[command(flatten)]
    pub sampling: SamplingArgs,

    /// Number of equal-width bins.
    #[arg(long)]
    pub bins: Option<usize>,

    /// Bin returns in percent.
    #[arg(long, default_value_t = false)]
    pub percent: bool,
}

#[derive(Debug, Args)]
pub struct BenchmarksArgs {
    /// Benchmark names; every benchmark in the snapshot when omitted.
    pub names: Vec<String>,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Resampling frequency: D, W, M or Q.
    #[arg(long)]
    pub sampling: Option<String>,

    /// Clamp the window to the dates all selected benchmarks share.
    #[arg(long, default_value_t = false)]
    pub common: bool,

    /// Report the curves in percent.
    #[arg(long, default_value_t = false)]
    pub percent: bool,
}
