//! # SectorLens Core
//!
//! Return, risk and sector analytics over stock-index universes.
//!
//! ## Overview
//!
//! - **Validated domain models** for tickers, daily bars, fundamentals and sectors
//! - **Date windowing** with inclusive, optionally open bounds
//! - **Return and risk calculators**: cumulative return, annualized volatility, Sharpe ratio
//! - **Sector and index rollups**, sorted and ranked
//! - **JSON snapshots** turned into a validated [`Index`]
//! - **Response envelope** with metadata and structured errors
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analytics`] | Windowing, resampling, return/risk calculators, aggregation |
//! | [`config`] | [`AnalyticsConfig`] passed to every calculation |
//! | [`domain`] | Domain models (Symbol, Bar, PriceSeries, Asset, Sector, Benchmark) |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`index`] | Universe of assets grouped by sector |
//! | [`memo`] | Single-slot memo for repeated requests |
//! | [`snapshot`] | JSON universe and risk-free loaders |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sectorlens_core::analytics::{sector_mean_returns, DateWindow};
//! use sectorlens_core::{snapshot, AnalyticsConfig, Sampling};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let index = snapshot::load_index("sp500.json")?;
//!     let window = DateWindow::parse(Some("2023-01-01"), Some("2023-12-31"))?;
//!     let config = AnalyticsConfig::default().with_sampling(Sampling::Weekly);
//!
//!     for mean in sector_mean_returns(&index, &window, &config) {
//!         println!("{:<28} {:>8.2}%", mean.sector, mean.mean_return * 100.0);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod index;
pub mod memo;
pub mod snapshot;

pub use analytics::{DateWindow, InvestmentReturn, RiskFreeSeries};
pub use config::AnalyticsConfig;
pub use domain::{
    Asset, Bar, Benchmark, DateSpan, Dated, Fundamentals, Observation, PriceField, PriceSeries,
    Sampling, Sector, Series, Symbol, TradeDate, UniverseId, GICS_SECTORS,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{AnalyticsError, CoreError, ValidationError};
pub use index::{Index, SectorGroup};
pub use memo::{CacheMode, RangeMemo};
