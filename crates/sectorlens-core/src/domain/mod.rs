//! # Domain Models
//!
//! Validated building blocks for the analytics layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Normalized ticker |
//! | [`TradeDate`] | Calendar date (`YYYY-MM-DD`) |
//! | [`Bar`] / [`PriceSeries`] | Daily OHLCV history with strictly increasing dates |
//! | [`Series`] | Dated `f64` values (returns, yields) |
//! | [`Fundamentals`] | Market cap, P/E and dividend data |
//! | [`Sector`] | GICS-normalized sector label |
//! | [`Asset`] | One index constituent |
//! | [`Benchmark`] | Level history of a benchmark index |
//! | [`Sampling`] | Resampling frequency with its annualization constant |
//! | [`UniverseId`] | Index universe identifier |
//!
//! Constructors validate their invariants, so analytics code can assume
//! ordered dates and finite, non-negative prices.

mod benchmark;
mod date;
mod models;
mod sampling;
mod sector;
mod series;
mod symbol;
mod universe;

pub use benchmark::{available_span, common_span, Benchmark};
pub use date::TradeDate;
pub use models::{Asset, Bar, Fundamentals, PriceField, PriceSeries};
pub use sampling::Sampling;
pub use sector::{Sector, GICS_SECTORS};
pub use series::{DateSpan, Dated, Observation, Series};
pub use symbol::Symbol;
pub use universe::UniverseId;
