//! JSON snapshots of a universe and of a risk-free curve.
//!
//! Records mirror the JSON layout and are converted into validated domain
//! types in one step, so a malformed file never yields a partial [`Index`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analytics::RiskFreeSeries;
use crate::index::SectorGroup;
use crate::{
    Asset, Bar, Benchmark, CoreError, Fundamentals, Index, Observation, PriceSeries, Sector, Series, Symbol,
    TradeDate, UniverseId, ValidationError,
};

/// Universe dump: assets with their bars, an optional sector grouping and
/// optional benchmark index levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub universe: UniverseId,
    pub assets: Vec<AssetRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Vec<SectorRecord>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benchmarks: Vec<BenchmarkRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub symbol: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default)]
    pub fundamentals: Fundamentals,
    pub bars: Vec<BarRecord>,
}

/// Daily bar; missing open/high/low fall back to the close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRecord {
    pub date: TradeDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRecord {
    pub sector: String,
    pub symbols: Vec<Symbol>,
}

/// Benchmark index levels, e.g. `{"name": "SP500", "levels": [{"date", "value"}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub levels: Vec<Observation>,
}

impl BenchmarkRecord {
    pub fn into_benchmark(self) -> Result<Benchmark, ValidationError> {
        Benchmark::new(self.name, Series::new(self.levels)?)
    }
}

impl IndexSnapshot {
    pub fn from_json_str(input: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn into_index(self) -> Result<Index, ValidationError> {
        let assets = self
            .assets
            .into_iter()
            .map(AssetRecord::into_asset)
            .collect::<Result<Vec<_>, _>>()?;

        let benchmarks = self
            .benchmarks
            .into_iter()
            .map(BenchmarkRecord::into_benchmark)
            .collect::<Result<Vec<_>, _>>()?;

        let index = match self.sectors {
            Some(records) => {
                let groups = records
                    .into_iter()
                    .map(|record| SectorGroup::new(Sector::new(record.sector), record.symbols))
                    .collect();
                Index::with_sectors(self.universe, assets, groups)?
            }
            None => Index::new(self.universe, assets)?,
        };
        index.with_benchmarks(benchmarks)
    }
}

impl AssetRecord {
    pub fn into_asset(self) -> Result<Asset, ValidationError> {
        let bars = self
            .bars
            .into_iter()
            .map(BarRecord::into_bar)
            .collect::<Result<Vec<_>, _>>()?;
        let name = self.name.unwrap_or_else(|| self.symbol.to_string());
        Asset::new(
            self.symbol,
            name,
            Sector::from_label(self.sector.as_deref()),
            PriceSeries::new(bars)?,
            self.fundamentals,
        )
    }
}

impl BarRecord {
    pub fn into_bar(self) -> Result<Bar, ValidationError> {
        Bar::new(
            self.date,
            self.open.unwrap_or(self.close),
            self.high.unwrap_or(self.close),
            self.low.unwrap_or(self.close),
            self.close,
            self.volume,
        )
    }
}

/// Reads and validates a universe snapshot file.
pub fn load_index(path: impl AsRef<Path>) -> Result<Index, CoreError> {
    let path = path.as_ref();
    let index = IndexSnapshot::from_path(path)?.into_index()?;
    tracing::info!(
        path = %path.display(),
        universe = index.universe().as_str(),
        assets = index.len(),
        sectors = index.sectors().len(),
        benchmarks = index.benchmarks().len(),
        "snapshot loaded"
    );
    Ok(index)
}

/// Unit of the quotes in a risk-free file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    #[default]
    Percent,
    Fraction,
}

/// Risk-free quotes, e.g. a 10-year Treasury yield curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFreeSnapshot {
    #[serde(default)]
    pub unit: RateUnit,
    pub quotes: Vec<Observation>,
}

impl RiskFreeSnapshot {
    pub fn from_json_str(input: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Validates the quotes and forward-fills them onto calendar days.
    pub fn into_risk_free(self) -> Result<RiskFreeSeries, ValidationError> {
        let quotes = Series::new(self.quotes)?;
        Ok(match self.unit {
            RateUnit::Percent => RiskFreeSeries::from_percent_quotes(&quotes),
            RateUnit::Fraction => RiskFreeSeries::from_fraction_quotes(&quotes),
        })
    }
}

pub fn load_risk_free(path: impl AsRef<Path>) -> Result<RiskFreeSeries, CoreError> {
    let path = path.as_ref();
    let risk_free = RiskFreeSnapshot::from_path(path)?.into_risk_free()?;
    tracing::info!(path = %path.display(), days = risk_free.yields().len(), "risk-free curve loaded");
    Ok(risk_free)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_record_defaults_to_close() {
        let record: BarRecord =
            serde_json::from_str(r#"{"date":"2024-01-02","close":12.5}"#).expect("parse");
        let bar = record.into_bar().expect("bar");
        assert_eq!(bar.open, 12.5);
        assert_eq!(bar.low, 12.5);
        assert_eq!(bar.volume, None);
    }

    #[test]
    fn missing_name_falls_back_to_symbol() {
        let record: AssetRecord = serde_json::from_str(
            r#"{"symbol":"abc","bars":[{"date":"2024-01-02","close":1.0}]}"#,
        )
        .expect("parse");
        let asset = record.into_asset().expect("asset");
        assert_eq!(asset.name, "ABC");
        assert!(asset.sector.is_unassigned());
    }

    #[test]
    fn fraction_quotes_are_kept() {
        let snapshot = RiskFreeSnapshot::from_json_str(
            r#"{"unit":"fraction","quotes":[{"date":"2024-01-01","value":0.04},{"date":"2024-01-03","value":0.05}]}"#,
        )
        .expect("parse");
        let risk_free = snapshot.into_risk_free().expect("series");
        let values: Vec<f64> = risk_free.yields().values().collect();
        assert_eq!(values, vec![0.04, 0.04, 0.05]);
    }
}
