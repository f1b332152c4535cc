//! Index universes: assets keyed by symbol plus their sector grouping.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analytics::{DateWindow, SectorMean};
use crate::memo::RangeMemo;
use crate::{
    AnalyticsError, Asset, Benchmark, DateSpan, PriceField, Sampling, Sector, Symbol, UniverseId,
    ValidationError,
};

/// Symbols belonging to one sector, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorGroup {
    pub sector: Sector,
    pub symbols: Vec<Symbol>,
}

impl SectorGroup {
    pub fn new(sector: Sector, symbols: Vec<Symbol>) -> Self {
        Self { sector, symbols }
    }
}

pub(crate) type SectorMeanKey = (DateWindow, Sampling, PriceField);

/// A loaded universe.
///
/// Every symbol belongs to exactly one sector group and the groups cover
/// the asset set; both constructors enforce this.
#[derive(Debug)]
pub struct Index {
    universe: UniverseId,
    assets: Vec<Asset>,
    positions: HashMap<Symbol, usize>,
    sectors: Vec<SectorGroup>,
    benchmarks: Vec<Benchmark>,
    sector_means: RangeMemo<SectorMeanKey, Vec<SectorMean>>,
}

impl Index {
    /// Groups assets by their own sector labels, in order of first appearance.
    pub fn new(universe: UniverseId, assets: Vec<Asset>) -> Result<Self, ValidationError> {
        let positions = index_positions(&assets)?;
        let mut sectors: Vec<SectorGroup> = Vec::new();
        for asset in &assets {
            match sectors.iter_mut().find(|group| group.sector == asset.sector) {
                Some(group) => group.symbols.push(asset.symbol.clone()),
                None => sectors.push(SectorGroup::new(
                    asset.sector.clone(),
                    vec![asset.symbol.clone()],
                )),
            }
        }

        Ok(Self::from_parts(universe, assets, positions, sectors))
    }

    /// Uses an explicit sector grouping.
    ///
    /// Groups naming the same sector are merged. An asset without a label
    /// adopts the sector of its group; a labelled asset must agree with it.
    pub fn with_sectors(
        universe: UniverseId,
        mut assets: Vec<Asset>,
        groups: Vec<SectorGroup>,
    ) -> Result<Self, ValidationError> {
        let positions = index_positions(&assets)?;
        let mut sectors: Vec<SectorGroup> = Vec::new();
        let mut assigned: HashSet<Symbol> = HashSet::with_capacity(assets.len());

        for group in groups {
            for symbol in &group.symbols {
                let Some(&position) = positions.get(symbol) else {
                    return Err(ValidationError::UnknownSectorMember {
                        sector: group.sector.to_string(),
                        symbol: symbol.to_string(),
                    });
                };
                if !assigned.insert(symbol.clone()) {
                    return Err(ValidationError::SymbolInMultipleSectors {
                        symbol: symbol.to_string(),
                    });
                }

                let asset = &mut assets[position];
                if asset.sector.is_unassigned() {
                    asset.sector = group.sector.clone();
                } else if asset.sector != group.sector {
                    return Err(ValidationError::SectorMismatch {
                        symbol: symbol.to_string(),
                        labelled: asset.sector.to_string(),
                        listed: group.sector.to_string(),
                    });
                }
            }

            match sectors.iter_mut().find(|existing| existing.sector == group.sector) {
                Some(existing) => existing.symbols.extend(group.symbols),
                None => sectors.push(group),
            }
        }

        if let Some(missing) = assets
            .iter()
            .find(|asset| !assigned.contains(&asset.symbol))
        {
            return Err(ValidationError::UnassignedSymbol {
                symbol: missing.symbol.to_string(),
            });
        }

        Ok(Self::from_parts(universe, assets, positions, sectors))
    }

    fn from_parts(
        universe: UniverseId,
        assets: Vec<Asset>,
        positions: HashMap<Symbol, usize>,
        sectors: Vec<SectorGroup>,
    ) -> Self {
        tracing::debug!(
            universe = universe.as_str(),
            assets = assets.len(),
            sectors = sectors.len(),
            "index assembled"
        );
        Self {
            universe,
            assets,
            positions,
            sectors,
            benchmarks: Vec::new(),
            sector_means: RangeMemo::default(),
        }
    }

    /// Attaches benchmark level histories; names must be unique ignoring
    /// case.
    pub fn with_benchmarks(mut self, benchmarks: Vec<Benchmark>) -> Result<Self, ValidationError> {
        for (position, benchmark) in benchmarks.iter().enumerate() {
            if benchmarks[..position]
                .iter()
                .any(|earlier| earlier.is_named(&benchmark.name))
            {
                return Err(ValidationError::DuplicateBenchmark {
                    name: benchmark.name.clone(),
                });
            }
        }
        self.benchmarks = benchmarks;
        Ok(self)
    }

    pub fn universe(&self) -> UniverseId {
        self.universe
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn asset(&self, symbol: &Symbol) -> Option<&Asset> {
        self.positions
            .get(symbol)
            .map(|&position| &self.assets[position])
    }

    pub fn require_asset(&self, symbol: &Symbol) -> Result<&Asset, AnalyticsError> {
        self.asset(symbol).ok_or_else(|| AnalyticsError::UnknownSymbol {
            symbol: symbol.to_string(),
        })
    }

    pub fn sectors(&self) -> &[SectorGroup] {
        &self.sectors
    }

    pub fn sector(&self, sector: &Sector) -> Option<&SectorGroup> {
        self.sectors.iter().find(|group| &group.sector == sector)
    }

    pub fn require_sector(&self, sector: &Sector) -> Result<&SectorGroup, AnalyticsError> {
        self.sector(sector).ok_or_else(|| AnalyticsError::UnknownSector {
            sector: sector.to_string(),
        })
    }

    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    pub fn benchmark(&self, name: &str) -> Option<&Benchmark> {
        self.benchmarks.iter().find(|benchmark| benchmark.is_named(name))
    }

    pub fn require_benchmark(&self, name: &str) -> Result<&Benchmark, AnalyticsError> {
        self.benchmark(name).ok_or_else(|| AnalyticsError::UnknownBenchmark {
            name: name.to_owned(),
        })
    }

    /// Assets of `group`, in the group's order.
    pub fn members<'a>(&'a self, group: &'a SectorGroup) -> impl Iterator<Item = &'a Asset> + 'a {
        group.symbols.iter().filter_map(|symbol| self.asset(symbol))
    }

    /// Earliest first date and latest last date over all assets.
    pub fn date_range(&self) -> Option<DateSpan> {
        self.assets
            .iter()
            .filter_map(Asset::date_range)
            .reduce(DateSpan::union)
    }

    /// The `n` largest assets by market cap as a new universe, largest
    /// first. Assets without a market cap rank last. Benchmarks describe
    /// the source universe and are not carried over.
    pub fn largest_by_market_cap(&self, universe: UniverseId, n: usize) -> Self {
        let mut ranked: Vec<&Asset> = self.assets.iter().collect();
        ranked.sort_by(|left, right| {
            match (left.fundamentals.market_cap, right.fundamentals.market_cap) {
                (Some(left), Some(right)) => right.total_cmp(&left),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });

        let assets: Vec<Asset> = ranked.into_iter().take(n).cloned().collect();
        let kept: HashSet<&Symbol> = assets.iter().map(|asset| &asset.symbol).collect();
        let sectors: Vec<SectorGroup> = self
            .sectors
            .iter()
            .filter_map(|group| {
                let symbols: Vec<Symbol> = group
                    .symbols
                    .iter()
                    .filter(|symbol| kept.contains(symbol))
                    .cloned()
                    .collect();
                (!symbols.is_empty()).then(|| SectorGroup::new(group.sector.clone(), symbols))
            })
            .collect();
        let positions = assets
            .iter()
            .enumerate()
            .map(|(position, asset)| (asset.symbol.clone(), position))
            .collect();

        Self::from_parts(universe, assets, positions, sectors)
    }

    /// Union of two universes tagged `composite`. On a duplicate symbol or
    /// benchmark name the entry from `other` replaces the one from `self`.
    pub fn combine(&self, other: &Self) -> Self {
        let mut assets: Vec<Asset> = self
            .assets
            .iter()
            .map(|asset| other.asset(&asset.symbol).unwrap_or(asset).clone())
            .collect();
        assets.extend(
            other
                .assets
                .iter()
                .filter(|asset| !self.positions.contains_key(&asset.symbol))
                .cloned(),
        );

        let positions = assets
            .iter()
            .enumerate()
            .map(|(position, asset)| (asset.symbol.clone(), position))
            .collect();
        let mut sectors: Vec<SectorGroup> = Vec::new();
        for asset in &assets {
            match sectors.iter_mut().find(|group| group.sector == asset.sector) {
                Some(group) => group.symbols.push(asset.symbol.clone()),
                None => sectors.push(SectorGroup::new(
                    asset.sector.clone(),
                    vec![asset.symbol.clone()],
                )),
            }
        }

        let mut benchmarks: Vec<Benchmark> = self
            .benchmarks
            .iter()
            .filter(|benchmark| other.benchmark(&benchmark.name).is_none())
            .cloned()
            .collect();
        benchmarks.extend(other.benchmarks.iter().cloned());

        let mut combined = Self::from_parts(UniverseId::Composite, assets, positions, sectors);
        combined.benchmarks = benchmarks;
        combined
    }

    pub(crate) fn sector_mean_memo(&self) -> &RangeMemo<SectorMeanKey, Vec<SectorMean>> {
        &self.sector_means
    }
}

impl Clone for Index {
    /// Copies the data; the clone starts with an empty memo.
    fn clone(&self) -> Self {
        let mut index = Self::from_parts(
            self.universe,
            self.assets.clone(),
            self.positions.clone(),
            self.sectors.clone(),
        );
        index.benchmarks = self.benchmarks.clone();
        index
    }
}

fn index_positions(assets: &[Asset]) -> Result<HashMap<Symbol, usize>, ValidationError> {
    let mut positions = HashMap::with_capacity(assets.len());
    for (position, asset) in assets.iter().enumerate() {
        if positions.insert(asset.symbol.clone(), position).is_some() {
            return Err(ValidationError::DuplicateSymbol {
                symbol: asset.symbol.to_string(),
            });
        }
    }
    Ok(positions)
}
