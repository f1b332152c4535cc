//! Index-level rollups: per-asset metrics grouped, averaged and ranked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::prices::PriceLevels;
use super::risk::{mean, RiskFreeSeries};
use super::window::DateWindow;
use crate::memo::CacheMode;
use crate::{
    AnalyticsConfig, AnalyticsError, Index, Observation, Sampling, Sector, Series, Symbol,
    TradeDate,
};

/// Investment return of one constituent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReturnRow {
    pub ticker: Symbol,
    pub sector: Sector,
    pub name: String,
    #[serde(rename = "return")]
    pub investment_return: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
}

/// Mean investment return of a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorMean {
    pub sector: Sector,
    pub mean_return: f64,
    /// Assets that contributed a defined return.
    pub constituents: usize,
}

/// Return, risk and price snapshot of one constituent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReturnRow {
    pub ticker: Symbol,
    pub sector: Sector,
    pub name: String,
    #[serde(rename = "return")]
    pub investment_return: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe: Option<f64>,
    #[serde(flatten)]
    pub prices: PriceLevels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRank {
    pub ticker: Symbol,
    pub mean_volume: f64,
}

/// Date-aligned columns, one per sector; `None` where a sector has no value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnTable {
    pub dates: Vec<TradeDate>,
    pub columns: Vec<Sector>,
    pub rows: Vec<Vec<Option<f64>>>,
}

impl ReturnTable {
    /// Defined values of `sector` as a series.
    pub fn column(&self, sector: &Sector) -> Option<Series> {
        let position = self.columns.iter().position(|column| column == sector)?;
        let points = self
            .dates
            .iter()
            .zip(&self.rows)
            .filter_map(|(date, row)| row[position].map(|value| Observation::new(*date, value)))
            .collect();
        Some(Series::from_sorted(points))
    }
}

/// Sector mean over the window starting at `date`, long format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorReturnPoint {
    pub date: TradeDate,
    pub sector: Sector,
    #[serde(rename = "return")]
    pub mean_return: f64,
}

/// Market cap total and average valuation figures of a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorFundamentals {
    pub sector: Sector,
    pub market_cap: f64,
    pub trailing_pe: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub constituents: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub midpoint: f64,
    pub count: usize,
}

/// Histogram of investment returns; empty bins are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnDistribution {
    pub bins: Vec<HistogramBin>,
    pub bin_width: f64,
    pub observations: usize,
}

/// One row per asset with a defined investment return, in index order.
pub fn compute_investment_returns(
    index: &Index,
    window: &DateWindow,
    config: &AnalyticsConfig,
) -> Vec<InvestmentReturnRow> {
    let rows: Vec<InvestmentReturnRow> = index
        .assets()
        .iter()
        .filter_map(|asset| {
            let Some(outcome) = asset.investment_outcome(window, config) else {
                tracing::debug!(symbol = asset.symbol.as_str(), "no investment return in window");
                return None;
            };
            Some(InvestmentReturnRow {
                ticker: asset.symbol.clone(),
                sector: asset.sector.clone(),
                name: asset.name.clone(),
                investment_return: outcome.fraction,
                gain: outcome.gain,
            })
        })
        .collect();

    tracing::info!(
        universe = index.universe().as_str(),
        %window,
        defined = rows.len(),
        skipped = index.len() - rows.len(),
        "investment returns computed"
    );
    rows
}

/// Sector means sorted high to low, memoized on the request key.
pub fn sector_mean_returns(
    index: &Index,
    window: &DateWindow,
    config: &AnalyticsConfig,
) -> Vec<SectorMean> {
    sector_mean_returns_with(index, window, config, CacheMode::Use)
}

/// [`sector_mean_returns`] with explicit memo behavior.
///
/// Assets without a result are skipped, not counted as zero. Sectors
/// with no defined result are omitted. Ties keep sector order.
pub fn sector_mean_returns_with(
    index: &Index,
    window: &DateWindow,
    config: &AnalyticsConfig,
    mode: CacheMode,
) -> Vec<SectorMean> {
    let key = (*window, config.sampling, config.price_field);
    index
        .sector_mean_memo()
        .get_or_compute(key, mode, || compute_sector_means(index, window, config))
}

fn compute_sector_means(
    index: &Index,
    window: &DateWindow,
    config: &AnalyticsConfig,
) -> Vec<SectorMean> {
    let mut means: Vec<SectorMean> = index
        .sectors()
        .iter()
        .filter_map(|group| {
            let returns: Vec<f64> = index
                .members(group)
                .filter_map(|asset| asset.investment_return(window, config))
                .collect();
            let mean_return = mean(&returns)?;
            Some(SectorMean {
                sector: group.sector.clone(),
                mean_return,
                constituents: returns.len(),
            })
        })
        .collect();
    means.sort_by(|left, right| right.mean_return.total_cmp(&left.mean_return));

    tracing::info!(%window, sectors = means.len(), "sector mean returns computed");
    means
}

/// Row-wise mean of the constituents' cumulative return curves per sector,
/// outer-joined on date.
pub fn sector_cumulative_return_history(
    index: &Index,
    window: &DateWindow,
    sectors: &[Sector],
    config: &AnalyticsConfig,
) -> Result<ReturnTable, AnalyticsError> {
    let mut columns: Vec<BTreeMap<TradeDate, (f64, usize)>> = Vec::with_capacity(sectors.len());
    for sector in sectors {
        let group = index.require_sector(sector)?;
        let mut sums: BTreeMap<TradeDate, (f64, usize)> = BTreeMap::new();
        for asset in index.members(group) {
            for point in asset.cumulative_return(window, config).points() {
                let entry = sums.entry(point.date).or_insert((0.0, 0));
                entry.0 += point.value;
                entry.1 += 1;
            }
        }
        columns.push(sums);
    }

    let mut dates: Vec<TradeDate> = columns
        .iter()
        .flat_map(|column| column.keys().copied())
        .collect();
    dates.sort_unstable();
    dates.dedup();

    let rows: Vec<Vec<Option<f64>>> = dates
        .iter()
        .map(|date| {
            columns
                .iter()
                .map(|column| {
                    column
                        .get(date)
                        .map(|(sum, count)| sum / *count as f64)
                })
                .collect()
        })
        .collect();

    Ok(ReturnTable {
        dates,
        columns: sectors.to_vec(),
        rows,
    })
}

/// Return, volatility, Sharpe and price levels for every constituent.
pub fn compute_risk_return(
    index: &Index,
    window: &DateWindow,
    risk_free: &RiskFreeSeries,
    config: &AnalyticsConfig,
) -> Vec<RiskReturnRow> {
    if risk_free.is_empty() {
        tracing::warn!("risk-free series is empty; Sharpe ratios are undefined");
    }
    index
        .assets()
        .iter()
        .map(|asset| RiskReturnRow {
            ticker: asset.symbol.clone(),
            sector: asset.sector.clone(),
            name: asset.name.clone(),
            investment_return: asset.investment_return(window, config),
            volatility: asset.volatility(window, config),
            sharpe: asset.sharpe(window, risk_free, config),
            prices: asset.price_levels(),
        })
        .collect()
}

/// Mean traded volume per ticker, highest first.
pub fn compute_mean_volume(
    index: &Index,
    window: &DateWindow,
    fully_within: bool,
) -> Vec<VolumeRank> {
    let mut ranks: Vec<VolumeRank> = index
        .assets()
        .iter()
        .filter_map(|asset| {
            Some(VolumeRank {
                ticker: asset.symbol.clone(),
                mean_volume: asset.mean_trade_volume(window, fully_within)?,
            })
        })
        .collect();
    ranks.sort_by(|left, right| right.mean_volume.total_cmp(&left.mean_volume));
    ranks
}

/// Sector means over consecutive periods in long format.
///
/// Boundaries are the period ends of `frequency` between `start` and `end`
/// (defaulting to the index date range). Each window runs from one
/// boundary to the next, both inclusive, and is labelled by its first day.
pub fn sector_mean_return_long(
    index: &Index,
    frequency: Sampling,
    start: Option<TradeDate>,
    end: Option<TradeDate>,
    config: &AnalyticsConfig,
) -> Result<Vec<SectorReturnPoint>, AnalyticsError> {
    let requested = DateWindow::new(start, end)?;
    let Some(span) = index.date_range() else {
        return Ok(Vec::new());
    };
    let start = requested.start().unwrap_or(span.first);
    let end = requested.end().unwrap_or(span.last);
    let boundaries = period_boundaries(frequency, start, end);

    let mut points = Vec::new();
    for pair in boundaries.windows(2) {
        let window = DateWindow::between(pair[0], pair[1])?;
        for sector_mean in compute_sector_means(index, &window, config) {
            points.push(SectorReturnPoint {
                date: pair[0],
                sector: sector_mean.sector,
                mean_return: sector_mean.mean_return,
            });
        }
    }
    Ok(points)
}

fn period_boundaries(frequency: Sampling, start: TradeDate, end: TradeDate) -> Vec<TradeDate> {
    let mut boundaries = Vec::new();
    let mut current = frequency.bucket_label(start);
    while current <= end {
        boundaries.push(current);
        let Some(next_day) = current.next_day() else {
            break;
        };
        current = frequency.bucket_label(next_day);
    }
    boundaries
}

/// Summed market cap plus mean trailing P/E and dividend yield per sector,
/// over the assets reporting each figure.
pub fn sector_fundamentals(index: &Index) -> Vec<SectorFundamentals> {
    index
        .sectors()
        .iter()
        .map(|group| {
            let members: Vec<_> = index.members(group).collect();
            let market_cap: f64 = members
                .iter()
                .filter_map(|asset| asset.fundamentals.market_cap)
                .sum();
            let trailing_pe: Vec<f64> = members
                .iter()
                .filter_map(|asset| asset.fundamentals.trailing_pe)
                .collect();
            let dividend_yield: Vec<f64> = members
                .iter()
                .filter_map(|asset| asset.fundamentals.dividend_yield)
                .collect();
            SectorFundamentals {
                sector: group.sector.clone(),
                market_cap,
                trailing_pe: mean(&trailing_pe),
                dividend_yield: mean(&dividend_yield),
                constituents: members.len(),
            }
        })
        .collect()
}

/// Equal-width histogram of investment returns between the smallest and
/// largest value, reported by bin midpoint.
pub fn return_distribution(
    index: &Index,
    window: &DateWindow,
    config: &AnalyticsConfig,
) -> Result<ReturnDistribution, AnalyticsError> {
    let bins = config.histogram_bins;
    if bins == 0 {
        return Err(AnalyticsError::InvalidBins);
    }

    let scale = if config.as_percent { 100.0 } else { 1.0 };
    let values: Vec<f64> = compute_investment_returns(index, window, config)
        .into_iter()
        .map(|row| row.investment_return * scale)
        .collect();
    Ok(histogram(&values, bins))
}

fn histogram(values: &[f64], bins: usize) -> ReturnDistribution {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return ReturnDistribution::default();
    };
    let (low, high) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (high - low) / bins as f64;

    // Only occupied slots are stored, so any bin count is affordable.
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for value in values {
        let slot = ((value - low) / width) as usize;
        *counts.entry(slot.min(bins - 1)).or_default() += 1;
    }

    let kept = counts
        .into_iter()
        .map(|(slot, count)| HistogramBin {
            midpoint: low + width * (slot as f64 + 0.5),
            count,
        })
        .collect();

    ReturnDistribution {
        bins: kept,
        bin_width: width,
        observations: values.len(),
    }
}
