use serde::{Deserialize, Serialize};

use super::window::DateWindow;
use crate::{
    AnalyticsConfig, AnalyticsError, Asset, Benchmark, Index, Observation, Series, Symbol,
};

/// Outcome of holding an asset across a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReturn {
    /// Fractional return, `0.21` for +21%.
    pub fraction: f64,
    /// Dollar gain on the configured initial investment, when non-zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
}

/// Cumulative return curve of one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerReturns {
    pub symbol: Symbol,
    pub series: Series,
}

/// Cumulative return curve of one benchmark index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReturns {
    pub name: String,
    pub series: Series,
}

/// Simple period-over-period change, dated at the later observation.
///
/// `None` when a ratio is undefined (zero base price).
pub fn pct_change(prices: &Series) -> Option<Series> {
    let points = prices
        .points()
        .windows(2)
        .map(|pair| {
            let change = pair[1].value / pair[0].value - 1.0;
            change
                .is_finite()
                .then(|| Observation::new(pair[1].date, change))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(Series::from_sorted(points))
}

/// Natural log returns with the first value filled as `0.0`.
pub fn log_returns(prices: &Series) -> Option<Vec<f64>> {
    if prices.is_empty() {
        return Some(Vec::new());
    }
    let mut returns = Vec::with_capacity(prices.len());
    returns.push(0.0);
    for pair in prices.points().windows(2) {
        let value = (pair[1].value / pair[0].value).ln();
        if !value.is_finite() {
            return None;
        }
        returns.push(value);
    }
    Some(returns)
}

/// Compounded return of an already resampled price series:
/// `prod(1 + pct) - 1` at each date after the first.
///
/// Empty when fewer than two prices are available or a ratio is undefined.
/// `as_percent` scales the finished curve by 100.
pub fn cumulative_return(prices: &Series, as_percent: bool) -> Series {
    let Some(changes) = pct_change(prices) else {
        return Series::empty();
    };

    let mut growth = 1.0;
    let points: Vec<Observation> = changes
        .points()
        .iter()
        .map(|point| {
            growth *= 1.0 + point.value;
            Observation::new(point.date, growth - 1.0)
        })
        .collect();
    if points.iter().any(|point| !point.value.is_finite()) {
        return Series::empty();
    }

    let curve = Series::from_sorted(points);
    if as_percent {
        curve.scaled(100.0)
    } else {
        curve
    }
}

impl Asset {
    /// Cumulative return over `window`, sampled and scaled per `config`.
    pub fn cumulative_return(&self, window: &DateWindow, config: &AnalyticsConfig) -> Series {
        let prices = self.resampled_prices(window, config.sampling, config.price_field);
        cumulative_return(&prices, config.as_percent)
    }

    /// Fractional return over `window`; `config.as_percent` is ignored.
    pub fn investment_return(&self, window: &DateWindow, config: &AnalyticsConfig) -> Option<f64> {
        let prices = self.resampled_prices(window, config.sampling, config.price_field);
        cumulative_return(&prices, false).last_value()
    }

    /// [`Asset::investment_return`] plus the gain on
    /// `config.initial_investment`.
    pub fn investment_outcome(
        &self,
        window: &DateWindow,
        config: &AnalyticsConfig,
    ) -> Option<InvestmentReturn> {
        let fraction = self.investment_return(window, config)?;
        let gain = (config.initial_investment != 0.0)
            .then(|| config.initial_investment * fraction);
        Some(InvestmentReturn { fraction, gain })
    }
}

impl Benchmark {
    /// Cumulative return of the index level over `window`, sampled and
    /// scaled per `config`; `config.price_field` does not apply.
    pub fn cumulative_return(&self, window: &DateWindow, config: &AnalyticsConfig) -> Series {
        let levels = self.resampled_levels(window, config.sampling);
        cumulative_return(&levels, config.as_percent)
    }
}

impl Index {
    /// Cumulative return curves for the named benchmarks, or for all of
    /// them when `names` is empty. Benchmarks without a defined curve in
    /// the window are left out.
    pub fn benchmark_cumulative_returns(
        &self,
        names: &[String],
        window: &DateWindow,
        config: &AnalyticsConfig,
    ) -> Result<Vec<BenchmarkReturns>, AnalyticsError> {
        let selected: Vec<&Benchmark> = if names.is_empty() {
            self.benchmarks().iter().collect()
        } else {
            names
                .iter()
                .map(|name| self.require_benchmark(name))
                .collect::<Result<_, _>>()?
        };

        let mut curves = Vec::with_capacity(selected.len());
        for benchmark in selected {
            let series = benchmark.cumulative_return(window, config);
            if series.is_empty() {
                tracing::debug!(benchmark = benchmark.name.as_str(), "no cumulative return in window");
                continue;
            }
            curves.push(BenchmarkReturns {
                name: benchmark.name.clone(),
                series,
            });
        }
        Ok(curves)
    }

    /// Cumulative return curves for `symbols`; tickers without a defined
    /// curve in the window are left out.
    pub fn cumulative_returns_history(
        &self,
        symbols: &[Symbol],
        window: &DateWindow,
        config: &AnalyticsConfig,
    ) -> Result<Vec<TickerReturns>, AnalyticsError> {
        let mut history = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let asset = self.require_asset(symbol)?;
            let series = asset.cumulative_return(window, config);
            if series.is_empty() {
                tracing::debug!(symbol = symbol.as_str(), "no cumulative return in window");
                continue;
            }
            history.push(TickerReturns {
                symbol: symbol.clone(),
                series,
            });
        }
        Ok(history)
    }
}
