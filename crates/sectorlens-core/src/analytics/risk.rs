use serde::{Deserialize, Serialize};

use super::resample::resample_last;
use super::returns::{log_returns, pct_change};
use super::window::{select, DateWindow};
use crate::{AnalyticsConfig, Asset, Observation, Sampling, Series};

/// Annualized risk-free yields as fractions (`0.05` for 5%), one value per
/// calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskFreeSeries {
    yields: Series,
}

impl RiskFreeSeries {
    /// Wraps yields that are already fractional and daily aligned.
    pub fn new(yields: Series) -> Self {
        Self { yields }
    }

    /// Converts percent quotes to fractions and carries each quote forward
    /// onto every calendar day until the next one.
    pub fn from_percent_quotes(quotes: &Series) -> Self {
        let fractions = quotes
            .points()
            .iter()
            .map(|point| Observation::new(point.date, point.value / 100.0))
            .collect();
        Self::new(fill_daily(&Series::from_sorted(fractions)))
    }

    /// Same forward fill for quotes that are already fractional.
    pub fn from_fraction_quotes(quotes: &Series) -> Self {
        Self::new(fill_daily(quotes))
    }

    pub fn yields(&self) -> &Series {
        &self.yields
    }

    pub fn is_empty(&self) -> bool {
        self.yields.is_empty()
    }

    /// Mean of the last yield per sampling bucket inside `window`.
    pub fn annualized_mean(&self, window: &DateWindow, sampling: Sampling) -> Option<f64> {
        let points = select(self.yields.points(), window)?;
        let sampled = resample_last(points, sampling, |point| point.value);
        mean(&sampled.values().collect::<Vec<_>>())
    }
}

fn fill_daily(quotes: &Series) -> Series {
    let mut filled = Vec::new();
    let mut points = quotes.points().iter().peekable();
    while let Some(point) = points.next() {
        let stop = points.peek().map(|next| next.date);
        let mut day = Some(point.date);
        while let Some(current) = day {
            if stop.is_some_and(|stop| current >= stop) {
                break;
            }
            filled.push(Observation::new(current, point.value));
            if stop.is_none() {
                break;
            }
            day = current.next_day();
        }
    }
    Series::from_sorted(filled)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let value = values.iter().sum::<f64>() / values.len() as f64;
    value.is_finite().then_some(value)
}

/// Sample standard deviation (`n - 1` denominator); needs two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let center = mean(values)?;
    let squares: f64 = values.iter().map(|value| (value - center).powi(2)).sum();
    let value = (squares / (values.len() - 1) as f64).sqrt();
    value.is_finite().then_some(value)
}

/// `std(log returns) * sqrt(periods per year)` over resampled prices.
pub fn annualized_volatility(prices: &Series, sampling: Sampling) -> Option<f64> {
    let returns = log_returns(prices)?;
    let std = sample_std(&returns)?;
    Some(std * f64::from(sampling.periods_per_year()).sqrt())
}

/// Period volatility at or below this share of the mean period return
/// (floored at one) is treated as zero.
const ZERO_VOLATILITY_TOLERANCE: f64 = 1e-12;

/// Excess annualized return over annualized volatility.
///
/// Period returns are compounded to a yearly figure, `(1 + mean)^N - 1`.
/// `None` when volatility is zero up to rounding noise or any intermediate
/// is not finite.
pub fn sharpe_ratio(prices: &Series, risk_free: f64, sampling: Sampling) -> Option<f64> {
    let returns: Vec<f64> = pct_change(prices)?.values().collect();
    let periods = sampling.periods_per_year();
    let period_mean = mean(&returns)?;
    let std = sample_std(&returns)?;

    let annual_return = (1.0 + period_mean).powi(periods as i32) - 1.0;
    let annual_std = std * f64::from(periods).sqrt();
    if std <= ZERO_VOLATILITY_TOLERANCE * period_mean.abs().max(1.0) || !annual_std.is_finite() {
        return None;
    }

    let ratio = (annual_return - risk_free) / annual_std;
    ratio.is_finite().then_some(ratio)
}

impl Asset {
    pub fn volatility(&self, window: &DateWindow, config: &AnalyticsConfig) -> Option<f64> {
        let prices = self.resampled_prices(window, config.sampling, config.price_field);
        annualized_volatility(&prices, config.sampling)
    }

    /// Risk-free mean over `window` clamped to this asset's own span.
    pub fn risk_free_rate(
        &self,
        window: &DateWindow,
        risk_free: &RiskFreeSeries,
        sampling: Sampling,
    ) -> Option<f64> {
        let clamped = window.clamp_to(self.date_range()?)?;
        risk_free.annualized_mean(&clamped, sampling)
    }

    pub fn sharpe(
        &self,
        window: &DateWindow,
        risk_free: &RiskFreeSeries,
        config: &AnalyticsConfig,
    ) -> Option<f64> {
        let rate = self.risk_free_rate(window, risk_free, config.sampling)?;
        let prices = self.resampled_prices(window, config.sampling, config.price_field);
        sharpe_ratio(&prices, rate, config.sampling)
    }
}
