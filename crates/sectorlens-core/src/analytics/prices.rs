use serde::{Deserialize, Serialize};

use super::risk::mean;
use super::window::{select, DateWindow};
use crate::{Asset, TradeDate};

/// Latest close and trailing average closes ending at the asset's latest
/// date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    pub latest: Option<f64>,
    pub avg_last_week: Option<f64>,
    pub avg_last_month: Option<f64>,
    pub avg_last_six_months: Option<f64>,
    pub avg_last_year: Option<f64>,
}

impl Asset {
    pub fn latest_price(&self) -> Option<f64> {
        self.prices.bars().last().map(|bar| bar.close)
    }

    /// Mean close from `since` through the latest bar, both inclusive.
    pub fn average_price_since(&self, since: TradeDate) -> Option<f64> {
        let latest = self.latest_date()?;
        let window = DateWindow::between(since, latest).ok()?;
        let bars = select(self.prices.bars(), &window)?;
        mean(&bars.iter().map(|bar| bar.close).collect::<Vec<_>>())
    }

    /// Week is 7 days and month is 4 weeks; six months and one year use
    /// calendar arithmetic.
    pub fn price_levels(&self) -> PriceLevels {
        let Some(latest) = self.latest_date() else {
            return PriceLevels::default();
        };
        PriceLevels {
            latest: self.latest_price(),
            avg_last_week: self.average_price_since(latest.minus_days(7)),
            avg_last_month: self.average_price_since(latest.minus_days(28)),
            avg_last_six_months: self.average_price_since(latest.minus_months(6)),
            avg_last_year: self.average_price_since(latest.minus_years(1)),
        }
    }

    /// Mean traded volume inside `window`, over the bars that report one.
    ///
    /// `None` when the window misses the asset's history, or, with
    /// `fully_within`, when the window is not entirely inside it.
    pub fn mean_trade_volume(&self, window: &DateWindow, fully_within: bool) -> Option<f64> {
        let span = self.date_range()?;
        if !window.overlaps(span) || (fully_within && !window.is_fully_within(span)) {
            return None;
        }
        let bars = select(self.prices.bars(), window)?;
        let volumes: Vec<f64> = bars
            .iter()
            .filter_map(|bar| bar.volume)
            .map(|volume| volume as f64)
            .collect();
        mean(&volumes)
    }
}
