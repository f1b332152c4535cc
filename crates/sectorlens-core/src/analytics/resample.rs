use super::window::{select, DateWindow};
use crate::{Asset, Benchmark, Dated, Observation, PriceField, Sampling, Series};

/// Keeps the last observation of every sampling bucket, labelled with the
/// bucket's closing date.
///
/// `items` must be sorted by date; empty buckets produce no point.
pub fn resample_last<T, F>(items: &[T], sampling: Sampling, value_of: F) -> Series
where
    T: Dated,
    F: Fn(&T) -> f64,
{
    let mut points: Vec<Observation> = Vec::with_capacity(items.len());
    for item in items {
        let label = sampling.bucket_label(item.date());
        let value = value_of(item);
        match points.last_mut() {
            Some(last) if last.date == label => last.value = value,
            _ => points.push(Observation::new(label, value)),
        }
    }
    Series::from_sorted(points)
}

impl Asset {
    /// Prices inside `window`, resampled to `sampling`. Empty when the
    /// window holds no bar.
    pub fn resampled_prices(
        &self,
        window: &DateWindow,
        sampling: Sampling,
        field: PriceField,
    ) -> Series {
        select(self.prices.bars(), window).map_or_else(Series::empty, |bars| {
            resample_last(bars, sampling, |bar| bar.price(field))
        })
    }
}

impl Benchmark {
    pub fn resampled_levels(&self, window: &DateWindow, sampling: Sampling) -> Series {
        select(self.levels.points(), window).map_or_else(Series::empty, |points| {
            resample_last(points, sampling, |point| point.value)
        })
    }
}
