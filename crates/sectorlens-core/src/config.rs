use serde::{Deserialize, Serialize};

use crate::{PriceField, Sampling};

/// Immutable knobs shared by every analytics call.
///
/// Deserializes from a partial JSON object; missing fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub sampling: Sampling,
    pub price_field: PriceField,
    pub as_percent: bool,
    pub histogram_bins: usize,
    pub initial_investment: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            sampling: Sampling::Daily,
            price_field: PriceField::Close,
            as_percent: false,
            histogram_bins: 100,
            initial_investment: 0.0,
        }
    }
}

impl AnalyticsConfig {
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_price_field(mut self, price_field: PriceField) -> Self {
        self.price_field = price_field;
        self
    }

    pub fn with_percent(mut self, as_percent: bool) -> Self {
        self.as_percent = as_percent;
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    pub fn with_initial_investment(mut self, amount: f64) -> Self {
        self.initial_investment = amount;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AnalyticsConfig =
            serde_json::from_str(r#"{"sampling":"M","as_percent":true}"#).expect("must parse");
        assert_eq!(config.sampling, Sampling::Monthly);
        assert!(config.as_percent);
        assert_eq!(config.price_field, PriceField::Close);
        assert_eq!(config.histogram_bins, 100);
    }
}
