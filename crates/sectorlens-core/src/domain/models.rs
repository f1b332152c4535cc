use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::series::{ensure_increasing, DateSpan, Dated, Observation, Series};
use crate::{Sector, Symbol, TradeDate, ValidationError};

/// Bar field feeding the analytics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl PriceField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
        }
    }
}

impl Display for PriceField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceField {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            other => Err(ValidationError::InvalidPriceField {
                value: other.to_owned(),
            }),
        }
    }
}

/// Daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: TradeDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(
        date: TradeDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Flat bar where every price equals `close`.
    pub fn flat(date: TradeDate, close: f64, volume: Option<u64>) -> Result<Self, ValidationError> {
        Self::new(date, close, close, close, close, volume)
    }

    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }
}

impl Dated for Bar {
    fn date(&self) -> TradeDate {
        self.date
    }
}

/// Price history of one security; dates strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, ValidationError> {
        ensure_increasing(&bars)?;
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn span(&self) -> Option<DateSpan> {
        Some(DateSpan {
            first: self.bars.first()?.date,
            last: self.bars.last()?.date,
        })
    }

    pub fn field(&self, field: PriceField) -> Series {
        Series::from_sorted(
            self.bars
                .iter()
                .map(|bar| Observation::new(bar.date, bar.price(field)))
                .collect(),
        )
    }
}

impl TryFrom<Vec<Bar>> for PriceSeries {
    type Error = ValidationError;

    fn try_from(value: Vec<Bar>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PriceSeries> for Vec<Bar> {
    fn from(value: PriceSeries) -> Self {
        value.bars
    }
}

/// Fundamentals snapshot attached to an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fundamentals {
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub dividend_yield: Option<f64>,
}

impl Fundamentals {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_optional_non_negative("market_cap", self.market_cap)?;
        validate_optional_finite("trailing_pe", self.trailing_pe)?;
        validate_optional_finite("forward_pe", self.forward_pe)?;
        validate_optional_non_negative("dividend_rate", self.dividend_rate)?;
        validate_optional_non_negative("dividend_yield", self.dividend_yield)?;
        Ok(())
    }
}

/// Index constituent: identity, sector label, prices and fundamentals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: Symbol,
    pub name: String,
    pub sector: Sector,
    pub prices: PriceSeries,
    #[serde(default)]
    pub fundamentals: Fundamentals,
}

impl Asset {
    pub fn new(
        symbol: Symbol,
        name: impl Into<String>,
        sector: Sector,
        prices: PriceSeries,
        fundamentals: Fundamentals,
    ) -> Result<Self, ValidationError> {
        fundamentals.validate()?;
        Ok(Self {
            symbol,
            name: name.into(),
            sector,
            prices,
            fundamentals,
        })
    }

    pub fn date_range(&self) -> Option<DateSpan> {
        self.prices.span()
    }

    pub fn latest_date(&self) -> Option<TradeDate> {
        self.prices.bars().last().map(|bar| bar.date)
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |value| validate_non_negative(field, value))
}

fn validate_optional_finite(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.is_finite() => Err(ValidationError::NonFiniteValue { field }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> TradeDate {
        TradeDate::parse(value).expect("valid date")
    }

    #[test]
    fn rejects_close_outside_range() {
        let err = Bar::new(date("2024-01-02"), 10.0, 12.0, 9.0, 12.5, Some(10))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarBounds));
    }

    #[test]
    fn rejects_negative_prices() {
        let err = Bar::flat(date("2024-01-02"), -1.0, None).expect_err("must fail");
        assert_eq!(err, ValidationError::NegativeValue { field: "open" });
    }

    #[test]
    fn price_series_requires_increasing_dates() {
        let bars = vec![
            Bar::flat(date("2024-01-03"), 10.0, None).expect("bar"),
            Bar::flat(date("2024-01-02"), 11.0, None).expect("bar"),
        ];
        assert!(matches!(
            PriceSeries::new(bars),
            Err(ValidationError::UnorderedDates { .. })
        ));
    }

    #[test]
    fn extracts_requested_field() {
        let bar = Bar::new(date("2024-01-02"), 10.0, 12.0, 9.0, 11.0, None).expect("bar");
        let prices = PriceSeries::new(vec![bar]).expect("series");
        assert_eq!(prices.field(PriceField::High).last_value(), Some(12.0));
        assert_eq!(prices.field(PriceField::Close).last_value(), Some(11.0));
    }

    #[test]
    fn fundamentals_reject_negative_market_cap() {
        let fundamentals = Fundamentals {
            market_cap: Some(-5.0),
            ..Fundamentals::default()
        };
        assert_eq!(
            fundamentals.validate(),
            Err(ValidationError::NegativeValue {
                field: "market_cap"
            })
        );
    }
}
