use serde::{Deserialize, Serialize};

use crate::{TradeDate, ValidationError};

/// Anything indexed by a trading date.
pub trait Dated {
    fn date(&self) -> TradeDate;
}

/// Inclusive first/last date of a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    pub first: TradeDate,
    pub last: TradeDate,
}

impl DateSpan {
    /// Smallest span covering both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self {
            first: self.first.min(other.first),
            last: self.last.max(other.last),
        }
    }

    pub fn intersection(self, other: Self) -> Option<Self> {
        let first = self.first.max(other.first);
        let last = self.last.min(other.last);
        (first <= last).then_some(Self { first, last })
    }

    pub fn contains(self, date: TradeDate) -> bool {
        self.first <= date && date <= self.last
    }
}

/// Single dated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: TradeDate,
    pub value: f64,
}

impl Observation {
    pub const fn new(date: TradeDate, value: f64) -> Self {
        Self { date, value }
    }
}

impl Dated for Observation {
    fn date(&self) -> TradeDate {
        self.date
    }
}

/// Dated `f64` series with strictly increasing dates and finite values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct Series {
    points: Vec<Observation>,
}

impl Series {
    pub fn new(points: Vec<Observation>) -> Result<Self, ValidationError> {
        if points.iter().any(|point| !point.value.is_finite()) {
            return Err(ValidationError::NonFiniteValue { field: "value" });
        }
        ensure_increasing(&points)?;
        Ok(Self { points })
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (TradeDate, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, value)| Observation::new(date, value))
                .collect(),
        )
    }

    /// Callers guarantee ordering and finiteness.
    pub(crate) fn from_sorted(points: Vec<Observation>) -> Self {
        debug_assert!(ensure_increasing(&points).is_ok());
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.value)
    }

    pub fn dates(&self) -> impl Iterator<Item = TradeDate> + '_ {
        self.points.iter().map(|point| point.date)
    }

    pub fn first(&self) -> Option<&Observation> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.points.last()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last().map(|point| point.value)
    }

    pub fn span(&self) -> Option<DateSpan> {
        Some(DateSpan {
            first: self.first()?.date,
            last: self.last()?.date,
        })
    }

    pub fn value_at(&self, date: TradeDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |point| point.date)
            .ok()
            .map(|index| self.points[index].value)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_sorted(
            self.points
                .iter()
                .map(|point| Observation::new(point.date, point.value * factor))
                .collect(),
        )
    }
}

pub(crate) fn ensure_increasing<T: Dated>(items: &[T]) -> Result<(), ValidationError> {
    match items
        .windows(2)
        .find(|pair| pair[0].date() >= pair[1].date())
    {
        Some(pair) => Err(ValidationError::UnorderedDates {
            previous: pair[0].date(),
            next: pair[1].date(),
        }),
        None => Ok(()),
    }
}

impl TryFrom<Vec<Observation>> for Series {
    type Error = ValidationError;

    fn try_from(value: Vec<Observation>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Series> for Vec<Observation> {
    fn from(value: Series) -> Self {
        value.points
    }
}
