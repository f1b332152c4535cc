use serde::{Deserialize, Serialize};

use super::series::{DateSpan, Series};
use crate::ValidationError;

/// Level history of a benchmark index such as the cap-weighted S&P 500,
/// its equal-weight variant or the Dow Jones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub name: String,
    pub levels: Series,
}

impl Benchmark {
    pub fn new(name: impl Into<String>, levels: Series) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(ValidationError::EmptyBenchmarkName);
        }
        if levels.values().any(|level| level < 0.0) {
            return Err(ValidationError::NegativeValue { field: "level" });
        }
        Ok(Self { name, levels })
    }

    /// Case-insensitive name match.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    pub fn span(&self) -> Option<DateSpan> {
        self.levels.span()
    }
}

/// Dates every benchmark covers: latest first date to earliest last date.
///
/// `None` when the list is empty, a benchmark has no levels, or the
/// histories do not overlap.
pub fn common_span(benchmarks: &[Benchmark]) -> Option<DateSpan> {
    let mut spans = benchmarks.iter().map(Benchmark::span);
    let first = spans.next()??;
    spans.try_fold(first, |common, span| common.intersection(span?))
}

/// Dates any benchmark covers: earliest first date to latest last date.
pub fn available_span(benchmarks: &[Benchmark]) -> Option<DateSpan> {
    benchmarks
        .iter()
        .filter_map(Benchmark::span)
        .reduce(DateSpan::union)
}
