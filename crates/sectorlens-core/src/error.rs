use thiserror::Error;

use crate::TradeDate;

/// Validation and contract errors exposed by `sectorlens-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid sampling '{value}', expected one of D, W, M, Q")]
    InvalidSampling { value: String },
    #[error(
        "invalid universe '{value}', expected one of sp500, russell3000, russell2000, nasdaq, composite"
    )]
    InvalidUniverse { value: String },
    #[error("invalid price field '{value}', expected one of open, high, low, close")]
    InvalidPriceField { value: String },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("series dates must be strictly increasing: {previous} followed by {next}")]
    UnorderedDates { previous: TradeDate, next: TradeDate },

    #[error("symbol '{symbol}' appears more than once in the universe")]
    DuplicateSymbol { symbol: String },
    #[error("symbol '{symbol}' is not assigned to any sector")]
    UnassignedSymbol { symbol: String },
    #[error("sector '{sector}' lists unknown symbol '{symbol}'")]
    UnknownSectorMember { sector: String, symbol: String },
    #[error("symbol '{symbol}' is assigned to more than one sector")]
    SymbolInMultipleSectors { symbol: String },
    #[error("symbol '{symbol}' is labelled '{labelled}' but grouped under '{listed}'")]
    SectorMismatch {
        symbol: String,
        labelled: String,
        listed: String,
    },

    #[error("benchmark name cannot be empty")]
    EmptyBenchmarkName,
    #[error("benchmark '{name}' appears more than once")]
    DuplicateBenchmark { name: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Failures raised by analytics requests.
///
/// Sparse data is never an error here: an empty window or an undefined
/// ratio comes back as `None` from the calculators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: TradeDate, end: TradeDate },

    #[error("symbol '{symbol}' is not part of the universe")]
    UnknownSymbol { symbol: String },

    #[error("sector '{sector}' is not part of the universe")]
    UnknownSector { sector: String },

    #[error("benchmark '{name}' is not part of the snapshot")]
    UnknownBenchmark { name: String },

    #[error("histogram needs at least one bin")]
    InvalidBins,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
