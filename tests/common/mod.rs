//! Shared builders for the behavior suites.
#![allow(dead_code)]

use sectorlens_core::{
    Asset, Bar, Fundamentals, Index, PriceSeries, Sector, Series, Symbol, TradeDate, UniverseId,
};

pub fn date(value: &str) -> TradeDate {
    TradeDate::parse(value).expect("valid date")
}

/// Consecutive calendar days starting at `first`, one close per day.
pub fn daily_closes(first: &str, closes: &[f64]) -> Vec<(TradeDate, f64)> {
    let mut day = date(first);
    let mut points = Vec::with_capacity(closes.len());
    for close in closes {
        points.push((day, *close));
        day = day.next_day().expect("next day");
    }
    points
}

pub fn asset(symbol: &str, sector: &str, closes: &[(TradeDate, f64)]) -> Asset {
    asset_with(symbol, sector, closes, Fundamentals::default())
}

pub fn asset_with(
    symbol: &str,
    sector: &str,
    closes: &[(TradeDate, f64)],
    fundamentals: Fundamentals,
) -> Asset {
    let bars = closes
        .iter()
        .map(|(day, close)| Bar::flat(*day, *close, Some(1_000)).expect("bar"))
        .collect();
    Asset::new(
        Symbol::parse(symbol).expect("symbol"),
        format!("{symbol} Corp"),
        Sector::new(sector),
        PriceSeries::new(bars).expect("price series"),
        fundamentals,
    )
    .expect("asset")
}

pub fn index(assets: Vec<Asset>) -> Index {
    Index::new(UniverseId::Sp500, assets).expect("index")
}

pub fn values(series: &Series) -> Vec<f64> {
    series.values().collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
