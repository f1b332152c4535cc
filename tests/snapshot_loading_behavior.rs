//! Behavior-driven tests for snapshot loading
//!
//! These tests verify HOW universe and risk-free files are validated and
//! turned into analytics inputs, with malformed files rejected whole.

use std::fs;
use std::path::PathBuf;

use sectorlens_core::snapshot::{load_index, load_risk_free, IndexSnapshot};
use sectorlens_core::{
    CoreError, DateWindow, Sampling, Sector, Symbol, UniverseId, ValidationError,
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn snapshot_with_sectors(sectors: &str) -> String {
    format!(
        r#"{{
            "universe": "sp500",
            "assets": [
                {{"symbol": "xom", "name": "Exxon Mobil", "sector": "Energy",
                  "fundamentals": {{"market_cap": 450.0, "trailing_pe": 12.5}},
                  "bars": [{{"date": "2024-01-02", "close": 100.0, "volume": 900}},
                           {{"date": "2024-01-03", "close": 103.0, "volume": 1100}}]}},
                {{"symbol": "NEE",
                  "bars": [{{"date": "2024-01-02", "close": 60.0}},
                           {{"date": "2024-01-03", "close": 61.2}}]}}
            ],
            "sectors": {sectors}
        }}"#
    )
}

// =============================================================================
// Universe snapshots
// =============================================================================

#[test]
fn when_a_valid_snapshot_is_loaded_the_index_is_ready_for_analytics() {
    // Given: A snapshot whose second asset is only labelled through the sector list
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "sp500.json",
        &snapshot_with_sectors(
            r#"[{"sector": "Energy", "symbols": ["XOM"]},
                {"sector": "Utilities", "symbols": ["NEE"]}]"#,
        ),
    );

    // When: The snapshot is loaded
    let index = load_index(&path).expect("index");

    // Then: Symbols are normalized, unlabelled assets adopt their group, and
    //       omitted fields fall back to defaults
    assert_eq!(index.universe(), UniverseId::Sp500);
    assert_eq!(index.len(), 2);
    let xom = index.asset(&Symbol::parse("XOM").expect("symbol")).expect("XOM");
    assert_eq!(xom.fundamentals.market_cap, Some(450.0));
    assert_eq!(xom.prices.bars()[0].open, 100.0);
    let nee = index.asset(&Symbol::parse("NEE").expect("symbol")).expect("NEE");
    assert_eq!(nee.sector, Sector::new("Utilities"));
    assert_eq!(nee.name, "NEE");

    // And: Returns are computable straight away
    let config = sectorlens_core::AnalyticsConfig::default();
    let total = xom
        .investment_return(&DateWindow::unbounded(), &config)
        .expect("return");
    assert!((total - 0.03).abs() < 1e-9);
}

#[test]
fn when_the_sector_list_omits_a_symbol_the_snapshot_is_rejected() {
    // Given: A sector list that forgets NEE
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "partial.json",
        &snapshot_with_sectors(r#"[{"sector": "Energy", "symbols": ["XOM"]}]"#),
    );

    // When: The snapshot is loaded
    let result = load_index(&path);

    // Then: The unassigned symbol is named
    assert!(matches!(
        result,
        Err(CoreError::Validation(ValidationError::UnassignedSymbol { ref symbol })) if symbol == "NEE"
    ));
}

#[test]
fn when_a_symbol_is_listed_under_two_sectors_the_snapshot_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "duplicate.json",
        &snapshot_with_sectors(
            r#"[{"sector": "Utilities", "symbols": ["NEE"]},
                {"sector": "Energy", "symbols": ["XOM"]},
                {"sector": "Industrials", "symbols": ["NEE"]}]"#,
        ),
    );

    let result = load_index(&path);

    assert!(matches!(
        result,
        Err(CoreError::Validation(ValidationError::SymbolInMultipleSectors { .. }))
    ));
}

#[test]
fn when_the_sector_list_names_an_unknown_symbol_the_snapshot_is_rejected() {
    let snapshot = IndexSnapshot::from_json_str(&snapshot_with_sectors(
        r#"[{"sector": "Energy", "symbols": ["XOM", "CVX"]},
            {"sector": "Utilities", "symbols": ["NEE"]}]"#,
    ))
    .expect("parse");

    let result = snapshot.into_index();

    assert!(matches!(
        result,
        Err(ValidationError::UnknownSectorMember { ref symbol, .. }) if symbol == "CVX"
    ));
}

#[test]
fn when_a_label_contradicts_the_sector_list_the_snapshot_is_rejected() {
    let snapshot = IndexSnapshot::from_json_str(&snapshot_with_sectors(
        r#"[{"sector": "Materials", "symbols": ["XOM", "NEE"]}]"#,
    ))
    .expect("parse");

    assert!(matches!(
        snapshot.into_index(),
        Err(ValidationError::SectorMismatch { .. })
    ));
}

#[test]
fn when_no_sector_list_is_given_groups_come_from_asset_labels() {
    let snapshot = IndexSnapshot::from_json_str(&snapshot_with_sectors("null")).expect("parse");

    let index = snapshot.into_index().expect("index");

    let sectors: Vec<&str> = index
        .sectors()
        .iter()
        .map(|group| group.sector.as_str())
        .collect();
    assert_eq!(sectors.len(), 2);
    assert_eq!(sectors[0], "Energy");
    assert!(index.sectors()[1].sector.is_unassigned());
}

#[test]
fn when_bars_are_out_of_order_the_snapshot_is_rejected() {
    let raw = r#"{
        "universe": "nasdaq",
        "assets": [{"symbol": "AAPL", "bars": [
            {"date": "2024-01-03", "close": 10.0},
            {"date": "2024-01-02", "close": 11.0}
        ]}]
    }"#;

    let result = IndexSnapshot::from_json_str(raw).expect("parse").into_index();

    assert!(matches!(result, Err(ValidationError::UnorderedDates { .. })));
}

#[test]
fn when_a_bar_closes_outside_its_range_the_snapshot_is_rejected() {
    let raw = r#"{
        "universe": "nasdaq",
        "assets": [{"symbol": "AAPL", "bars": [
            {"date": "2024-01-02", "open": 10.0, "high": 11.0, "low": 9.0, "close": 12.0}
        ]}]
    }"#;

    let result = IndexSnapshot::from_json_str(raw).expect("parse").into_index();

    assert_eq!(result.err(), Some(ValidationError::InvalidBarBounds));
}

#[test]
fn when_the_file_is_not_json_the_error_is_a_serialization_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(&dir, "broken.json", "{\"universe\": ");

    assert!(matches!(load_index(&path), Err(CoreError::Serialization(_))));
    assert!(matches!(
        load_index(dir.path().join("missing.json")),
        Err(CoreError::Io(_))
    ));
}

#[test]
fn when_a_symbol_is_malformed_parsing_fails() {
    let raw = r#"{"universe": "sp500", "assets": [{"symbol": "1ABC", "bars": []}]}"#;

    assert!(matches!(
        IndexSnapshot::from_json_str(raw),
        Err(CoreError::Serialization(_))
    ));
}

#[test]
fn when_benchmark_levels_are_included_they_are_loaded_with_the_universe() {
    // Given: A snapshot carrying S&P 500 and equal-weight levels
    let raw = r#"{
        "universe": "sp500",
        "assets": [{"symbol": "XOM", "sector": "Energy",
                    "bars": [{"date": "2024-01-02", "close": 100.0}]}],
        "benchmarks": [
            {"name": "SP500", "levels": [{"date": "2024-01-02", "value": 4742.8},
                                         {"date": "2024-01-03", "value": 4704.8}]},
            {"name": "SPXEW", "levels": [{"date": "2024-01-02", "value": 6432.1}]}
        ]
    }"#;

    // When: The snapshot is converted
    let index = IndexSnapshot::from_json_str(raw)
        .expect("parse")
        .into_index()
        .expect("index");

    // Then: Both benchmarks are available by name
    assert_eq!(index.benchmarks().len(), 2);
    let sp500 = index.require_benchmark("sp500").expect("sp500");
    assert_eq!(sp500.levels.len(), 2);
}

#[test]
fn when_a_benchmark_is_listed_twice_the_snapshot_is_rejected() {
    let raw = r#"{
        "universe": "nasdaq",
        "assets": [],
        "benchmarks": [
            {"name": "Nasdaq", "levels": []},
            {"name": "NASDAQ", "levels": []}
        ]
    }"#;

    let result = IndexSnapshot::from_json_str(raw).expect("parse").into_index();

    assert!(matches!(result, Err(ValidationError::DuplicateBenchmark { .. })));
}

// =============================================================================
// Risk-free snapshots
// =============================================================================

#[test]
fn when_percent_quotes_are_loaded_they_are_filled_and_scaled() {
    // Given: Two treasury quotes in percent with a weekend gap
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "dgs10.json",
        r#"{"quotes": [{"date": "2024-01-05", "value": 4.0},
                       {"date": "2024-01-08", "value": 4.2}]}"#,
    );

    // When: The curve is loaded
    let curve = load_risk_free(&path).expect("curve");

    // Then: Every calendar day carries a fractional yield
    assert_eq!(curve.yields().len(), 4);
    let daily_mean = curve
        .annualized_mean(&DateWindow::unbounded(), Sampling::Daily)
        .expect("mean");
    assert!((daily_mean - (0.04 * 3.0 + 0.042) / 4.0).abs() < 1e-12);
}

#[test]
fn when_fraction_quotes_are_loaded_values_are_kept() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "rf.json",
        r#"{"unit": "fraction", "quotes": [{"date": "2024-01-05", "value": 0.035}]}"#,
    );

    let curve = load_risk_free(&path).expect("curve");

    assert_eq!(curve.yields().last_value(), Some(0.035));
}
