use sectorlens_core::analytics::BenchmarkReturns;
use sectorlens_core::domain::{available_span, common_span};
use sectorlens_core::{Benchmark, DateSpan, DateWindow, Index, Sampling};
use serde::Serialize;

use crate::cli::BenchmarksArgs;
use crate::error::CliError;
use crate::settings::Settings;

use super::{window, CommandResult};

#[derive(Debug, Serialize)]
struct BenchmarksResponseData {
    sampling: Sampling,
    window: DateWindow,
    as_percent: bool,
    common_span: Option<DateSpan>,
    available_span: Option<DateSpan>,
    curves: Vec<BenchmarkReturns>,
}

pub fn run(
    args: &BenchmarksArgs,
    index: &Index,
    settings: &Settings,
) -> Result<CommandResult, CliError> {
    let mut window = window(&args.window)?;
    let mut config = settings.analytics.clone().with_percent(args.percent);
    if let Some(sampling) = &args.sampling {
        config = config.with_sampling(sampling.parse::<Sampling>()?);
    }

    let selected: Vec<Benchmark> = if args.names.is_empty() {
        index.benchmarks().to_vec()
    } else {
        args.names
            .iter()
            .map(|name| index.require_benchmark(name).cloned())
            .collect::<Result<_, _>>()?
    };
    let common = common_span(&selected);
    if args.common {
        window = common
            .and_then(|span| window.clamp_to(span))
            .ok_or_else(|| {
                CliError::Command(String::from(
                    "the selected benchmarks share no dates inside the window",
                ))
            })?;
    }

    let curves = index.benchmark_cumulative_returns(&args.names, &window, &config)?;
    let mut warnings = Vec::new();
    if selected.is_empty() {
        warnings.push(String::from("snapshot carries no benchmark levels"));
    }
    for benchmark in &selected {
        if !curves.iter().any(|curve| curve.name == benchmark.name) {
            warnings.push(format!(
                "{} has fewer than two {} observations in {window}",
                benchmark.name, config.sampling
            ));
        }
    }

    let data = BenchmarksResponseData {
        sampling: config.sampling,
        window,
        as_percent: config.as_percent,
        common_span: common,
        available_span: available_span(&selected),
        curves,
    };
    Ok(CommandResult::ok(serde_json::to_value(data)?).with_warnings(warnings))
}

#[cfg(test)]
mod tests {
    use sectorlens_core::{Series, TradeDate};

    use super::*;
    use crate::cli::WindowArgs;
    use crate::commands::fixtures;

    fn levels(pairs: &[(&str, f64)]) -> Series {
        Series::from_pairs(
            pairs
                .iter()
                .map(|(day, level)| (TradeDate::parse(day).expect("date"), *level)),
        )
        .expect("levels")
    }

    fn index() -> Index {
        fixtures::index()
            .with_benchmarks(vec![
                Benchmark::new(
                    "SP500",
                    levels(&[("2024-01-02", 4_000.0), ("2024-01-03", 4_040.0), ("2024-01-04", 4_080.4)]),
                )
                .expect("sp500"),
                Benchmark::new(
                    "DowJones",
                    levels(&[("2024-01-03", 37_000.0), ("2024-01-04", 37_370.0)]),
                )
                .expect("dow"),
            ])
            .expect("benchmarks")
    }

    fn args(names: &[&str], common: bool) -> BenchmarksArgs {
        BenchmarksArgs {
            names: names.iter().map(|name| (*name).to_owned()).collect(),
            window: WindowArgs::default(),
            sampling: None,
            common,
            percent: false,
        }
    }

    #[test]
    fn reports_every_benchmark_with_spans() {
        let result = run(&args(&[], false), &index(), &fixtures::settings()).expect("run");

        let curves = result.data["curves"].as_array().expect("curves");
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0]["name"], "SP500");
        let total = curves[0]["series"][1]["value"].as_f64().expect("value");
        assert!((total - 0.0201).abs() < 1e-9);
        assert_eq!(result.data["common_span"]["first"], "2024-01-03");
        assert_eq!(result.data["available_span"]["first"], "2024-01-02");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn common_window_starts_where_every_benchmark_has_levels() {
        let result = run(&args(&["sp500", "dowjones"], true), &index(), &fixtures::settings())
            .expect("run");

        let sp500 = &result.data["curves"][0];
        assert_eq!(sp500["series"].as_array().map(Vec::len), Some(1));
        let total = sp500["series"][0]["value"].as_f64().expect("value");
        assert!((total - 0.01).abs() < 1e-9);
    }

    #[test]
    fn unknown_benchmark_is_an_analytics_error() {
        let err = run(&args(&["Russell2000"], false), &index(), &fixtures::settings())
            .expect_err("must fail");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_benchmarks_are_a_warning() {
        let result = run(&args(&[], false), &fixtures::index(), &fixtures::settings())
            .expect("run");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.data["curves"].as_array().is_some_and(Vec::is_empty));
    }
}
