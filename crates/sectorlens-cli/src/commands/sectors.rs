use sectorlens_core::analytics::{
    sector_cumulative_return_history, sector_mean_return_long, sector_mean_returns,
};
use sectorlens_core::{Index, Sampling, Sector};
use serde_json::{json, Map, Value};

use crate::cli::{SectorHistoryArgs, SectorLongArgs, SectorsArgs};
use crate::error::CliError;
use crate::settings::Settings;

use super::{analytics_config, window, CommandResult};

pub fn run_means(
    args: &SectorsArgs,
    index: &Index,
    settings: &Settings,
) -> Result<CommandResult, CliError> {
    let window = window(&args.window)?;
    let config = analytics_config(settings, &args.sampling)?;
    let means = sector_mean_returns(index, &window, &config);

    let missing: Vec<String> = index
        .sectors()
        .iter()
        .filter(|group| !means.iter().any(|mean| mean.sector == group.sector))
        .map(|group| format!("{} has no constituent with a return in {window}", group.sector))
        .collect();

    Ok(CommandResult::ok(json!({
        "sampling": config.sampling,
        "window": window,
        "sectors": means,
    }))
    .with_warnings(missing))
}

/// One row per date, one column per requested sector.
pub fn run_history(
    args: &SectorHistoryArgs,
    index: &Index,
    settings: &Settings,
) -> Result<CommandResult, CliError> {
    let window = window(&args.window)?;
    let mut config = analytics_config(settings, &args.sampling)?;
    if args.percent {
        config = config.with_percent(true);
    }
    let sectors: Vec<Sector> = args.sectors.iter().map(Sector::new).collect();
    let table = sector_cumulative_return_history(index, &window, &sectors, &config)?;

    let history: Vec<Value> = table
        .dates
        .iter()
        .zip(&table.rows)
        .map(|(date, row)| {
            let mut fields = Map::new();
            fields.insert(String::from("date"), json!(date));
            for (sector, value) in table.columns.iter().zip(row) {
                fields.insert(sector.as_str().to_owned(), json!(value));
            }
            Value::Object(fields)
        })
        .collect();

    let mut result = CommandResult::ok(json!({
        "sampling": config.sampling,
        "window": window,
        "as_percent": config.as_percent,
        "columns": table.columns,
        "history": history,
    }));
    if table.dates.is_empty() {
        result = result.with_warning(format!("no cumulative returns in {window}"));
    }
    Ok(result)
}

pub fn run_long(
    args: &SectorLongArgs,
    index: &Index,
    settings: &Settings,
) -> Result<CommandResult, CliError> {
    let frequency: Sampling = args.frequency.parse()?;
    if !matches!(frequency, Sampling::Monthly | Sampling::Quarterly) {
        return Err(CliError::Command(format!(
            "sector-long frequency must be M or Q, got {frequency}"
        )));
    }
    let window = window(&args.window)?;
    let points = sector_mean_return_long(
        index,
        frequency,
        window.start(),
        window.end(),
        &settings.analytics,
    )?;

    let mut result = CommandResult::ok(json!({
        "frequency": frequency,
        "points": points,
    }));
    if points.is_empty() {
        result = result.with_warning(format!(
            "fewer than two {frequency} boundaries fall inside {window}"
        ));
    }
    Ok(result)
}
