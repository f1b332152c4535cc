use sectorlens_core::analytics::{compute_risk_return, RiskReturnRow};
use sectorlens_core::{DateWindow, EnvelopeError, Index, RiskFreeSeries, Sampling};
use serde::Serialize;

use crate::cli::ScreenArgs;
use crate::error::CliError;
use crate::settings::Settings;

use super::{analytics_config, load_risk_free, window, CommandResult};

#[derive(Debug, Serialize)]
struct ScreenResponseData {
    sampling: Sampling,
    window: DateWindow,
    rows: Vec<RiskReturnRow>,
}

pub fn run(args: &ScreenArgs, index: &Index, settings: &Settings) -> Result<CommandResult, CliError> {
    let window = window(&args.window)?;
    let config = analytics_config(settings, &args.sampling)?;

    let mut warnings = Vec::new();
    let risk_free = match settings.risk_free_path(args.risk_free.as_deref()) {
        Some(path) => load_risk_free(&path)?,
        None => {
            warnings.push(String::from(
                "no risk-free quotes configured; Sharpe ratios are omitted",
            ));
            RiskFreeSeries::default()
        }
    };

    let rows = compute_risk_return(index, &window, &risk_free, &config);
    let errors = rows
        .iter()
        .filter(|row| row.investment_return.is_none())
        .map(|row| {
            EnvelopeError::new(
                "insufficient_history",
                format!("fewer than two {} observations in {window}", config.sampling),
            )
            .map(|error| error.with_symbol(row.ticker.as_str()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let data = ScreenResponseData {
        sampling: config.sampling,
        window,
        rows,
    };
    Ok(CommandResult::ok(serde_json::to_value(data)?)
        .with_warnings(warnings)
        .with_errors(errors))
}
