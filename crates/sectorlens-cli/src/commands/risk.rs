use sectorlens_core::{DateWindow, Index, Sampling, Symbol};
use serde::Serialize;

use crate::cli::RiskArgs;
use crate::error::CliError;
use crate::settings::Settings;

use super::{analytics_config, load_risk_free, window, CommandResult};

#[derive(Debug, Serialize)]
struct RiskResponseData {
    symbol: Symbol,
    sampling: Sampling,
    window: DateWindow,
    volatility: Option<f64>,
    sharpe: Option<f64>,
    risk_free_rate: Option<f64>,
}

pub fn run(args: &RiskArgs, index: &Index, settings: &Settings) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let window = window(&args.window)?;
    let config = analytics_config(settings, &args.sampling)?;
    let path = settings
        .risk_free_path(args.risk_free.as_deref())
        .ok_or_else(|| {
            CliError::Command(String::from(
                "risk needs a risk-free quotes file: pass --risk-free or set risk_free in config.json",
            ))
        })?;
    let risk_free = load_risk_free(&path)?;

    let asset = index.require_asset(&symbol)?;
    let data = RiskResponseData {
        symbol: symbol.clone(),
        sampling: config.sampling,
        window,
        volatility: asset.volatility(&window, &config),
        sharpe: asset.sharpe(&window, &risk_free, &config),
        risk_free_rate: asset.risk_free_rate(&window, &risk_free, config.sampling),
    };

    let mut warnings = Vec::new();
    if data.volatility.is_none() {
        warnings.push(format!("{symbol} has too few observations for a volatility in {window}"));
    }
    if data.risk_free_rate.is_none() {
        warnings.push(format!("no risk-free quotes fall inside {window}"));
    } else if data.sharpe.is_none() {
        warnings.push(format!("Sharpe ratio of {symbol} is undefined in {window}"));
    }

    Ok(CommandResult::ok(serde_json::to_value(data)?).with_warnings(warnings))
}
