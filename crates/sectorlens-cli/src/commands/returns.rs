use sectorlens_core::{DateWindow, InvestmentReturn, Sampling, Series, Symbol};
use serde::Serialize;

use crate::cli::ReturnsArgs;
use crate::error::CliError;
use crate::settings::Settings;

use super::{analytics_config, window, CommandResult};
use sectorlens_core::Index;

#[derive(Debug, Serialize)]
struct ReturnsResponseData {
    symbol: Symbol,
    sampling: Sampling,
    window: DateWindow,
    as_percent: bool,
    cumulative_return: Series,
    investment_return: Option<InvestmentReturn>,
}

pub fn run(args: &ReturnsArgs, index: &Index, settings: &Settings) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let window = window(&args.window)?;
    let mut config = analytics_config(settings, &args.sampling)?;
    if args.percent {
        config = config.with_percent(true);
    }
    if let Some(amount) = args.initial_investment {
        config = config.with_initial_investment(amount);
    }

    let asset = index.require_asset(&symbol)?;
    let cumulative_return = asset.cumulative_return(&window, &config);
    let investment_return = asset.investment_outcome(&window, &config);

    let mut result = CommandResult::ok(serde_json::to_value(ReturnsResponseData {
        symbol: symbol.clone(),
        sampling: config.sampling,
        window,
        as_percent: config.as_percent,
        cumulative_return,
        investment_return,
    })?);
    if investment_return.is_none() {
        result = result.with_warning(format!(
            "{symbol} has fewer than two {} observations in {window}",
            config.sampling
        ));
    }
    Ok(result)
}
