use sectorlens_core::analytics::compute_mean_volume;
use sectorlens_core::Index;
use serde_json::json;

use crate::cli::VolumeArgs;
use crate::error::CliError;

use super::{window, CommandResult};

pub fn run(args: &VolumeArgs, index: &Index) -> Result<CommandResult, CliError> {
    let window = window(&args.window)?;
    let ranks = compute_mean_volume(index, &window, args.fully_within);

    let mut result = CommandResult::ok(json!({
        "window": window,
        "fully_within": args.fully_within,
        "tickers": ranks,
    }));
    if ranks.is_empty() {
        result = result.with_warning(format!("no traded volume recorded in {window}"));
    }
    Ok(result)
}
