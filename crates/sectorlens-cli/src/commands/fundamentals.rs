use sectorlens_core::analytics::sector_fundamentals;
use sectorlens_core::Index;
use serde_json::json;

use crate::error::CliError;

use super::CommandResult;

pub fn run(index: &Index) -> Result<CommandResult, CliError> {
    let sectors = sector_fundamentals(index);
    let unreported: Vec<String> = sectors
        .iter()
        .filter(|row| row.market_cap == 0.0)
        .map(|row| format!("{} reports no market cap", row.sector))
        .collect();

    Ok(CommandResult::ok(json!({ "sectors": sectors })).with_warnings(unreported))
}
