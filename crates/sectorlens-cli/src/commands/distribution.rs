use sectorlens_core::analytics::return_distribution;
use sectorlens_core::Index;
use serde_json::json;

use crate::cli::DistributionArgs;
use crate::error::CliError;
use crate::settings::Settings;

use super::{analytics_config, window, CommandResult};

pub fn run(
    args: &DistributionArgs,
    index: &Index,
    settings: &Settings,
) -> Result<CommandResult, CliError> {
    let window = window(&args.window)?;
    let mut config = analytics_config(settings, &args.sampling)?;
    if let Some(bins) = args.bins {
        config = config.with_histogram_bins(bins);
    }
    if args.percent {
        config = config.with_percent(true);
    }

    let distribution = return_distribution(index, &window, &config)?;
    let mut result = CommandResult::ok(json!({
        "sampling": config.sampling,
        "window": window,
        "as_percent": config.as_percent,
        "bins": distribution.bins,
        "bin_width": distribution.bin_width,
        "observations": distribution.observations,
    }));
    if distribution.observations == 0 {
        result = result.with_warning(format!("no investment returns in {window}"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{SamplingArgs, WindowArgs};
    use crate::commands::fixtures;

    fn args(bins: usize) -> DistributionArgs {
        DistributionArgs {
            window: WindowArgs::default(),
            sampling: SamplingArgs::default(),
            bins: Some(bins),
            percent: false,
        }
    }

    #[test]
    fn counts_every_defined_return() {
        let result = run(&args(4), &fixtures::index(), &fixtures::settings()).expect("run");
        assert_eq!(result.data["observations"], 2);
        let bins = result.data["bins"].as_array().expect("bins");
        assert_eq!(bins.len(), 2);
    }

    #[test]
    fn zero_bins_is_rejected() {
        let err = run(&args(0), &fixtures::index(), &fixtures::settings())
            .expect_err("must fail");
        assert_eq!(err.exit_code(), 3);
    }
}
