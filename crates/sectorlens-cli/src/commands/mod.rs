mod benchmarks;
mod distribution;
mod fundamentals;
mod returns;
mod risk;
mod screen;
mod sectors;
mod volume;

use std::path::Path;
use std::time::Instant;

use sectorlens_core::{
    snapshot, AnalyticsConfig, DateWindow, Envelope, EnvelopeError, EnvelopeMeta, Index,
    PriceField, RiskFreeSeries, Sampling,
};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command, SamplingArgs, WindowArgs};
use crate::error::CliError;
use crate::settings::Settings;

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

pub fn run(cli: &Cli, settings: &Settings) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();
    let index = snapshot::load_index(settings.snapshot_path(cli.snapshot.as_deref()))?;
    let command_result = execute(&cli.command, &index, settings)?;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let CommandResult {
        data,
        warnings,
        errors,
    } = command_result;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), index.universe(), latency_ms)?;
    for warning in warnings {
        tracing::warn!("{warning}");
        meta.push_warning(warning);
    }

    Envelope::new(meta, data, errors).map_err(CliError::from)
}

pub fn execute(
    command: &Command,
    index: &Index,
    settings: &Settings,
) -> Result<CommandResult, CliError> {
    match command {
        Command::Returns(args) => returns::run(args, index, settings),
        Command::Risk(args) => risk::run(args, index, settings),
        Command::Screen(args) => screen::run(args, index, settings),
        Command::Sectors(args) => sectors::run_means(args, index, settings),
        Command::SectorHistory(args) => sectors::run_history(args, index, settings),
        Command::SectorLong(args) => sectors::run_long(args, index, settings),
        Command::Fundamentals => fundamentals::run(index),
        Command::Volume(args) => volume::run(args, index),
        Command::Distribution(args) => distribution::run(args, index, settings),
        Command::Benchmarks(args) => benchmarks::run(args, index, settings),
    }
}

pub(crate) fn window(args: &WindowArgs) -> Result<DateWindow, CliError> {
    Ok(DateWindow::parse(args.start.as_deref(), args.end.as_deref())?)
}

/// Config file defaults overridden by command-line flags.
pub(crate) fn analytics_config(
    settings: &Settings,
    args: &SamplingArgs,
) -> Result<AnalyticsConfig, CliError> {
    let mut config = settings.analytics.clone();
    if let Some(sampling) = &args.sampling {
        config = config.with_sampling(sampling.parse::<Sampling>()?);
    }
    if let Some(field) = &args.price_field {
        config = config.with_price_field(field.parse::<PriceField>()?);
    }
    Ok(config)
}

pub(crate) fn load_risk_free(path: &Path) -> Result<RiskFreeSeries, CliError> {
    Ok(snapshot::load_risk_free(path)?)
}


#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;

    const SNAPSHOT: &str = r#"{
        "universe": "russell2000",
        "assets": [
            {"symbol": "ABC", "sector": "Energy", "fundamentals": {"market_cap": 12.0},
             "bars": [{"date": "2024-01-02", "close": 10.0}, {"date": "2024-01-03", "close": 11.0}]}
        ]
    }"#;

    #[test]
    fn envelope_carries_a_uuid_request_id_and_the_universe() {
        let dir = tempfile::tempdir().expect("tempdir");
        let snapshot = dir.path().join("snapshot.json");
        fs::write(&snapshot, SNAPSHOT).expect("write snapshot");
        let settings = Settings::load_from(dir.path().to_path_buf()).expect("settings");
        let cli = Cli::try_parse_from(["sectorlens", "sectors"]).expect("args");

        let envelope = run(&cli, &settings).expect("envelope");

        assert!(Uuid::parse_str(&envelope.meta.request_id).is_ok());
        assert_eq!(envelope.meta.universe.as_str(), "russell2000");
        assert_eq!(envelope.data["sectors"][0]["sector"], "Energy");
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn flag_overrides_beat_config_defaults() {
        let settings = fixtures::settings();
        let args = SamplingArgs {
            sampling: Some(String::from("q")),
            price_field: Some(String::from("open")),
        };

        let config = analytics_config(&settings, &args).expect("config");

        assert_eq!(config.sampling, Sampling::Quarterly);
        assert_eq!(config.price_field, PriceField::Open);
    }

    #[test]
    fn unknown_sampling_is_a_validation_error() {
        let args = SamplingArgs {
            sampling: Some(String::from("hourly")),
            price_field: None,
        };

        let err = analytics_config(&fixtures::settings(), &args).expect_err("must fail");

        assert_eq!(err.exit_code(), 2);
    }
}
