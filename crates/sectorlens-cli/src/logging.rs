use tracing_subscriber::EnvFilter;

use crate::error::CliError;

const LOG_ENV: &str = "SECTORLENS_LOG";

/// Installs the stderr subscriber. `--log-level` wins over `SECTORLENS_LOG`;
/// without either only warnings are shown.
pub fn init(level: Option<&str>) -> Result<(), CliError> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|error| CliError::Command(format!("invalid --log-level: {error}")))?,
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| CliError::Command(format!("logging setup failed: {error}")))
}
