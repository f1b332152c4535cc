use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sectorlens_core::AnalyticsConfig;
use serde::Deserialize;

use crate::error::CliError;

const CONFIG_FILE: &str = "config.json";
const DEFAULT_SNAPSHOT: &str = "snapshot.json";

/// Contents of `$SECTORLENS_HOME/config.json`; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analytics: AnalyticsConfig,
    pub snapshot: Option<PathBuf>,
    pub risk_free: Option<PathBuf>,
    #[serde(skip)]
    pub home: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from(resolve_sectorlens_home())
    }

    /// Reads `config.json` under `home`; a missing file yields defaults.
    pub fn load_from(home: PathBuf) -> Result<Self, CliError> {
        let path = home.join(CONFIG_FILE);
        let mut settings = if path.is_file() {
            let raw = fs::read_to_string(&path)?;
            let settings: Self = serde_json::from_str(&raw)?;
            tracing::debug!(path = %path.display(), "config loaded");
            settings
        } else {
            Self::default()
        };
        settings.home = home;
        Ok(settings)
    }

    /// `--snapshot`, then the config entry, then `snapshot.json` in the home
    /// directory. Relative config entries resolve against the home directory.
    pub fn snapshot_path(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        self.snapshot
            .as_deref()
            .map_or_else(|| self.home.join(DEFAULT_SNAPSHOT), |path| self.in_home(path))
    }

    pub fn risk_free_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.risk_free.as_deref().map(|path| self.in_home(path)))
    }

    fn in_home(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.home.join(path)
        }
    }
}

fn resolve_sectorlens_home() -> PathBuf {
    if let Some(path) = env::var_os("SECTORLENS_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".sectorlens");
    }

    PathBuf::from(".sectorlens")
}

#[cfg(test)]
mod tests {
    use sectorlens_core::Sampling;

    use super::*;

    #[test]
    fn missing_config_yields_defaults() {
        let home = tempfile::tempdir().expect("tempdir");
        let settings = Settings::load_from(home.path().to_path_buf()).expect("settings");
        assert_eq!(settings.analytics, AnalyticsConfig::default());
        assert_eq!(settings.snapshot_path(None), home.path().join("snapshot.json"));
        assert_eq!(settings.risk_free_path(None), None);
    }

    #[test]
    fn config_file_supplies_defaults_and_paths() {
        let home = tempfile::tempdir().expect("tempdir");
        fs::write(
            home.path().join("config.json"),
            r#"{"analytics":{"sampling":"W","histogram_bins":20},"snapshot":"data/sp500.json","risk_free":"/srv/dgs10.json"}"#,
        )
        .expect("write config");

        let settings = Settings::load_from(home.path().to_path_buf()).expect("settings");
        assert_eq!(settings.analytics.sampling, Sampling::Weekly);
        assert_eq!(settings.analytics.histogram_bins, 20);
        assert_eq!(
            settings.snapshot_path(None),
            home.path().join("data/sp500.json")
        );
        assert_eq!(
            settings.risk_free_path(None),
            Some(PathBuf::from("/srv/dgs10.json"))
        );
        assert_eq!(
            settings.snapshot_path(Some(Path::new("other.json"))),
            PathBuf::from("other.json")
        );
    }

    #[test]
    fn malformed_config_is_a_serialization_error() {
        let home = tempfile::tempdir().expect("tempdir");
        fs::write(home.path().join("config.json"), "{not json").expect("write config");
        let err = Settings::load_from(home.path().to_path_buf()).expect_err("must fail");
        assert_eq!(err.exit_code(), 4);
    }
}
