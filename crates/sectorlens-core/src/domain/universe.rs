use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Index universes the dashboard analyzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniverseId {
    Sp500,
    Russell3000,
    Russell2000,
    Nasdaq,
    /// Union of two or more universes.
    Composite,
}

impl UniverseId {
    pub const ALL: [Self; 5] = [
        Self::Sp500,
        Self::Russell3000,
        Self::Russell2000,
        Self::Nasdaq,
        Self::Composite,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sp500 => "sp500",
            Self::Russell3000 => "russell3000",
            Self::Russell2000 => "russell2000",
            Self::Nasdaq => "nasdaq",
            Self::Composite => "composite",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sp500 => "S&P 500",
            Self::Russell3000 => "Russell 3000",
            Self::Russell2000 => "Russell 2000",
            Self::Nasdaq => "Nasdaq-100",
            Self::Composite => "Composite",
        }
    }
}

impl Display for UniverseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UniverseId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['&', ' ', '-', '_'], "");
        match normalized.as_str() {
            "sp500" => Ok(Self::Sp500),
            "russell3000" => Ok(Self::Russell3000),
            "russell2000" => Ok(Self::Russell2000),
            "nasdaq" | "nasdaq100" => Ok(Self::Nasdaq),
            "composite" => Ok(Self::Composite),
            _ => Err(ValidationError::InvalidUniverse {
                value: value.trim().to_owned(),
            }),
        }
    }
}
