use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{TradeDate, ValidationError};

/// Resampling frequency for return and risk calculations.
///
/// Each variant carries a fixed number of periods per year used for
/// annualization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sampling {
    #[default]
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
    #[serde(rename = "Q")]
    Quarterly,
}

impl Sampling {
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Quarterly];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "D",
            Self::Weekly => "W",
            Self::Monthly => "M",
            Self::Quarterly => "Q",
        }
    }

    /// Trading periods per year: 252 days, 52 weeks, 12 months, 4 quarters.
    pub const fn periods_per_year(self) -> u32 {
        match self {
            Self::Daily => 252,
            Self::Weekly => 52,
            Self::Monthly => 12,
            Self::Quarterly => 4,
        }
    }

    /// Label of the bucket `date` falls into: the period's closing day.
    pub fn bucket_label(self, date: TradeDate) -> TradeDate {
        match self {
            Self::Daily => date,
            Self::Weekly => date.week_end(),
            Self::Monthly => date.month_end(),
            Self::Quarterly => date.quarter_end(),
        }
    }
}

impl Display for Sampling {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sampling {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "d" | "1d" | "daily" => Ok(Self::Daily),
            "w" | "1w" | "weekly" => Ok(Self::Weekly),
            "m" | "1m" | "monthly" => Ok(Self::Monthly),
            "q" | "1q" | "quarterly" => Ok(Self::Quarterly),
            other => Err(ValidationError::InvalidSampling {
                value: other.to_owned(),
            }),
        }
    }
}
