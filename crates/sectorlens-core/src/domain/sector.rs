use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

const NO_SECTOR: &str = "No Sector";

/// The eleven GICS sectors used for grouping on the dashboard.
pub const GICS_SECTORS: [&str; 11] = [
    "Health Care",
    "Consumer Discretionary",
    "Information Technology",
    "Consumer Staples",
    "Communication Services",
    "Materials",
    "Industrials",
    "Financials",
    "Energy",
    "Utilities",
    "Real Estate",
];

/// Sector label of an asset.
///
/// Provider labels such as `Technology` or `Healthcare` are folded onto
/// their GICS names; a missing or blank label becomes `No Sector`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Sector(String);

impl Sector {
    pub fn new(label: impl AsRef<str>) -> Self {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return Self::unassigned();
        }
        let canonical = provider_alias(trimmed).unwrap_or(trimmed);
        Self(canonical.to_owned())
    }

    pub fn from_label(label: Option<&str>) -> Self {
        label.map_or_else(Self::unassigned, Self::new)
    }

    pub fn unassigned() -> Self {
        Self(NO_SECTOR.to_owned())
    }

    pub fn is_unassigned(&self) -> bool {
        self.0 == NO_SECTOR
    }

    pub fn is_gics(&self) -> bool {
        GICS_SECTORS.contains(&self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn provider_alias(label: &str) -> Option<&'static str> {
    let canonical = match label {
        "Healthcare" => "Health Care",
        "Consumer Cyclical" => "Consumer Discretionary",
        "Technology" => "Information Technology",
        "Consumer Defensive" => "Consumer Staples",
        "Basic Materials" => "Materials",
        "Financial Services" => "Financials",
        _ => return None,
    };
    Some(canonical)
}

impl Display for Sector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Sector {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Sector {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Sector> for String {
    fn from(value: Sector) -> Self {
        value.0
    }
}
