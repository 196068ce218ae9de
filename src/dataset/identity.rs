use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Dataset key for a country, stored upper-case (e.g. `GERMANY`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryKey(pub String);

impl CountryKey {
    /// Normalize user input into the dataset's key form.
    pub fn normalize(name: &str) -> Self {
        Self(name.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CountryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse strength rating used by the economic and military fields.
///
/// Dataset fields keep their own spelling; a level only normalizes when it is
/// compared. Unrecognized values read back as `Other`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum StatusLevel {
    Strong,
    Average,
    Weak,
    Other(String),
}

/// Which status field a grouping is built from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum StatusBasis {
    Economic,
    Military,
}

impl StatusLevel {
    pub fn as_str(&self) -> &str {
        match self {
            StatusLevel::Strong => "strong",
            StatusLevel::Average => "average",
            StatusLevel::Weak => "weak",
            StatusLevel::Other(value) => value.as_str(),
        }
    }

    /// Parse a query argument; only the three known ratings are accepted.
    pub fn parse(raw: &str) -> Result<Self> {
        match Self::from_str(raw) {
            StatusLevel::Other(_) => bail!("Invalid input for status: {}", raw.to_lowercase()),
            level => Ok(level),
        }
    }

    /// True when a raw dataset value names this level, ignoring case.
    pub fn matches(&self, raw: &str) -> bool {
        match (self, Self::from_str(raw)) {
            (StatusLevel::Other(mine), StatusLevel::Other(theirs)) => {
                mine.trim().eq_ignore_ascii_case(theirs.trim())
            }
            (mine, theirs) => *mine == theirs,
        }
    }

    pub(crate) fn from_str(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "strong" => StatusLevel::Strong,
            "average" => StatusLevel::Average,
            "weak" => StatusLevel::Weak,
            _ => StatusLevel::Other(value.to_string()),
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StatusBasis {
    /// Parse the one-letter selector: `e` for economic, `m` for military.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "e" => Ok(StatusBasis::Economic),
            "m" => Ok(StatusBasis::Military),
            other => bail!("Invalid input: {other}"),
        }
    }

    /// Record field the grouping reads.
    pub fn field(self) -> &'static str {
        match self {
            StatusBasis::Economic => "economic_status",
            StatusBasis::Military => "military_situation",
        }
    }

    /// File name of the persisted grouping inside the cache directory.
    pub fn cache_file(self) -> &'static str {
        match self {
            StatusBasis::Economic => "economic_status.json",
            StatusBasis::Military => "military_situation.json",
        }
    }
}
