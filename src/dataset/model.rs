//! Deserializable representation of `data/json/countries.json`.
//!
//! The file is one JSON object keyed by upper-case country name. Every field
//! of a record is optional; entries in the shipped dataset are not uniform and
//! a missing field simply reads as "no answer".

use crate::dataset::identity::CountryKey;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Whole dataset as stored on disk.
pub type CountryTable = BTreeMap<CountryKey, CountryRecord>;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
/// One country's attributes.
pub struct CountryRecord {
    #[serde(default)]
    pub capital_city: Option<String>,
    #[serde(default)]
    pub landscapes: Option<Vec<String>>,
    #[serde(default)]
    pub political_status: Option<String>,
    #[serde(default)]
    pub memberships: Option<Vec<String>>,
    #[serde(default)]
    pub military_situation: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub history_description: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub economic_status: Option<String>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Parse the dataset text. Blank input is rejected rather than read as empty.
pub fn parse_country_table(text: &str) -> Result<CountryTable> {
    if text.trim().is_empty() {
        bail!("country dataset is empty");
    }
    let table: CountryTable = serde_json::from_str(text)?;
    Ok(table)
}

/// Read and parse the dataset from disk.
pub fn load_country_table(path: &Path) -> Result<CountryTable> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading country dataset {}", path.display()))?;
    parse_country_table(&data).with_context(|| format!("parsing {}", path.display()))
}
