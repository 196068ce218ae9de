//! In-memory view of the country dataset.
//!
//! Lookups accept any capitalization and surrounding whitespace. An exact key
//! match is tried through a `&str` borrow before normalizing, so callers
//! passing dataset keys verbatim do not allocate.

use crate::dataset::identity::{CountryKey, StatusBasis, StatusLevel};
use crate::dataset::model::{
    CountryRecord, CountryTable, load_country_table, parse_country_table,
};
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone)]
/// Country records keyed by normalized name.
pub struct CountryIndex {
    by_name: CountryTable,
}

impl CountryIndex {
    /// Load the dataset from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let by_name = load_country_table(path)?;
        tracing::debug!(
            path = %path.display(),
            countries = by_name.len(),
            "loaded country dataset"
        );
        Ok(Self { by_name })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self {
            by_name: parse_country_table(text)?,
        })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Country keys in stable order.
    pub fn names(&self) -> impl Iterator<Item = &CountryKey> {
        self.by_name.keys()
    }

    /// Resolve a country by name, ignoring case.
    pub fn country(&self, name: &str) -> Option<&CountryRecord> {
        if let Some(record) = self.by_name.get(name) {
            return Some(record);
        }
        self.by_name.get(&CountryKey::normalize(name))
    }

    pub fn capital(&self, country: &str) -> Option<&str> {
        self.country(country)?.capital_city.as_deref()
    }

    pub fn landscapes(&self, country: &str) -> Option<&[String]> {
        self.country(country)?.landscapes.as_deref()
    }

    pub fn political(&self, country: &str) -> Option<&str> {
        self.country(country)?.political_status.as_deref()
    }

    /// Organisations the country belongs to (e.g. `EU`, `NATO`).
    pub fn memberships(&self, country: &str) -> Option<&[String]> {
        self.country(country)?.memberships.as_deref()
    }

    pub fn military(&self, country: &str) -> Option<&str> {
        self.country(country)?.military_situation.as_deref()
    }

    pub fn continent(&self, country: &str) -> Option<&str> {
        self.country(country)?.continent.as_deref()
    }

    pub fn historical(&self, country: &str) -> Option<&str> {
        self.country(country)?.history_description.as_deref()
    }

    pub fn currency(&self, country: &str) -> Option<&str> {
        self.country(country)?.currency.as_deref()
    }

    pub fn economic(&self, country: &str) -> Option<&str> {
        self.country(country)?.economic_status.as_deref()
    }

    /// Official languages.
    pub fn languages(&self, country: &str) -> Option<&[String]> {
        self.country(country)?.languages.as_deref()
    }

    /// Every country whose `basis` field carries `level`, in key order.
    ///
    /// Field values compare without regard to case or padding.
    pub fn countries_with(&self, basis: StatusBasis, level: &StatusLevel) -> Vec<String> {
        self.by_name
            .iter()
            .filter(|(_, record)| {
                let field = match basis {
                    StatusBasis::Economic => record.economic_status.as_deref(),
                    StatusBasis::Military => record.military_situation.as_deref(),
                };
                field.is_some_and(|raw| level.matches(raw))
            })
            .map(|(key, _)| key.0.clone())
            .collect()
    }
}
