//! ISO code ↔ country name resolution over `data/countryCodes.csv`.
//!
//! The table has a `Code,Name` header. Queries of two or three characters are
//! read as codes, anything longer as a name; names compare case-insensitively.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct IsoRow {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Name")]
    name: String,
}

/// A classified lookup request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IsoQuery {
    /// Upper-cased ISO code.
    Code(String),
    /// Lower-cased country name.
    Name(String),
}

impl IsoQuery {
    pub fn parse(raw: &str) -> Result<Self> {
        let search = raw.trim();
        match search.chars().count() {
            0 => bail!("Input is not a country code or name"),
            2 | 3 => Ok(IsoQuery::Code(search.to_uppercase())),
            _ => Ok(IsoQuery::Name(search.to_lowercase())),
        }
    }
}

/// Code to name table built from the CSV, kept in file order.
///
/// A repeated code replaces the earlier name in place, so name lookups still
/// see the code at the row where it first appeared.
#[derive(Clone, Debug, Default)]
pub struct IsoTable {
    rows: Vec<(String, String)>,
    by_code: HashMap<String, usize>,
}

impl IsoTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening ISO table {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("parsing {}", path.display()))
    }

    /// Stream rows from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut table = Self::default();
        for (idx, row) in csv_reader.deserialize::<IsoRow>().enumerate() {
            let row = row.with_context(|| format!("malformed ISO row {}", idx + 2))?;
            table.insert(row.code, row.name);
        }
        Ok(table)
    }

    fn insert(&mut self, code: String, name: String) {
        if let Some(&pos) = self.by_code.get(&code) {
            self.rows[pos].1 = name;
            return;
        }
        self.by_code.insert(code.clone(), self.rows.len());
        self.rows.push((code, name));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name for an exact (upper-case) code.
    pub fn name_for_code(&self, code: &str) -> Option<&str> {
        let pos = *self.by_code.get(code)?;
        Some(self.rows[pos].1.as_str())
    }

    /// Code of the earliest row whose name matches ignoring case.
    pub fn code_for_name(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.rows
            .iter()
            .find(|(_, candidate)| candidate.to_lowercase() == wanted)
            .map(|(code, _)| code.as_str())
    }

    pub fn resolve(&self, query: &IsoQuery) -> Option<&str> {
        match query {
            IsoQuery::Code(code) => self.name_for_code(code),
            IsoQuery::Name(name) => self.code_for_name(name),
        }
    }

    /// Codes and names in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }
}

/// Resolve a code to its country name or a name to its code.
///
/// The table is read fresh on every call.
pub fn country_info(csv_path: &Path, query: &str) -> Result<Option<String>> {
    let query = IsoQuery::parse(query)?;
    let table = IsoTable::from_path(csv_path)?;
    Ok(table.resolve(&query).map(str::to_string))
}
