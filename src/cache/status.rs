//! Persisted groupings of countries by economic or military status.
//!
//! Each basis has one file in the cache directory holding a map from status
//! to country keys, e.g. `{"strong": ["GERMANY", ...]}`. A status missing from
//! the file is computed from the dataset and merged in. The cache is an
//! optimization only: unreadable files count as empty and write failures are
//! logged, never returned.

use crate::cache::write_json_atomic;
use crate::dataset::{CountryIndex, StatusBasis, StatusLevel};
use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Status name to country keys, as stored on disk.
pub type StatusGrouping = BTreeMap<String, Vec<String>>;

#[derive(Clone, Debug)]
pub struct StatusCache {
    cache_dir: PathBuf,
}

impl StatusCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn path_for(&self, basis: StatusBasis) -> PathBuf {
        self.cache_dir.join(basis.cache_file())
    }

    /// Validate the raw selector and status, then resolve the grouping.
    ///
    /// The selector is checked first so an invalid pair reports the basis.
    pub fn get(&self, index: &CountryIndex, basis: &str, status: &str) -> Result<Vec<String>> {
        let basis = StatusBasis::parse(basis)?;
        let level = StatusLevel::parse(status)?;
        Ok(self.lookup(index, basis, &level))
    }

    /// Countries rated `level` on `basis`, served from disk when cached.
    pub fn lookup(
        &self,
        index: &CountryIndex,
        basis: StatusBasis,
        level: &StatusLevel,
    ) -> Vec<String> {
        let path = self.path_for(basis);
        let mut grouping = read_grouping(&path);
        if let Some(hit) = grouping.get(level.as_str()) {
            tracing::debug!(basis = basis.field(), status = %level, "status cache hit");
            return hit.clone();
        }

        let countries = index.countries_with(basis, level);
        grouping.insert(level.as_str().to_string(), countries.clone());
        if let Err(err) = write_json_atomic(&path, &grouping) {
            let detail = format!("{err:#}");
            tracing::warn!(
                path = %path.display(),
                error = %detail,
                "failed to persist status grouping"
            );
        }
        countries
    }

    /// Persisted grouping for `basis`, empty when absent or unreadable.
    pub fn cached(&self, basis: StatusBasis) -> StatusGrouping {
        read_grouping(&self.path_for(basis))
    }
}

fn read_grouping(path: &Path) -> StatusGrouping {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return StatusGrouping::new(),
    };
    if data.trim().is_empty() {
        return StatusGrouping::new();
    }
    match serde_json::from_str(&data) {
        Ok(grouping) => grouping,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "ignoring unreadable status cache"
            );
            StatusGrouping::new()
        }
    }
}
