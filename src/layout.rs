//! Paths the library reads and writes, derived from a single data root.

use crate::find_data_root;
use anyhow::Result;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const CACHE_DIR_ENV: &str = "COUNTRYFACTS_CACHE_DIR";

/// Dataset, ISO table, and cache locations for one data root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
    dataset: PathBuf,
    iso_codes: PathBuf,
    cache_dir: PathBuf,
}

impl DataLayout {
    /// Standard layout under `root`: `data/json/countries.json`,
    /// `data/countryCodes.csv`, and `data/cache/`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data = root.join("data");
        Self {
            dataset: data.join("json").join("countries.json"),
            iso_codes: data.join("countryCodes.csv"),
            cache_dir: data.join("cache"),
            root,
        }
    }

    /// Discover the data root and apply the environment overrides.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(find_data_root()?).with_env_overrides())
    }

    /// Apply `COUNTRYFACTS_CACHE_DIR` when it is set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_cache_override(env::var_os(CACHE_DIR_ENV))
    }

    fn with_cache_override(self, dir: Option<OsString>) -> Self {
        match dir {
            Some(dir) if !dir.is_empty() => self.with_cache_dir(dir),
            _ => self,
        }
    }

    /// Relocate the derived-data cache, e.g. when the data root is read-only.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dataset(&self) -> &Path {
        &self.dataset
    }

    pub fn iso_codes(&self) -> &Path {
        &self.iso_codes
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}
