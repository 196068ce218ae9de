//! Entry point tying the dataset, ISO table, and cache to one data root.
//!
//! Opening an `Atlas` runs the cache version gate once. The dataset is read
//! on first use and kept for the lifetime of the value; the ISO table is
//! re-read per query.

use crate::PACKAGE_VERSION;
use crate::cache::{CacheSync, StatusCache, VersionGate};
use crate::dataset::{CountryIndex, CountryRecord, StatusBasis, StatusLevel};
use crate::iso::country_info;
use crate::layout::DataLayout;
use anyhow::Result;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct Atlas {
    layout: DataLayout,
    sync: CacheSync,
    status: StatusCache,
    index: OnceLock<CountryIndex>,
}

impl Atlas {
    /// Open `layout`, invalidating its cache if it was built by another
    /// package version.
    pub fn open(layout: DataLayout) -> Result<Self> {
        Self::open_as(layout, PACKAGE_VERSION)
    }

    /// Like `open`, but gate the cache on an explicit version string.
    pub fn open_as(layout: DataLayout, version: &str) -> Result<Self> {
        let sync = VersionGate::new(layout.cache_dir(), version).sync()?;
        let status = StatusCache::new(layout.cache_dir());
        Ok(Self {
            layout,
            sync,
            status,
            index: OnceLock::new(),
        })
    }

    /// Open the layout found via `DataLayout::from_env`.
    pub fn discover() -> Result<Self> {
        Self::open(DataLayout::from_env()?)
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Outcome of the version gate run by `open`.
    pub fn cache_sync(&self) -> &CacheSync {
        &self.sync
    }

    /// The dataset, loading it on first access.
    pub fn index(&self) -> Result<&CountryIndex> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let loaded = CountryIndex::load(self.layout.dataset())?;
        Ok(self.index.get_or_init(|| loaded))
    }

    pub fn country(&self, name: &str) -> Result<Option<&CountryRecord>> {
        Ok(self.index()?.country(name))
    }

    pub fn capital(&self, country: &str) -> Result<Option<&str>> {
        Ok(self.index()?.capital(country))
    }

    pub fn landscapes(&self, country: &str) -> Result<Option<&[String]>> {
        Ok(self.index()?.landscapes(country))
    }

    pub fn political(&self, country: &str) -> Result<Option<&str>> {
        Ok(self.index()?.political(country))
    }

    pub fn memberships(&self, country: &str) -> Result<Option<&[String]>> {
        Ok(self.index()?.memberships(country))
    }

    pub fn military(&self, country: &str) -> Result<Option<&str>> {
        Ok(self.index()?.military(country))
    }

    pub fn continent(&self, country: &str) -> Result<Option<&str>> {
        Ok(self.index()?.continent(country))
    }

    pub fn historical(&self, country: &str) -> Result<Option<&str>> {
        Ok(self.index()?.historical(country))
    }

    pub fn currency(&self, country: &str) -> Result<Option<&str>> {
        Ok(self.index()?.currency(country))
    }

    pub fn economic(&self, country: &str) -> Result<Option<&str>> {
        Ok(self.index()?.economic(country))
    }

    pub fn languages(&self, country: &str) -> Result<Option<&[String]>> {
        Ok(self.index()?.languages(country))
    }

    /// Countries sharing a status. `basis` is `e`/`m`, `status` is one of
    /// `strong`, `average`, `weak`; both are case-insensitive.
    ///
    /// Results are persisted in the cache directory on first request.
    pub fn by_status(&self, basis: &str, status: &str) -> Result<Vec<String>> {
        let basis = StatusBasis::parse(basis)?;
        let level = StatusLevel::parse(status)?;
        Ok(self.status.lookup(self.index()?, basis, &level))
    }

    /// ISO code for a name, or name for a code.
    pub fn country_info(&self, query: &str) -> Result<Option<String>> {
        country_info(self.layout.iso_codes(), query)
    }
}
