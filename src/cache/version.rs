//! Version-gated invalidation of the derived-data cache.
//!
//! The cache directory is flat: every regular file inside it is derived from
//! the dataset shipped with one package version. `version.dat` records that
//! version; when it is missing or stale the directory is emptied before the
//! marker is rewritten.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const VERSION_MARKER: &str = "version.dat";

/// What `VersionGate::sync` found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheState {
    /// No marker existed; the directory was treated as stale.
    Fresh,
    /// Marker matched the current version.
    Current,
    /// Marker named another version.
    Invalidated { previous: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSync {
    pub state: CacheState,
    pub removed: usize,
}

/// Compares the cache marker with the running package version.
#[derive(Clone, Debug)]
pub struct VersionGate {
    cache_dir: PathBuf,
    current_version: String,
}

impl VersionGate {
    pub fn new(cache_dir: impl Into<PathBuf>, current_version: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            current_version: current_version.into(),
        }
    }

    pub fn marker_path(&self) -> PathBuf {
        self.cache_dir.join(VERSION_MARKER)
    }

    /// Version recorded on disk, if any.
    pub fn recorded_version(&self) -> Result<Option<String>> {
        let marker = self.marker_path();
        if !marker.is_file() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&marker)
            .with_context(|| format!("reading cache marker {}", marker.display()))?;
        Ok(Some(raw.trim().to_string()))
    }

    /// Create the cache directory, clear it when the marker is absent or
    /// stale, and leave the marker naming the current version.
    pub fn sync(&self) -> Result<CacheSync> {
        fs::create_dir_all(&self.cache_dir).with_context(|| {
            format!("creating cache directory {}", self.cache_dir.display())
        })?;

        let state = match self.recorded_version()? {
            Some(previous) if previous == self.current_version => {
                tracing::debug!(version = %previous, "cache marker is current");
                return Ok(CacheSync {
                    state: CacheState::Current,
                    removed: 0,
                });
            }
            Some(previous) => CacheState::Invalidated { previous },
            None => CacheState::Fresh,
        };

        let removed = clear_files(&self.cache_dir)?;
        let marker = self.marker_path();
        fs::write(&marker, &self.current_version)
            .with_context(|| format!("writing cache marker {}", marker.display()))?;

        match &state {
            CacheState::Invalidated { previous } => tracing::info!(
                previous = %previous,
                current = %self.current_version,
                removed,
                "package version changed; cleared derived-data cache"
            ),
            _ => tracing::debug!(
                current = %self.current_version,
                removed,
                "initialized derived-data cache"
            ),
        }

        Ok(CacheSync { state, removed })
    }
}

/// Remove every regular file directly inside `dir`. Subdirectories stay.
fn clear_files(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        removed += 1;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_marker_clears_and_records_version() -> Result<()> {
        let tmp = TempDir::new()?;
        let cache = tmp.path().join("cache");
        fs::create_dir_all(&cache)?;
        fs::write(cache.join("economic_status.json"), "{}")?;

        let sync = VersionGate::new(&cache, "1.2.0").sync()?;
        assert_eq!(sync.state, CacheState::Fresh);
        assert_eq!(sync.removed, 1);
        assert!(!cache.join("economic_status.json").exists());
        assert_eq!(fs::read_to_string(cache.join(VERSION_MARKER))?, "1.2.0");
        Ok(())
    }

    #[test]
    fn matching_marker_leaves_files_alone() -> Result<()> {
        let tmp = TempDir::new()?;
        let cache = tmp.path().to_path_buf();
        fs::write(cache.join(VERSION_MARKER), "1.2.0\n")?;
        fs::write(cache.join("military_situation.json"), "{}")?;

        let sync = VersionGate::new(&cache, "1.2.0").sync()?;
        assert_eq!(sync.state, CacheState::Current);
        assert!(cache.join("military_situation.json").exists());
        Ok(())
    }

    #[test]
    fn stale_marker_is_replaced() -> Result<()> {
        let tmp = TempDir::new()?;
        let cache = tmp.path().to_path_buf();
        fs::write(cache.join(VERSION_MARKER), "1.1.0")?;
        fs::write(cache.join("economic_status.json"), "{}")?;
        fs::create_dir(cache.join("keep"))?;

        let gate = VersionGate::new(&cache, "1.2.0");
        let sync = gate.sync()?;
        assert_eq!(
            sync.state,
            CacheState::Invalidated {
                previous: "1.1.0".to_string()
            }
        );
        // economic_status.json plus the old marker
        assert_eq!(sync.removed, 2);
        assert!(cache.join("keep").is_dir());
        assert_eq!(gate.recorded_version()?, Some("1.2.0".to_string()));
        Ok(())
    }

    #[test]
    fn creates_missing_directory() -> Result<()> {
        let tmp = TempDir::new()?;
        let cache = tmp.path().join("nested/cache");
        VersionGate::new(&cache, "0.1.0").sync()?;
        assert!(cache.join(VERSION_MARKER).is_file());
        Ok(())
    }
}
