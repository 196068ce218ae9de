//! Derived-data cache under `data/cache/`.
//!
//! `VersionGate` empties the directory whenever the package version changes;
//! `StatusCache` stores the status groupings that live there.

pub mod status;
pub mod version;

pub use status::{StatusCache, StatusGrouping};
pub use version::{CacheState, CacheSync, VERSION_MARKER, VersionGate};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write pretty JSON next to `path` and rename it into place.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", path.display()))?;
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
