//! Country reference data lookups.
//!
//! The crate serves attribute queries (capital, currency, continent, ...) over
//! a static JSON dataset, resolves ISO codes against a CSV table, and keeps a
//! small on-disk cache of status groupings that is cleared whenever the
//! package version changes. `Atlas` is the entry point; the lower-level types
//! are exported for callers that manage their own layout or caching.

use anyhow::{Result, anyhow};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod atlas;
pub mod cache;
pub mod dataset;
pub mod iso;
pub mod layout;

pub use atlas::Atlas;
pub use cache::{CacheSync, StatusCache, VersionGate};
pub use dataset::{CountryIndex, CountryKey, CountryRecord, StatusBasis, StatusLevel};
pub use iso::{IsoQuery, IsoTable, country_info};
pub use layout::DataLayout;

/// Placeholder printed for lookups that have no answer.
pub const NOT_AVAILABLE: &str = "N/A";

/// Version string written to the cache marker.
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

const ROOT_ENV: &str = "COUNTRYFACTS_ROOT";
const DATASET_SENTINEL: &str = "data/json/countries.json";
const ISO_SENTINEL: &str = "data/countryCodes.csv";

/// Returns true when `candidate` holds both the dataset and the ISO table.
pub fn is_data_root(candidate: &Path) -> bool {
    candidate.join(DATASET_SENTINEL).is_file() && candidate.join(ISO_SENTINEL).is_file()
}

fn data_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_data_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_data_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the directory that holds `data/`.
///
/// Honors `COUNTRYFACTS_ROOT` when it points at a real data root, then climbs
/// up from the current executable and the working directory, then falls back
/// to the path baked in at build time.
pub fn find_data_root() -> Result<PathBuf> {
    let mut climb_from = Vec::new();
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        climb_from.push(exe_dir);
    }
    if let Ok(cwd) = env::current_dir() {
        climb_from.push(cwd);
    }
    resolve_data_root(
        env::var(ROOT_ENV).ok().as_deref(),
        &climb_from,
        option_env!("COUNTRYFACTS_ROOT_HINT"),
    )
}

/// Apply the root search order to explicit inputs.
///
/// An explicit root that does not hold the dataset is skipped, not fatal.
fn resolve_data_root(
    explicit: Option<&str>,
    climb_from: &[PathBuf],
    build_hint: Option<&str>,
) -> Result<PathBuf> {
    explicit
        .and_then(data_root_from_hint)
        .or_else(|| climb_from.iter().find_map(|start| search_upwards(start)))
        .or_else(|| build_hint.and_then(data_root_from_hint))
        .ok_or_else(|| {
            anyhow!(
                "Unable to locate the country dataset. Set {ROOT_ENV} to a directory containing {DATASET_SENTINEL} and {ISO_SENTINEL}."
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_root(dir: &Path) {
        fs::create_dir_all(dir.join("data/json")).unwrap();
        fs::write(dir.join(DATASET_SENTINEL), "{}").unwrap();
        fs::write(dir.join(ISO_SENTINEL), "Code,Name\n").unwrap();
    }

    #[test]
    fn hint_requires_both_files() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data/json")).unwrap();
        fs::write(tmp.path().join(DATASET_SENTINEL), "{}").unwrap();
        assert!(data_root_from_hint(tmp.path().to_str().unwrap()).is_none());

        fs::write(tmp.path().join(ISO_SENTINEL), "Code,Name\n").unwrap();
        let root = data_root_from_hint(tmp.path().to_str().unwrap()).expect("root");
        assert_eq!(root, fs::canonicalize(tmp.path()).unwrap());
    }

    #[test]
    fn empty_hint_is_ignored() {
        assert!(data_root_from_hint("").is_none());
    }

    #[test]
    fn explicit_root_wins_over_climbing() {
        let explicit = TempDir::new().unwrap();
        seed_root(explicit.path());
        let other = TempDir::new().unwrap();
        seed_root(other.path());

        let root = resolve_data_root(
            explicit.path().to_str(),
            &[other.path().to_path_buf()],
            None,
        )
        .unwrap();
        assert_eq!(root, fs::canonicalize(explicit.path()).unwrap());
    }

    #[test]
    fn invalid_explicit_root_falls_through_to_build_hint() {
        let bogus = TempDir::new().unwrap();
        let hinted = TempDir::new().unwrap();
        seed_root(hinted.path());

        let root = resolve_data_root(
            bogus.path().to_str(),
            &[bogus.path().to_path_buf()],
            hinted.path().to_str(),
        )
        .unwrap();
        assert_eq!(root, fs::canonicalize(hinted.path()).unwrap());
    }

    #[test]
    fn missing_root_names_the_env_var() {
        let empty = TempDir::new().unwrap();
        let err = resolve_data_root(None, &[empty.path().to_path_buf()], None)
            .expect_err("no dataset anywhere");
        assert!(
            err.to_string().contains("COUNTRYFACTS_ROOT"),
            "error should point at the env var: {err}"
        );
    }

    #[test]
    fn search_climbs_to_nearest_root() {
        let tmp = TempDir::new().unwrap();
        seed_root(tmp.path());
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let found = search_upwards(&nested).expect("root found");
        assert_eq!(found, fs::canonicalize(tmp.path()).unwrap());
    }
}
