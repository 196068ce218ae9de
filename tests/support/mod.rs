#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use countryfacts::{DataLayout, find_data_root};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn repo_root() -> PathBuf {
    find_data_root().expect("tests require the shipped dataset")
}

/// Shipped dataset with the cache redirected into `cache`.
pub fn shipped_layout(cache: &Path) -> DataLayout {
    DataLayout::new(repo_root()).with_cache_dir(cache)
}

/// Temporary data root holding a small hand-written dataset.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate fixture root")?;
        let data = dir.path().join("data");
        fs::create_dir_all(data.join("json"))?;
        let countries = json!({
            "NETHERLANDS": {
                "capital_city": "Amsterdam",
                "landscapes": ["Flat Land", "Canals", "Tulip Fields"],
                "memberships": ["EU"],
                "economic_status": "strong",
                "military_situation": "average",
                "continent": "europe",
                "currency": "Euro"
            },
            "GERMANY": {
                "capital_city": "Berlin",
                "memberships": ["EU", "NATO"],
                "economic_status": "strong",
                "military_situation": "strong",
                "political_status": "federal parliamentary republic"
            },
            "CHAD": {
                "capital_city": "N'Djamena",
                "economic_status": "Weak",
                "military_situation": "WEAK"
            }
        });
        fs::write(
            data.join("json").join("countries.json"),
            serde_json::to_string_pretty(&countries)?,
        )?;
        fs::write(
            data.join("countryCodes.csv"),
            "Code,Name\nNL,Netherlands\nDE,Germany\nTD,Chad\nKR,\"Korea, Republic of\"\n",
        )?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> DataLayout {
        DataLayout::new(self.root())
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root().join("data").join("cache")
    }
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// The binary with no inherited dataset or cache configuration.
pub fn country_info_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_country-info"));
    cmd.env_remove("COUNTRYFACTS_ROOT");
    cmd.env_remove("COUNTRYFACTS_CACHE_DIR");
    cmd
}

pub fn country_info_cmd(root: &Path) -> Command {
    let mut cmd = country_info_bin();
    cmd.arg("--root").arg(root);
    cmd
}
