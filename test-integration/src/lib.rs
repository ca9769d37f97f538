//! Frozen chassis fixtures for the end-to-end tests

use anyhow::Result;
use cmm_devkit::ChassisFixture;
use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load `fixtures/<name>.json`
pub fn load_fixture(name: &str) -> Result<ChassisFixture> {
    ChassisFixture::from_file(fixtures_dir().join(format!("{}.json", name)))
}
