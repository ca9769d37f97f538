//! Configuration management
//!
//! Handles:
//! - SNMP transport settings (community, version, timeout, retries, tools)
//! - Reachability probe settings
//! - Report naming
//!
//! Every field has a built-in default, so the file is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub snmp: SnmpConfig,
    pub ping: PingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpConfig {
    pub community: String,
    pub version: String,
    pub timeout_secs: u64,
    pub retries: u32,
    pub get_command: String,
    pub walk_command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    pub command: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub check_name: String,
}

impl Default for SnmpConfig {
    fn default() -> Self {
        Self {
            community: "public".to_string(),
            version: "2c".to_string(),
            timeout_secs: 5,
            retries: 2,
            get_command: "snmpget".to_string(),
            walk_command: "snmpwalk".to_string(),
        }
    }
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            command: "ping".to_string(),
            timeout_secs: 1,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            check_name: "CMM".to_string(),
        }
    }
}

impl ProbeConfig {
    /// Load from an explicit path, else from the user config dir, else defaults
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path).await;
        }

        match Self::config_file_path() {
            Ok(path) if path.exists() => Self::load_from(&path).await,
            _ => {
                debug!("No config file, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: ProbeConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get OS-specific config file path
    pub fn config_file_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

        path.push("check-cmm");
        path.push("config.toml");
        Ok(path)
    }

    /// Command line community wins over the file
    pub fn with_community(mut self, community: Option<String>) -> Self {
        if let Some(community) = community {
            self.snmp.community = community;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.snmp.community, "public");
        assert_eq!(config.snmp.timeout_secs, 5);
        assert_eq!(config.snmp.retries, 2);
        assert_eq!(config.report.check_name, "CMM");
    }

    #[test]
    fn test_config_file_path() {
        if let Ok(path) = ProbeConfig::config_file_path() {
            assert!(path.ends_with("check-cmm/config.toml"));
        }
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[snmp]\ncommunity = \"secret\"\nretries = 0\n").unwrap();

        let config = ProbeConfig::load(Some(file.path())).await.unwrap();
        assert_eq!(config.snmp.community, "secret");
        assert_eq!(config.snmp.retries, 0);
        assert_eq!(config.snmp.timeout_secs, 5);
        assert_eq!(config.ping, PingConfig::default());
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[snmp]\nretries = \"many\"").unwrap();
        assert!(ProbeConfig::load(Some(file.path())).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ProbeConfig::load(Some(&missing)).await.is_err());
    }

    #[test]
    fn test_cli_community_overrides_file() {
        let config = ProbeConfig::default().with_community(Some("ops".into()));
        assert_eq!(config.snmp.community, "ops");

        let config = ProbeConfig::default().with_community(None);
        assert_eq!(config.snmp.community, "public");
    }
}
