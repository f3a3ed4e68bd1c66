//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use breakfast_types::StakingParams;

use crate::NodeError;

/// Configuration for a breakfast staking node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so
/// an empty file is a valid config.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Address of the deploying principal; becomes the initial authorized
    /// minter.
    #[serde(default = "default_deployer")]
    pub deployer: String,

    /// Data directory for snapshots.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Protocol parameters; defaults are the observed constants.
    #[serde(default)]
    pub params: StakingParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl NodeConfig {
    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, NodeError> {
        toml::from_str(raw).map_err(|e| NodeError::Config(e.to_string()))
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            deployer: default_deployer(),
            data_dir: default_data_dir(),
            params: StakingParams::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_deployer() -> String {
    "deployer".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./breakfast_data")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
