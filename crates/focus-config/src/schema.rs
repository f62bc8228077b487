//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Service-level settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Foreground sampler settings
    #[serde(default)]
    pub sampler: RawSamplerConfig,

    /// Named whitelist presets
    #[serde(default)]
    pub presets: Vec<RawPreset>,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// HTTP listen address (default: 127.0.0.1:5024)
    pub listen_addr: Option<String>,

    /// Data directory for the store
    pub data_dir: Option<PathBuf>,

    /// Grace period used when a start request carries none
    pub default_grace_seconds: Option<u64>,

    /// Capacity of the bounded queue feeding the store worker
    pub store_queue_capacity: Option<usize>,
}

/// Foreground sampler settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSamplerConfig {
    /// One of "auto", "sway", "x11", "none"
    pub backend: Option<String>,
}

/// Raw whitelist preset
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPreset {
    pub name: String,

    #[serde(default)]
    pub processes: Vec<String>,

    #[serde(default)]
    pub websites: Vec<String>,
}
