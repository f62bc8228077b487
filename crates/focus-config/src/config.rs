//! Validated configuration

use crate::schema::{RawConfig, RawPreset};
use focus_api::{WhitelistPreset, DEFAULT_GRACE_SECONDS};
use focus_util::{default_data_dir, DEFAULT_LISTEN_ADDR};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default capacity of the store worker queue
pub const DEFAULT_STORE_QUEUE_CAPACITY: usize = 64;

/// Validated service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub sampler: SamplerKind,
    pub presets: Vec<WhitelistPreset>,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub default_grace_seconds: u64,
    pub store_queue_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            data_dir: default_data_dir(),
            default_grace_seconds: DEFAULT_GRACE_SECONDS,
            store_queue_capacity: DEFAULT_STORE_QUEUE_CAPACITY,
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    DEFAULT_LISTEN_ADDR
        .parse()
        .unwrap_or(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5024))
}

/// Which foreground sampler backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerKind {
    /// Pick based on the session environment
    #[default]
    Auto,
    Sway,
    X11,
    /// Never report a foreground process
    None,
}

impl SamplerKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "sway" => Some(Self::Sway),
            "x11" => Some(Self::X11),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Sway => "sway",
            Self::X11 => "x11",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            sampler: SamplerKind::Auto,
            presets: Vec::new(),
        }
    }
}

impl Config {
    /// Convert an already-validated raw config
    pub fn from_raw(raw: RawConfig) -> Self {
        let defaults = ServiceConfig::default();

        let service = ServiceConfig {
            listen_addr: raw
                .service
                .listen_addr
                .and_then(|a| a.parse().ok())
                .unwrap_or(defaults.listen_addr),
            data_dir: raw.service.data_dir.unwrap_or(defaults.data_dir),
            default_grace_seconds: raw
                .service
                .default_grace_seconds
                .unwrap_or(defaults.default_grace_seconds),
            store_queue_capacity: raw
                .service
                .store_queue_capacity
                .unwrap_or(defaults.store_queue_capacity),
        };

        let sampler = raw
            .sampler
            .backend
            .as_deref()
            .and_then(SamplerKind::parse)
            .unwrap_or_default();

        let presets = raw.presets.into_iter().map(convert_preset).collect();

        Self {
            service,
            sampler,
            presets,
        }
    }

    pub fn preset(&self, name: &str) -> Option<&WhitelistPreset> {
        self.presets.iter().find(|p| p.name == name)
    }
}

fn convert_preset(raw: RawPreset) -> WhitelistPreset {
    WhitelistPreset {
        name: raw.name.trim().to_string(),
        allowed_processes: clean_list(raw.processes),
        allowed_websites: clean_list(raw.websites),
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
