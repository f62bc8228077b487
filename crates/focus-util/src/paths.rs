//! Default paths for focusd components
//!
//! Paths are user-writable by default (no root required):
//! - Config: `$XDG_CONFIG_HOME/focusd/config.toml` or `~/.config/focusd/config.toml`
//! - Data: `$XDG_DATA_HOME/focusd` or `~/.local/share/focusd`

use std::path::PathBuf;

/// Environment variable for overriding the config file path
pub const FOCUSD_CONFIG_ENV: &str = "FOCUSD_CONFIG";

/// Environment variable for overriding the data directory
pub const FOCUSD_DATA_DIR_ENV: &str = "FOCUSD_DATA_DIR";

/// Environment variable for overriding the HTTP listen address
pub const FOCUSD_LISTEN_ENV: &str = "FOCUSD_LISTEN";

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5024";

/// Database filename within the data directory
pub const DB_FILENAME: &str = "focusd.db";

/// Application subdirectory name
const APP_DIR: &str = "focusd";

const CONFIG_FILENAME: &str = "config.toml";

/// Get the default config file path (ignores `FOCUSD_CONFIG`; clap reads it).
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$FOCUSD_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/focusd` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/focusd` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(FOCUSD_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking FOCUSD_DATA_DIR env var.
/// Used for default values in configs where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_contains_focusd() {
        let path = default_config_path();
        assert!(path.to_string_lossy().contains("focusd"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn data_dir_contains_focusd() {
        let path = data_dir_without_env();
        assert!(path.to_string_lossy().contains("focusd"));
    }

    #[test]
    fn default_listen_addr_is_loopback() {
        let addr: std::net::SocketAddr = DEFAULT_LISTEN_ADDR.parse().unwrap();
        assert!(addr.ip().is_loopback());
    }
}
