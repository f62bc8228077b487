//! Sampler backend selection

use focus_host_api::{ForegroundSampler, NullSampler};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{SwaySampler, X11Sampler};

/// Linux display-server backends that can be sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxBackend {
    Sway,
    X11,
}

impl LinuxBackend {
    /// Detect the backend from the current session environment
    pub fn detect() -> Option<Self> {
        let swaysock = std::env::var("SWAYSOCK").ok();
        let display = std::env::var("DISPLAY").ok();
        Self::detect_from(swaysock.as_deref(), display.as_deref())
    }

    /// Sway wins over X11 since sway sessions usually export `DISPLAY` for
    /// XWayland too.
    pub fn detect_from(swaysock: Option<&str>, display: Option<&str>) -> Option<Self> {
        let set = |v: Option<&str>| v.is_some_and(|s| !s.is_empty());

        if set(swaysock) {
            Some(Self::Sway)
        } else if set(display) {
            Some(Self::X11)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sway => "sway",
            Self::X11 => "x11",
        }
    }
}

/// Build the sampler for `backend`, or a [`NullSampler`] when there is none
pub fn create_sampler(backend: Option<LinuxBackend>) -> Arc<dyn ForegroundSampler> {
    match backend {
        Some(LinuxBackend::Sway) => {
            info!(backend = "sway", "Foreground sampler selected");
            Arc::new(SwaySampler::new())
        }
        Some(LinuxBackend::X11) => {
            info!(backend = "x11", "Foreground sampler selected");
            Arc::new(X11Sampler::new())
        }
        None => {
            warn!("No foreground sampler available, process whitelist will not be enforced");
            Arc::new(NullSampler)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_sway() {
        assert_eq!(
            LinuxBackend::detect_from(Some("/run/user/1000/sway-ipc.sock"), Some(":0")),
            Some(LinuxBackend::Sway)
        );
        assert_eq!(
            LinuxBackend::detect_from(None, Some(":0")),
            Some(LinuxBackend::X11)
        );
        assert_eq!(LinuxBackend::detect_from(Some(""), Some("")), None);
        assert_eq!(LinuxBackend::detect_from(None, None), None);
    }

    #[test]
    fn test_create_sampler_names() {
        assert_eq!(create_sampler(Some(LinuxBackend::Sway)).backend_name(), "sway");
        assert_eq!(create_sampler(Some(LinuxBackend::X11)).backend_name(), "x11");
        assert_eq!(create_sampler(None).backend_name(), "none");
    }
}
