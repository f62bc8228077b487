//! Request bodies accepted by focusd

use chrono::{DateTime, Utc};
use focus_util::FocusError;
use serde::{Deserialize, Serialize};

/// Grace period applied when a request does not carry a usable one
pub const DEFAULT_GRACE_SECONDS: u64 = 10;

/// Longest session a start request may ask for
pub const MAX_DURATION_SECONDS: i64 = i32::MAX as i64;

fn default_grace_seconds() -> i64 {
    DEFAULT_GRACE_SECONDS as i64
}

/// Body of `POST /api/focus/start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartFocusRequest {
    pub duration_seconds: i64,

    /// Permitted foreground processes, e.g. `"chrome.exe"` or `"code"`
    #[serde(default)]
    pub allowed_processes: Vec<String>,

    /// Permitted website domains or URLs, e.g. `"github.com"`
    #[serde(default)]
    pub allowed_websites: Vec<String>,

    /// Values <= 0 fall back to the service default
    #[serde(default = "default_grace_seconds")]
    pub grace_seconds: i64,
}

impl StartFocusRequest {
    pub fn new(duration_seconds: i64, allowed_processes: Vec<String>) -> Self {
        Self {
            duration_seconds,
            allowed_processes,
            allowed_websites: Vec::new(),
            grace_seconds: default_grace_seconds(),
        }
    }

    pub fn with_websites(mut self, websites: Vec<String>) -> Self {
        self.allowed_websites = websites;
        self
    }

    pub fn with_grace_seconds(mut self, grace_seconds: i64) -> Self {
        self.grace_seconds = grace_seconds;
        self
    }

    /// Boundary checks performed before a request reaches the engine
    pub fn validate(&self) -> Result<(), FocusError> {
        if self.duration_seconds <= 0 {
            return Err(FocusError::validation("DurationSeconds must be > 0"));
        }

        if self.duration_seconds > MAX_DURATION_SECONDS {
            return Err(FocusError::validation(format!(
                "DurationSeconds must be <= {}",
                MAX_DURATION_SECONDS
            )));
        }

        if self.allowed_processes.is_empty() {
            return Err(FocusError::validation("AllowedProcesses cannot be empty"));
        }

        Ok(())
    }

    /// Grace period in seconds, coercing non-positive values to `fallback`
    pub fn effective_grace_seconds(&self, fallback: u64) -> u64 {
        if self.grace_seconds <= 0 {
            fallback
        } else {
            self.grace_seconds as u64
        }
    }
}

/// One website usage slice reported by the browser extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageReport {
    pub url: String,
    pub domain: String,
    pub title: String,
    pub icon: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds spent on the page
    pub duration: i64,
    pub user_id: Option<String>,
}

impl UsageReport {
    /// Slices without a URL or with no time spent are skipped entirely
    pub fn is_valid(&self) -> bool {
        !self.url.trim().is_empty() && self.duration > 0
    }

    pub fn user_id_or_default(&self) -> &str {
        self.user_id.as_deref().unwrap_or("local")
    }
}
