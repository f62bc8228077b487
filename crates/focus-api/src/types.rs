//! Shared types for the focusd API

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a focus session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Planned duration elapsed
    Success,
    /// Grace period exceeded on one of the violation channels
    Failed,
    /// Stopped manually
    Aborted,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Aborted => "aborted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            "aborted" => Some(Self::Aborted),
            _ => None,
        }
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status snapshot returned by `/api/focus/status` and `/api/focus/start`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusStatus {
    pub is_running: bool,
    pub remaining_seconds: u64,
    pub is_failed: bool,
    pub fail_reason: Option<String>,
    /// A contiguous process violation is in progress
    pub is_violating: bool,
    /// Length of the current contiguous process violation
    pub violation_seconds: u64,
    /// Last sampled foreground process, as reported by the sampler
    pub current_process: Option<String>,
}

/// One row of the session history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHistoryItem {
    /// End timestamp, unix milliseconds
    pub ts: i64,
    /// Credited minutes (rounded up, at least 1)
    pub minutes: u64,
    /// Process whitelist of the session, comma separated
    pub note: String,
    pub outcome: SessionOutcome,
}

/// Aggregate focus statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_focus_seconds: u64,
    pub total_sessions: u64,
    pub successful_sessions: u64,
    pub failed_sessions: u64,
    pub canceled_sessions: u64,
}

/// Per-domain usage total for `/api/usage/today`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub domain: String,
    pub total_seconds: i64,
}

/// Named whitelist preset served from config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistPreset {
    pub name: String,
    pub allowed_processes: Vec<String>,
    pub allowed_websites: Vec<String>,
}

/// Health status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub api_version: u32,
    pub store_healthy: bool,
    pub sampler_backend: String,
    pub session_active: bool,
}

/// Error body for non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_camel_case() {
        let status = FocusStatus {
            is_running: true,
            remaining_seconds: 42,
            current_process: Some("code".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["isRunning"], true);
        assert_eq!(json["remainingSeconds"], 42);
        assert_eq!(json["isFailed"], false);
        assert!(json["failReason"].is_null());
        assert_eq!(json["isViolating"], false);
        assert_eq!(json["violationSeconds"], 0);
        assert_eq!(json["currentProcess"], "code");
    }

    #[test]
    fn outcome_serializes_lowercase() {
        let item = SessionHistoryItem {
            ts: 1_700_000_000_000,
            minutes: 25,
            note: "code, firefox".into(),
            outcome: SessionOutcome::Aborted,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""outcome":"aborted""#));
    }

    #[test]
    fn outcome_parse_matches_as_str() {
        for outcome in [
            SessionOutcome::Success,
            SessionOutcome::Failed,
            SessionOutcome::Aborted,
        ] {
            assert_eq!(SessionOutcome::parse(outcome.as_str()), Some(outcome));
        }
        assert_eq!(SessionOutcome::parse("Success"), None);
    }
}
