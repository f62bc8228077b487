//! Session state

use chrono::{DateTime, Local};
use focus_api::{FocusStatus, StartFocusRequest};
use focus_util::{ceil_secs, MonotonicInstant, SessionId};
use std::time::Duration;

use crate::{ContiguousTracker, CumulativeTracker, DomainWhitelist, ProcessWhitelist};

/// Session parameters fixed at start
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub session_id: SessionId,
    pub duration: Duration,
    pub grace: Duration,
    pub processes: ProcessWhitelist,
    pub websites: DomainWhitelist,
}

impl SessionPlan {
    /// Build a plan from a start request. A non-positive grace falls back to
    /// `default_grace_secs`.
    pub fn from_request(req: &StartFocusRequest, default_grace_secs: u64) -> Self {
        Self {
            session_id: SessionId::new(),
            duration: Duration::from_secs(req.duration_seconds.max(0) as u64),
            grace: Duration::from_secs(req.effective_grace_seconds(default_grace_secs)),
            processes: ProcessWhitelist::new(&req.allowed_processes),
            websites: DomainWhitelist::new(&req.allowed_websites),
        }
    }
}

/// The running session
#[derive(Debug)]
pub struct ActiveSession {
    pub plan: SessionPlan,

    /// Wall-clock start time (for logging)
    pub started_at: DateTime<Local>,

    /// Monotonic start time (for enforcement)
    pub started_at_mono: MonotonicInstant,

    /// Monotonic planned end
    pub deadline_mono: MonotonicInstant,

    /// Remaining seconds as of the last tick
    pub remaining_secs: u64,

    /// Last sampled foreground process, as reported
    pub current_process: Option<String>,

    pub process_violation: ContiguousTracker,
    pub website_violation: CumulativeTracker,
}

impl ActiveSession {
    /// Returns `None` when the planned end is past what the monotonic clock
    /// can represent.
    pub fn new(
        plan: SessionPlan,
        now: DateTime<Local>,
        now_mono: MonotonicInstant,
    ) -> Option<Self> {
        let deadline_mono = now_mono.checked_add(plan.duration)?;
        let remaining_secs = ceil_secs(plan.duration);

        Some(Self {
            plan,
            started_at: now,
            started_at_mono: now_mono,
            deadline_mono,
            remaining_secs,
            current_process: None,
            process_violation: ContiguousTracker::Clear,
            website_violation: CumulativeTracker::default(),
        })
    }

    /// Time left until the planned end, zero once passed
    pub fn time_remaining(&self, now_mono: MonotonicInstant) -> Duration {
        self.deadline_mono.saturating_duration_until(now_mono)
    }

    /// Time since start
    pub fn elapsed(&self, now_mono: MonotonicInstant) -> Duration {
        now_mono.duration_since(self.started_at_mono)
    }

    /// Snapshot of the running session
    pub fn status(&self) -> FocusStatus {
        let violation_seconds = self.process_violation.seconds();
        FocusStatus {
            is_running: true,
            remaining_seconds: self.remaining_secs,
            is_failed: false,
            fail_reason: None,
            is_violating: violation_seconds > 0,
            violation_seconds,
            current_process: self.current_process.clone(),
        }
    }
}
