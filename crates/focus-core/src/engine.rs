//! Focus session state machine
//!
//! The engine is synchronous and owns at most one [`ActiveSession`]. Every
//! entry point takes the current time explicitly, so transitions can be
//! driven deterministically in tests. Side effects of a finished session go
//! to a [`SessionRecorder`], which must not block.

use chrono::{DateTime, Local};
use focus_api::{FocusStatus, SessionHistoryItem, SessionOutcome, StartFocusRequest};
use focus_store::SessionRecorder;
use focus_util::{ceil_secs, credited_minutes, FocusError, MonotonicInstant, SessionId};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{normalize_domain, ActiveSession, CoreEvent, SessionPlan};

/// Start decision from the engine
#[derive(Debug)]
pub enum StartDecision {
    Approved(SessionPlan),
    /// A session is already running
    Conflict,
}

/// Stop decision from the engine
#[derive(Debug)]
pub enum StopDecision {
    Stopped(CoreEvent),
    NoActiveSession,
}

/// The focus session engine
pub struct FocusEngine {
    recorder: Arc<dyn SessionRecorder>,
    default_grace_secs: u64,
    current_session: Option<ActiveSession>,
    /// Final snapshot of the last ended session
    last_status: FocusStatus,
}

impl FocusEngine {
    pub fn new(recorder: Arc<dyn SessionRecorder>, default_grace_secs: u64) -> Self {
        info!(default_grace_secs, "Focus engine initialized");

        Self {
            recorder,
            default_grace_secs,
            current_session: None,
            last_status: FocusStatus::default(),
        }
    }

    pub fn has_active_session(&self) -> bool {
        self.current_session.is_some()
    }

    pub fn current_session_id(&self) -> Option<&SessionId> {
        self.current_session.as_ref().map(|s| &s.plan.session_id)
    }

    /// Decide whether a new session may start.
    ///
    /// Request fields are not validated here; that happens at the boundary.
    pub fn request_start(&self, req: &StartFocusRequest) -> StartDecision {
        if let Some(session) = &self.current_session {
            debug!(
                session_id = %session.plan.session_id,
                "Start rejected, session already running"
            );
            return StartDecision::Conflict;
        }

        StartDecision::Approved(SessionPlan::from_request(req, self.default_grace_secs))
    }

    /// Start a session from an approved plan.
    ///
    /// Fails without touching the engine when the planned end cannot be
    /// represented on the monotonic clock.
    pub fn start_session(
        &mut self,
        plan: SessionPlan,
        now_mono: MonotonicInstant,
        now: DateTime<Local>,
    ) -> Result<(), FocusError> {
        let duration_secs = plan.duration.as_secs();
        let Some(session) = ActiveSession::new(plan, now, now_mono) else {
            warn!(duration_secs, "Session deadline out of range");
            return Err(FocusError::validation("DurationSeconds is too large"));
        };

        info!(
            session_id = %session.plan.session_id,
            duration_secs,
            grace_secs = session.plan.grace.as_secs(),
            processes = session.plan.processes.len(),
            websites = session.plan.websites.len(),
            "Session started"
        );

        self.current_session = Some(session);
        Ok(())
    }

    /// Re-evaluate the running session.
    ///
    /// `sample` is the foreground process observed for this tick, `None`
    /// when the sampler had nothing to report.
    pub fn tick(
        &mut self,
        now_mono: MonotonicInstant,
        now: DateTime<Local>,
        sample: Option<&str>,
    ) -> Vec<CoreEvent> {
        let mut events = Vec::new();

        let Some(session) = &mut self.current_session else {
            return events;
        };

        session.remaining_secs = ceil_secs(session.time_remaining(now_mono));
        if session.remaining_secs == 0 {
            events.extend(self.end(SessionOutcome::Success, None, now_mono, now));
            return events;
        }

        let sample = sample.filter(|s| !s.is_empty());
        session.current_process = sample.map(str::to_string);

        let allowed = sample.map(|p| session.plan.processes.contains(p));
        let was_violating = session.process_violation.is_violating();
        let breached = session
            .process_violation
            .observe(allowed, now_mono, session.plan.grace);

        if let Some(process) = sample {
            if !was_violating && session.process_violation.is_violating() {
                events.push(CoreEvent::ProcessViolationStarted {
                    session_id: session.plan.session_id.clone(),
                    process: process.to_string(),
                });
            }
        }

        if breached {
            let reason = format!(
                "Used non-whitelisted program: {}",
                sample.unwrap_or_default()
            );
            events.extend(self.end(SessionOutcome::Failed, Some(reason), now_mono, now));
        }

        events
    }

    /// Account a slice of website usage reported by the browser.
    ///
    /// `domain` takes precedence over `url` when non-blank. Ignored when no
    /// session runs, the duration is not positive, or the session has no
    /// website whitelist.
    pub fn report_usage(
        &mut self,
        domain: &str,
        url: &str,
        duration_secs: i64,
        now_mono: MonotonicInstant,
        now: DateTime<Local>,
    ) -> Option<CoreEvent> {
        let session = self.current_session.as_mut()?;

        if duration_secs <= 0 || session.plan.websites.is_empty() {
            return None;
        }

        let source = if domain.trim().is_empty() { url } else { domain };
        let normalized = normalize_domain(source);
        if normalized.is_empty() {
            debug!("Usage report without a domain ignored");
            return None;
        }

        let allowed = session.plan.websites.allows(&normalized);
        let breached =
            session
                .website_violation
                .observe(allowed, duration_secs as u64, session.plan.grace);

        debug!(
            session_id = %session.plan.session_id,
            domain = %normalized,
            allowed,
            duration_secs,
            website_violation_secs = session.website_violation.seconds(),
            "Website usage reported"
        );

        if !breached {
            return None;
        }

        let reason = format!("Used non-whitelisted website: {}", normalized);
        self.end(SessionOutcome::Failed, Some(reason), now_mono, now)
    }

    /// Stop the running session manually
    pub fn stop(&mut self, now_mono: MonotonicInstant, now: DateTime<Local>) -> StopDecision {
        match self.end(SessionOutcome::Aborted, None, now_mono, now) {
            Some(event) => StopDecision::Stopped(event),
            None => StopDecision::NoActiveSession,
        }
    }

    /// Current status snapshot
    pub fn status(&self) -> FocusStatus {
        match &self.current_session {
            Some(session) => session.status(),
            None => self.last_status.clone(),
        }
    }

    /// Terminal transition. Taking the session out of the engine makes this
    /// run at most once per session.
    fn end(
        &mut self,
        outcome: SessionOutcome,
        fail_reason: Option<String>,
        now_mono: MonotonicInstant,
        now: DateTime<Local>,
    ) -> Option<CoreEvent> {
        let session = self.current_session.take()?;

        let elapsed = session.elapsed(now_mono);
        let elapsed_secs = elapsed.as_secs();

        self.recorder.record_outcome(outcome, elapsed_secs);
        self.recorder.append_history(SessionHistoryItem {
            ts: now.timestamp_millis(),
            minutes: credited_minutes(elapsed_secs),
            note: session.plan.processes.note(),
            outcome,
        });

        self.last_status = FocusStatus {
            is_running: false,
            remaining_seconds: session.remaining_secs,
            is_failed: outcome == SessionOutcome::Failed,
            fail_reason: fail_reason.clone(),
            is_violating: false,
            violation_seconds: session.process_violation.seconds(),
            current_process: session.current_process.clone(),
        };

        info!(
            session_id = %session.plan.session_id,
            outcome = %outcome,
            elapsed_secs,
            fail_reason = fail_reason.as_deref().unwrap_or(""),
            "Session ended"
        );

        Some(CoreEvent::SessionEnded {
            session_id: session.plan.session_id,
            outcome,
            elapsed,
            fail_reason,
        })
    }
}
