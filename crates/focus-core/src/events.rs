//! Core events emitted by the engine

use focus_api::SessionOutcome;
use focus_util::SessionId;
use std::time::Duration;

/// Events emitted by the focus engine
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// A non-whitelisted process took the foreground
    ProcessViolationStarted {
        session_id: SessionId,
        process: String,
    },

    /// Session reached a terminal state
    SessionEnded {
        session_id: SessionId,
        outcome: SessionOutcome,
        elapsed: Duration,
        fail_reason: Option<String>,
    },
}
