//! Violation trackers
//!
//! A session carries two independent trackers that share one grace budget.
//! Either one reaching the grace period fails the session; they are never
//! summed.

use focus_util::MonotonicInstant;
use std::time::Duration;

/// Contiguous foreground-process violation.
///
/// Any tick where the sample is allowed or unavailable clears the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContiguousTracker {
    #[default]
    Clear,
    Violating {
        since: MonotonicInstant,
        elapsed_secs: u64,
    },
}

impl ContiguousTracker {
    /// Feed one sample. `allowed` is `None` when no sample was available.
    ///
    /// Returns true once the violation has lasted at least `grace`. The
    /// first violating sample only starts the timer.
    pub fn observe(&mut self, allowed: Option<bool>, now: MonotonicInstant, grace: Duration) -> bool {
        match (allowed, *self) {
            (None | Some(true), _) => {
                *self = Self::Clear;
                false
            }
            (Some(false), Self::Clear) => {
                *self = Self::Violating {
                    since: now,
                    elapsed_secs: 0,
                };
                false
            }
            (Some(false), Self::Violating { since, .. }) => {
                let elapsed = now.duration_since(since);
                *self = Self::Violating {
                    since,
                    elapsed_secs: elapsed.as_secs(),
                };
                elapsed >= grace
            }
        }
    }

    pub fn is_violating(&self) -> bool {
        matches!(self, Self::Violating { .. })
    }

    /// Whole seconds of the current violation, zero when clear
    pub fn seconds(&self) -> u64 {
        match self {
            Self::Clear => 0,
            Self::Violating { elapsed_secs, .. } => *elapsed_secs,
        }
    }
}

/// Cumulative website violation.
///
/// Only an explicit allowed-domain report resets the counter; silence does
/// not decay it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CumulativeTracker {
    seconds: u64,
}

impl CumulativeTracker {
    /// Feed one usage report. Returns true once the total reaches `grace`.
    pub fn observe(&mut self, allowed: bool, duration_secs: u64, grace: Duration) -> bool {
        if allowed {
            self.seconds = 0;
            return false;
        }

        self.seconds = self.seconds.saturating_add(duration_secs);
        Duration::from_secs(self.seconds) >= grace
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }
}
