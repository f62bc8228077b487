//! Test doubles shared by the engine and gateway tests

use focus_api::{SessionHistoryItem, SessionOutcome};
use focus_store::SessionRecorder;
use std::sync::Mutex;

/// Records every persistence call
#[derive(Default)]
pub struct RecordingSink {
    outcomes: Mutex<Vec<(SessionOutcome, u64)>>,
    history: Mutex<Vec<SessionHistoryItem>>,
}

impl RecordingSink {
    pub fn outcomes(&self) -> Vec<(SessionOutcome, u64)> {
        self.outcomes.lock().unwrap().clone()
    }

    pub fn outcome_count(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }

    pub fn history(&self) -> Vec<SessionHistoryItem> {
        self.history.lock().unwrap().clone()
    }
}

impl SessionRecorder for RecordingSink {
    fn record_outcome(&self, outcome: SessionOutcome, elapsed_secs: u64) {
        self.outcomes.lock().unwrap().push((outcome, elapsed_secs));
    }

    fn append_history(&self, entry: SessionHistoryItem) {
        self.history.lock().unwrap().push(entry);
    }
}
