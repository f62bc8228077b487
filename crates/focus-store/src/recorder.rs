//! Bounded write queue between the session engine and the store
//!
//! The engine records outcomes while holding its session lock, so it never
//! touches the database directly. Writes are pushed onto a bounded channel
//! and applied in order by a worker on the blocking thread pool. A full or
//! closed queue drops the write with a warning; the in-memory session
//! transition is unaffected.

use focus_api::{SessionHistoryItem, SessionOutcome};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{Store, WebsiteUsage};

/// Sink for the side effects of a finished session
pub trait SessionRecorder: Send + Sync {
    /// Fold the outcome and elapsed seconds into the statistics
    fn record_outcome(&self, outcome: SessionOutcome, elapsed_secs: u64);

    /// Append an entry to the session history
    fn append_history(&self, entry: SessionHistoryItem);
}

/// Work item for the store worker
#[derive(Debug)]
pub enum StoreCommand {
    RecordOutcome {
        outcome: SessionOutcome,
        elapsed_secs: u64,
    },
    AppendHistory(SessionHistoryItem),
    AddWebsiteUsage(WebsiteUsage),
    /// Acknowledged once every earlier command has been applied
    Flush(oneshot::Sender<()>),
}

impl StoreCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::RecordOutcome { .. } => "record_outcome",
            Self::AppendHistory(_) => "append_history",
            Self::AddWebsiteUsage(_) => "add_website_usage",
            Self::Flush(_) => "flush",
        }
    }
}

/// Cloneable handle that enqueues store writes without blocking
#[derive(Clone)]
pub struct StoreWriter {
    tx: mpsc::Sender<StoreCommand>,
}

impl StoreWriter {
    fn enqueue(&self, command: StoreCommand) {
        match self.tx.try_send(command) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(command)) => {
                warn!(command = command.name(), "Store queue full, dropping write");
            }
            Err(mpsc::error::TrySendError::Closed(command)) => {
                warn!(command = command.name(), "Store worker gone, dropping write");
            }
        }
    }

    /// Queue a website usage slice for persistence
    pub fn add_website_usage(&self, usage: WebsiteUsage) {
        self.enqueue(StoreCommand::AddWebsiteUsage(usage));
    }

    /// Wait until every write queued before this call has been applied.
    ///
    /// Returns false if the worker has already exited.
    pub async fn flush(&self) -> bool {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(StoreCommand::Flush(ack_tx)).await.is_err() {
            return false;
        }
        ack_rx.await.is_ok()
    }
}

impl SessionRecorder for StoreWriter {
    fn record_outcome(&self, outcome: SessionOutcome, elapsed_secs: u64) {
        self.enqueue(StoreCommand::RecordOutcome {
            outcome,
            elapsed_secs,
        });
    }

    fn append_history(&self, entry: SessionHistoryItem) {
        self.enqueue(StoreCommand::AppendHistory(entry));
    }
}

/// Spawn the store worker.
///
/// The worker runs until every [`StoreWriter`] clone has been dropped.
pub fn spawn_store_worker(store: Arc<dyn Store>, capacity: usize) -> (StoreWriter, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel(capacity.max(1));

    let handle = tokio::task::spawn_blocking(move || {
        debug!("Store worker started");
        while let Some(command) = rx.blocking_recv() {
            apply(store.as_ref(), command);
        }
        info!("Store worker stopped");
    });

    (StoreWriter { tx }, handle)
}

fn apply(store: &dyn Store, command: StoreCommand) {
    let name = command.name();
    let result = match command {
        StoreCommand::RecordOutcome {
            outcome,
            elapsed_secs,
        } => store.record_session(outcome, elapsed_secs),
        StoreCommand::AppendHistory(entry) => store.append_history(&entry),
        StoreCommand::AddWebsiteUsage(usage) => store.add_website_usage(&usage),
        StoreCommand::Flush(ack) => {
            let _ = ack.send(());
            Ok(())
        }
    };

    if let Err(e) = result {
        warn!(command = name, error = %e, "Store write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteStore;
    use chrono::Utc;

    #[tokio::test]
    async fn test_writes_are_applied_in_order() {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::in_memory().unwrap());
        let (writer, _handle) = spawn_store_worker(store.clone(), 8);

        writer.record_outcome(SessionOutcome::Success, 90);
        writer.append_history(SessionHistoryItem {
            ts: 1,
            minutes: 2,
            note: "code".into(),
            outcome: SessionOutcome::Success,
        });
        writer.append_history(SessionHistoryItem {
            ts: 2,
            minutes: 1,
            note: String::new(),
            outcome: SessionOutcome::Aborted,
        });

        assert!(writer.flush().await);

        let profile = store.get_profile().unwrap();
        assert_eq!(profile.total_sessions, 1);
        assert_eq!(profile.total_focus_seconds, 90);

        let history = store.get_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].ts, 1);
        assert_eq!(history[1].outcome, SessionOutcome::Aborted);
    }

    #[tokio::test]
    async fn test_website_usage_goes_through_queue() {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::in_memory().unwrap());
        let (writer, _handle) = spawn_store_worker(store.clone(), 4);

        let now = Utc::now();
        writer.add_website_usage(WebsiteUsage {
            user_id: "local".into(),
            url: "https://docs.rs/tokio".into(),
            domain: "docs.rs".into(),
            title: "tokio".into(),
            start_time: now,
            end_time: now,
            duration_secs: 30,
        });
        assert!(writer.flush().await);

        let summary = store.get_usage_for_day(now.date_naive()).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total_seconds, 30);
    }

    #[tokio::test]
    async fn test_worker_exits_when_writers_dropped() {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::in_memory().unwrap());
        let (writer, handle) = spawn_store_worker(store.clone(), 4);

        writer.record_outcome(SessionOutcome::Failed, 5);
        drop(writer);

        handle.await.unwrap();
        assert_eq!(store.get_profile().unwrap().failed_sessions, 1);
    }

    #[tokio::test]
    async fn test_closed_queue_drops_silently() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let writer = StoreWriter { tx };

        writer.record_outcome(SessionOutcome::Success, 1);
        assert!(!writer.flush().await);
    }
}
