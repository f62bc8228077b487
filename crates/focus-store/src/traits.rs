//! Store trait definitions

use chrono::NaiveDate;
use focus_api::{ProfileStats, SessionHistoryItem, SessionOutcome, UsageSummary};

use crate::{StoreResult, WebsiteUsage};

/// Main store trait
pub trait Store: Send + Sync {
    // Focus statistics

    /// Fold a finished session into the aggregate statistics
    fn record_session(&self, outcome: SessionOutcome, elapsed_secs: u64) -> StoreResult<()>;

    /// Current aggregate statistics (all zero before the first session)
    fn get_profile(&self) -> StoreResult<ProfileStats>;

    // History

    /// Append a history entry
    fn append_history(&self, entry: &SessionHistoryItem) -> StoreResult<()>;

    /// All history entries in insertion order
    fn get_history(&self) -> StoreResult<Vec<SessionHistoryItem>>;

    // Website usage

    /// Append one website usage slice
    fn add_website_usage(&self, usage: &WebsiteUsage) -> StoreResult<()>;

    /// Per-domain totals for slices starting on `day` (UTC), largest first
    fn get_usage_for_day(&self, day: NaiveDate) -> StoreResult<Vec<UsageSummary>>;

    // Health

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
