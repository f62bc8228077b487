//! SQLite-based store implementation

use chrono::NaiveDate;
use focus_api::{ProfileStats, SessionHistoryItem, SessionOutcome, UsageSummary};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{Store, StoreError, StoreResult, WebsiteUsage};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Aggregate statistics (single row)
            CREATE TABLE IF NOT EXISTS profile (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                total_focus_seconds INTEGER NOT NULL DEFAULT 0,
                total_sessions INTEGER NOT NULL DEFAULT 0,
                successful_sessions INTEGER NOT NULL DEFAULT 0,
                failed_sessions INTEGER NOT NULL DEFAULT 0,
                canceled_sessions INTEGER NOT NULL DEFAULT 0
            );

            -- Session history (append-only)
            CREATE TABLE IF NOT EXISTS session_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ts INTEGER NOT NULL,
                minutes INTEGER NOT NULL,
                note TEXT NOT NULL,
                outcome TEXT NOT NULL
            );

            -- Website usage slices
            CREATE TABLE IF NOT EXISTS website_usage (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                url TEXT NOT NULL,
                domain TEXT NOT NULL,
                title TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                day TEXT NOT NULL,
                duration_secs INTEGER NOT NULL
            );

            -- Indexes
            CREATE INDEX IF NOT EXISTS idx_usage_day ON website_usage(day);
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }
}

impl Store for SqliteStore {
    fn record_session(&self, outcome: SessionOutcome, elapsed_secs: u64) -> StoreResult<()> {
        let conn = self.conn()?;

        let (successful, failed, canceled) = match outcome {
            SessionOutcome::Success => (1, 0, 0),
            SessionOutcome::Failed => (0, 1, 0),
            SessionOutcome::Aborted => (0, 0, 1),
        };

        conn.execute(
            r#"
            INSERT INTO profile (id, total_focus_seconds, total_sessions,
                                 successful_sessions, failed_sessions, canceled_sessions)
            VALUES (1, ?, 1, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                total_focus_seconds = total_focus_seconds + excluded.total_focus_seconds,
                total_sessions = total_sessions + 1,
                successful_sessions = successful_sessions + excluded.successful_sessions,
                failed_sessions = failed_sessions + excluded.failed_sessions,
                canceled_sessions = canceled_sessions + excluded.canceled_sessions
            "#,
            params![elapsed_secs as i64, successful, failed, canceled],
        )?;

        debug!(outcome = %outcome, elapsed_secs, "Session recorded");
        Ok(())
    }

    fn get_profile(&self) -> StoreResult<ProfileStats> {
        let conn = self.conn()?;

        let stats = conn
            .query_row(
                r#"
                SELECT total_focus_seconds, total_sessions, successful_sessions,
                       failed_sessions, canceled_sessions
                FROM profile WHERE id = 1
                "#,
                [],
                |row| {
                    Ok(ProfileStats {
                        total_focus_seconds: row.get::<_, i64>(0)?.max(0) as u64,
                        total_sessions: row.get::<_, i64>(1)?.max(0) as u64,
                        successful_sessions: row.get::<_, i64>(2)?.max(0) as u64,
                        failed_sessions: row.get::<_, i64>(3)?.max(0) as u64,
                        canceled_sessions: row.get::<_, i64>(4)?.max(0) as u64,
                    })
                },
            )
            .optional()?;

        Ok(stats.unwrap_or_default())
    }

    fn append_history(&self, entry: &SessionHistoryItem) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO session_history (ts, minutes, note, outcome) VALUES (?, ?, ?, ?)",
            params![
                entry.ts,
                entry.minutes as i64,
                entry.note,
                entry.outcome.as_str()
            ],
        )?;

        debug!(history_id = conn.last_insert_rowid(), "History entry appended");
        Ok(())
    }

    fn get_history(&self) -> StoreResult<Vec<SessionHistoryItem>> {
        let conn = self.conn()?;

        let mut stmt =
            conn.prepare("SELECT ts, minutes, note, outcome FROM session_history ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let ts: i64 = row.get(0)?;
            let minutes: i64 = row.get(1)?;
            let note: String = row.get(2)?;
            let outcome: String = row.get(3)?;
            Ok((ts, minutes, note, outcome))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (ts, minutes, note, outcome_str) = row?;
            let Some(outcome) = SessionOutcome::parse(&outcome_str) else {
                warn!(outcome = %outcome_str, "Skipping history row with unknown outcome");
                continue;
            };

            entries.push(SessionHistoryItem {
                ts,
                minutes: minutes.max(0) as u64,
                note,
                outcome,
            });
        }

        Ok(entries)
    }

    fn add_website_usage(&self, usage: &WebsiteUsage) -> StoreResult<()> {
        let conn = self.conn()?;
        let day_str = usage.day().format(DAY_FORMAT).to_string();

        conn.execute(
            r#"
            INSERT INTO website_usage
                (user_id, url, domain, title, start_time, end_time, day, duration_secs)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                usage.user_id,
                usage.url,
                usage.domain,
                usage.title,
                usage.start_time.to_rfc3339(),
                usage.end_time.to_rfc3339(),
                day_str,
                usage.duration_secs
            ],
        )?;

        debug!(domain = %usage.domain, day = %day_str, secs = usage.duration_secs, "Website usage added");
        Ok(())
    }

    fn get_usage_for_day(&self, day: NaiveDate) -> StoreResult<Vec<UsageSummary>> {
        let conn = self.conn()?;
        let day_str = day.format(DAY_FORMAT).to_string();

        let mut stmt = conn.prepare(
            r#"
            SELECT domain, SUM(duration_secs) AS total
            FROM website_usage
            WHERE day = ?
            GROUP BY domain
            ORDER BY total DESC, domain ASC
            "#,
        )?;

        let rows = stmt.query_map([day_str], |row| {
            Ok(UsageSummary {
                domain: row.get(0)?,
                total_seconds: row.get(1)?,
            })
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }

        Ok(summaries)
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn usage(domain: &str, secs: i64, day: u32) -> WebsiteUsage {
        let start = Utc.with_ymd_and_hms(2025, 11, day, 10, 0, 0).unwrap();
        WebsiteUsage {
            user_id: "local".into(),
            url: format!("https://{}/", domain),
            domain: domain.into(),
            title: String::new(),
            start_time: start,
            end_time: start + chrono::Duration::seconds(secs),
            duration_secs: secs,
        }
    }

    #[test]
    fn test_in_memory_store() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.is_healthy());
    }

    #[test]
    fn test_profile_starts_empty() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.get_profile().unwrap(), ProfileStats::default());
    }

    #[test]
    fn test_record_session() {
        let store = SqliteStore::in_memory().unwrap();

        store.record_session(SessionOutcome::Success, 1500).unwrap();
        store.record_session(SessionOutcome::Failed, 42).unwrap();
        store.record_session(SessionOutcome::Aborted, 7).unwrap();
        store.record_session(SessionOutcome::Success, 600).unwrap();

        let profile = store.get_profile().unwrap();
        assert_eq!(profile.total_sessions, 4);
        assert_eq!(profile.total_focus_seconds, 2149);
        assert_eq!(profile.successful_sessions, 2);
        assert_eq!(profile.failed_sessions, 1);
        assert_eq!(profile.canceled_sessions, 1);
    }

    #[test]
    fn test_history_keeps_insertion_order() {
        let store = SqliteStore::in_memory().unwrap();

        for (i, outcome) in [
            SessionOutcome::Failed,
            SessionOutcome::Success,
            SessionOutcome::Aborted,
        ]
        .into_iter()
        .enumerate()
        {
            store
                .append_history(&SessionHistoryItem {
                    ts: 1_700_000_000_000 + i as i64,
                    minutes: 1 + i as u64,
                    note: "code, firefox".into(),
                    outcome,
                })
                .unwrap();
        }

        let history = store.get_history().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].outcome, SessionOutcome::Failed);
        assert_eq!(history[2].outcome, SessionOutcome::Aborted);
        assert_eq!(history[1].minutes, 2);
        assert_eq!(history[1].note, "code, firefox");
    }

    #[test]
    fn test_usage_for_day() {
        let store = SqliteStore::in_memory().unwrap();

        store.add_website_usage(&usage("github.com", 120, 27)).unwrap();
        store.add_website_usage(&usage("youtube.com", 300, 27)).unwrap();
        store.add_website_usage(&usage("github.com", 240, 27)).unwrap();
        store.add_website_usage(&usage("youtube.com", 999, 26)).unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 11, 27).unwrap();
        let summary = store.get_usage_for_day(day).unwrap();
        assert_eq!(
            summary,
            vec![
                UsageSummary {
                    domain: "github.com".into(),
                    total_seconds: 360
                },
                UsageSummary {
                    domain: "youtube.com".into(),
                    total_seconds: 300
                },
            ]
        );

        let empty = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
        assert!(store.get_usage_for_day(empty).unwrap().is_empty());
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focusd.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.record_session(SessionOutcome::Success, 60).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get_profile().unwrap().total_sessions, 1);
    }
}
