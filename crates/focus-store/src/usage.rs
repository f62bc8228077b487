//! Website usage records

use chrono::{DateTime, NaiveDate, Utc};
use focus_api::UsageReport;
use serde::{Deserialize, Serialize};

/// One persisted website usage slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteUsage {
    pub user_id: String,
    pub url: String,
    pub domain: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_secs: i64,
}

impl WebsiteUsage {
    /// Build a record from an extension report.
    ///
    /// `domain` is the value to store (callers pass the normalized host when
    /// the report left it empty). Missing timestamps fall back to `received_at`.
    pub fn from_report(report: &UsageReport, domain: String, received_at: DateTime<Utc>) -> Self {
        let start_time = report.start_time.unwrap_or(received_at);
        let end_time = report.end_time.unwrap_or(received_at);

        Self {
            user_id: report.user_id_or_default().to_string(),
            url: report.url.clone(),
            domain,
            title: report.title.clone(),
            start_time,
            end_time,
            duration_secs: report.duration,
        }
    }

    /// UTC day the slice is accounted to
    pub fn day(&self) -> NaiveDate {
        self.start_time.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_report_defaults() {
        let received = Utc.with_ymd_and_hms(2025, 11, 27, 23, 59, 0).unwrap();
        let report = UsageReport {
            url: "https://news.ycombinator.com/".into(),
            duration: 42,
            ..Default::default()
        };

        let usage = WebsiteUsage::from_report(&report, "news.ycombinator.com".into(), received);
        assert_eq!(usage.user_id, "local");
        assert_eq!(usage.start_time, received);
        assert_eq!(usage.day(), NaiveDate::from_ymd_opt(2025, 11, 27).unwrap());
        assert_eq!(usage.duration_secs, 42);
    }
}
