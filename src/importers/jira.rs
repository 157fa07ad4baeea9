//! JIRA worklog payloads.
//!
//! Shapes match the JSON returned by `GET /rest/api/2/issue/{key}/worklog`.
//! Only deserialization lives here; fetching pages is left to the caller.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// JIRA timestamps carry a `+hhmm` offset without a colon.
const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogPage {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub worklogs: Vec<WorkLogItem>,
}

impl WorkLogPage {
    /// Sum of `timeSpentSeconds` over the items on this page.
    pub fn total_time_spent(&self) -> u64 {
        self.worklogs.iter().map(|w| w.time_spent_seconds).sum()
    }

    /// An empty page never has a successor, whatever `total` claims.
    pub fn has_more_pages(&self) -> bool {
        !self.worklogs.is_empty() && self.next_start_at() < self.total
    }

    /// Offset of the page after this one.
    pub fn next_start_at(&self) -> u32 {
        let fetched = u32::try_from(self.worklogs.len()).unwrap_or(u32::MAX);
        self.start_at.saturating_add(fetched)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogItem {
    pub id: String,
    #[serde(default)]
    pub author: Option<WorkLogAuthor>,
    pub started: String,
    #[serde(default)]
    pub time_spent_seconds: u64,
    #[serde(default)]
    pub comment: Option<String>,
}

impl WorkLogItem {
    pub fn started_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.started, JIRA_TIMESTAMP_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(&self.started))
            .ok()
    }

    pub fn hours_spent(&self) -> f64 {
        self.time_spent_seconds as f64 / 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const PAGE: &str = r#"{
        "startAt": 0,
        "maxResults": 2,
        "total": 3,
        "worklogs": [
            {
                "id": "10000",
                "author": { "name": "jsmith", "displayName": "John Smith" },
                "started": "2013-08-01T10:30:00.000+0200",
                "timeSpentSeconds": 5400,
                "comment": "Reviewing the schema"
            },
            {
                "id": "10001",
                "started": "2013-08-02T09:00:00.000+0000",
                "timeSpentSeconds": 1800
            }
        ]
    }"#;

    #[test]
    fn test_parse_page() {
        let page: WorkLogPage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.worklogs.len(), 2);
        assert_eq!(page.total_time_spent(), 7200);
        assert!(page.has_more_pages());
        assert_eq!(page.next_start_at(), 2);

        let first = &page.worklogs[0];
        assert_eq!(first.author.as_ref().map(|a| a.name.as_str()), Some("jsmith"));
        assert!((first.hours_spent() - 1.5).abs() < f64::EPSILON);
        assert!(page.worklogs[1].comment.is_none());
    }

    #[test]
    fn test_started_at_parses_jira_offset() {
        let page: WorkLogPage = serde_json::from_str(PAGE).unwrap();
        let started = page.worklogs[0].started_at().unwrap();
        assert_eq!(started.day(), 1);
        assert_eq!(started.hour(), 10);
        assert_eq!(started.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_last_page() {
        let page = WorkLogPage {
            start_at: 2,
            max_results: 2,
            total: 3,
            worklogs: vec![WorkLogItem {
                id: "10002".to_string(),
                author: None,
                started: "bogus".to_string(),
                time_spent_seconds: 60,
                comment: None,
            }],
        };
        assert!(!page.has_more_pages());
        assert!(page.worklogs[0].started_at().is_none());
    }

    #[test]
    fn test_empty_page_ends_paging() {
        let page = WorkLogPage {
            start_at: 20,
            max_results: 20,
            total: 57,
            worklogs: vec![],
        };
        assert_eq!(page.next_start_at(), 20);
        assert!(!page.has_more_pages());
    }
}
