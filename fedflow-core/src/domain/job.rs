//! Job domain types

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// Job execution status as reported by the orchestrator.
///
/// Transitions are owned entirely by the orchestrator; this client only
/// observes them. Status strings the client does not recognize are kept
/// verbatim in `Unknown` rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Waiting,
    Running,
    Success,
    Fail,
    Canceled,
    Timeout,
    Unknown(String),
}

impl JobStatus {
    /// Parses an orchestrator status string, case-insensitively.
    ///
    /// Both `fail` and `failed` map to [`JobStatus::Fail`]; orchestrator
    /// versions differ on which spelling they report.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "waiting" => Self::Waiting,
            "running" => Self::Running,
            "success" => Self::Success,
            "fail" | "failed" => Self::Fail,
            "canceled" | "cancelled" => Self::Canceled,
            "timeout" => Self::Timeout,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    /// Whether the orchestrator will never move the job out of this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::Fail | Self::Canceled | Self::Timeout
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Running => write!(f, "running"),
            Self::Success => write!(f, "success"),
            Self::Fail => write!(f, "fail"),
            Self::Canceled => write!(f, "canceled"),
            Self::Timeout => write!(f, "timeout"),
            Self::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}

/// One job's status record, extracted from the first element of a
/// query-job response's data list.
///
/// The orchestrator reports records with `f_`-prefixed columns; the fields
/// this client acts on are lifted out, and the full record is kept for
/// callers that need more.
#[derive(Debug, Clone)]
pub struct JobStatusView {
    pub status: JobStatus,
    /// Components currently executing, reported while the job is running.
    pub current_tasks: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub record: Value,
}

impl JobStatusView {
    /// Builds a view from a raw status record.
    ///
    /// Returns `None` when the record carries no `f_status` string, which
    /// callers treat as a protocol violation.
    pub fn from_record(record: Value) -> Option<Self> {
        let status = record.get("f_status").and_then(Value::as_str)?;
        let status = JobStatus::parse(status);

        let current_tasks = record.get("f_current_tasks").map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string(),
        });

        let start_time = timestamp_field(&record, "f_start_time");
        let end_time = timestamp_field(&record, "f_end_time");

        Some(Self {
            status,
            current_tasks,
            start_time,
            end_time,
            record,
        })
    }
}

/// Reads an epoch-milliseconds column from a status record.
fn timestamp_field(record: &Value, key: &str) -> Option<DateTime<Utc>> {
    let millis = record.get(key)?.as_i64()?;
    Utc.timestamp_millis_opt(millis).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!(JobStatus::parse("waiting"), JobStatus::Waiting);
        assert_eq!(JobStatus::parse("running"), JobStatus::Running);
        assert_eq!(JobStatus::parse("success"), JobStatus::Success);
        assert_eq!(JobStatus::parse("fail"), JobStatus::Fail);
        assert_eq!(JobStatus::parse("failed"), JobStatus::Fail);
        assert_eq!(JobStatus::parse("canceled"), JobStatus::Canceled);
        assert_eq!(JobStatus::parse("timeout"), JobStatus::Timeout);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(JobStatus::parse("SUCCESS"), JobStatus::Success);
        assert_eq!(JobStatus::parse("Running"), JobStatus::Running);
    }

    #[test]
    fn test_parse_unknown_keeps_raw_string() {
        let status = JobStatus::parse("partial");
        assert_eq!(status, JobStatus::Unknown("partial".to_string()));
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Success.is_terminal());
        assert!(JobStatus::Fail.is_terminal());
        assert!(JobStatus::Canceled.is_terminal());
        assert!(JobStatus::Timeout.is_terminal());
        assert!(!JobStatus::Waiting.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn test_view_from_record() {
        let record = json!({
            "f_status": "running",
            "f_current_tasks": "[\"hetero_lr_0\"]",
            "f_start_time": 1754000000000_i64,
        });

        let view = JobStatusView::from_record(record).unwrap();
        assert_eq!(view.status, JobStatus::Running);
        assert_eq!(view.current_tasks.as_deref(), Some("[\"hetero_lr_0\"]"));
        assert!(view.start_time.is_some());
        assert!(view.end_time.is_none());
    }

    #[test]
    fn test_view_requires_status_field() {
        assert!(JobStatusView::from_record(json!({"f_progress": 42})).is_none());
        assert!(JobStatusView::from_record(json!({"f_status": 7})).is_none());
    }
}
