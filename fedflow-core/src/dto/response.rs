//! Flow-client response envelope and validated results

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::job::JobStatusView;

/// The JSON document every flow-client function prints to stdout.
///
/// All fields are optional at the wire level; validation of which fields a
/// given function must carry happens in the client façade. Unknown fields
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowResponse {
    pub retcode: Option<i64>,
    pub retmsg: Option<String>,
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
    pub data: Option<Value>,
    /// Directory the orchestrator wrote output data into. Only present on
    /// output-data retrieval.
    pub directory: Option<PathBuf>,
}

impl FlowResponse {
    /// Whether the tool reported success.
    pub fn is_ok(&self) -> bool {
        self.retcode == Some(0)
    }

    /// The data payload as a list, when it is one.
    pub fn data_list(&self) -> Option<&Vec<Value>> {
        self.data.as_ref().and_then(Value::as_array)
    }
}

/// An accepted submission: the orchestrator's job handle plus whatever data
/// payload it returned alongside (board URL, upload counters, ...).
#[derive(Debug, Clone)]
pub struct Submission {
    pub job_id: String,
    pub data: Option<Value>,
}

/// Result of a job status query.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub retcode: i64,
    pub retmsg: String,
    pub view: JobStatusView,
}

/// Result of a task status query.
///
/// A component's task may fan out across machines, so the full record
/// collection is returned rather than a single row.
#[derive(Debug, Clone)]
pub struct TaskQuery {
    pub retcode: i64,
    pub retmsg: String,
    pub tasks: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_submit_response() {
        let raw = r#"{"retcode":0,"retmsg":"success","jobId":"202608061530123456789","data":{"board_url":"http://localhost:8080/index.html#/dashboard?job_id=202608061530123456789"}}"#;
        let response: FlowResponse = serde_json::from_str(raw).unwrap();

        assert!(response.is_ok());
        assert_eq!(response.job_id.as_deref(), Some("202608061530123456789"));
        assert!(response.data.is_some());
    }

    #[test]
    fn test_is_ok_requires_zero_retcode() {
        let response: FlowResponse = serde_json::from_str(r#"{"retcode":100}"#).unwrap();
        assert!(!response.is_ok());

        let response: FlowResponse = serde_json::from_str(r#"{"retmsg":"no code"}"#).unwrap();
        assert!(!response.is_ok());
    }

    #[test]
    fn test_data_list_extraction() {
        let response: FlowResponse =
            serde_json::from_str(r#"{"retcode":0,"data":[{"f_status":"running"}]}"#).unwrap();
        assert_eq!(response.data_list().map(Vec::len), Some(1));

        let response: FlowResponse =
            serde_json::from_str(r#"{"retcode":0,"data":{"k":"v"}}"#).unwrap();
        assert!(response.data_list().is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw = r#"{"retcode":0,"jobId":"1","meta":{"version":"1.5"}}"#;
        let response: FlowResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.job_id.as_deref(), Some("1"));
    }
}
