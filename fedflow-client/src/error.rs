//! Error types for the fedflow client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when driving the flow client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The flow-client process could not be launched at all
    #[error("failed to launch flow client: {0}")]
    Launch(#[source] std::io::Error),

    /// Job submission or data upload was rejected or answered with an
    /// unusable response
    #[error("job submission failed: {reason} (response: {raw})")]
    Submission {
        /// What made the response unusable
        reason: String,
        /// The raw tool output, for diagnosis
        raw: String,
    },

    /// A job or task status query answered with an unusable response
    #[error("status query failed: {reason} (response: {raw})")]
    Query {
        /// What made the response unusable
        reason: String,
        /// The raw tool output, for diagnosis
        raw: String,
    },

    /// Output-data retrieval could not locate or read the row file
    #[error("output data retrieval failed: {reason}")]
    OutputData {
        /// What went wrong
        reason: String,
    },

    /// A job document handed to the client is not usable
    #[error("invalid job document: {0}")]
    InvalidConfig(String),

    /// The monitor loop hit its poll budget before the job settled
    #[error("job did not reach a terminal status within {polls} poll(s)")]
    MonitorExhausted {
        /// Number of polls issued
        polls: u32,
    },

    /// Failed to serialize a job document
    #[error("failed to serialize job document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem failure while staging job documents
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create a submission error from a reason and the offending output
    pub fn submission(reason: impl Into<String>, raw: &str) -> Self {
        Self::Submission {
            reason: reason.into(),
            raw: raw.trim().to_string(),
        }
    }

    /// Create a query error from a reason and the offending output
    pub fn query(reason: impl Into<String>, raw: &str) -> Self {
        Self::Query {
            reason: reason.into(),
            raw: raw.trim().to_string(),
        }
    }

    /// Check if this error means the monitor loop ran out of polls
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::MonitorExhausted { .. })
    }
}
