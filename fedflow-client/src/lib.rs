//! Fedflow Client
//!
//! A typed façade over a federated-learning orchestrator's command-line
//! client.
//!
//! The orchestrator is driven exclusively through its flow-client script:
//! job documents are staged as JSON files in scoped temporary directories,
//! the script runs as a child process, and the JSON document it prints to
//! stdout is validated into typed results. This crate gives pipeline code
//! one consistent interface for submitting jobs, watching them settle, and
//! pulling output artifacts afterwards.
//!
//! # Example
//!
//! ```no_run
//! use fedflow_client::{FlowClient, FlowConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FlowConfig::new("flow/flow_client.py", "/data/projects/fedflow");
//!     let client = FlowClient::new(config);
//!
//!     let submission = client
//!         .submit(None, &json!({"initiator": {"role": "guest", "party_id": 9999}}))
//!         .await?;
//!
//!     let status = client.monitor(&submission.job_id, "guest", 9999).await?;
//!     println!("job {} finished: {}", submission.job_id, status);
//!     Ok(())
//! }
//! ```

pub mod error;

mod artifacts;
mod config;
mod data;
mod invoke;
mod jobs;
mod poll;
#[cfg(test)]
mod testutil;

pub use artifacts::Artifact;
pub use config::FlowConfig;
pub use data::DropMode;
pub use error::{ClientError, Result};
pub use poll::{MonitorOptions, StatusSource, monitor_with};

// Re-export commonly used types
pub use fedflow_core::domain::job::{JobStatus, JobStatusView};
pub use fedflow_core::dto::response::{FlowResponse, JobQuery, Submission, TaskQuery};

/// Typed client for the orchestrator's command-line surface
///
/// The client holds no state beyond its configuration: every operation
/// spawns exactly one child process (or, for monitoring, a sequence of
/// them) and owns its temporary files only for the duration of the call.
/// Overlapping calls are independent.
#[derive(Debug, Clone)]
pub struct FlowClient {
    config: FlowConfig,
}

impl FlowClient {
    /// Create a new flow client
    ///
    /// # Arguments
    /// * `config` - Interpreter, client script path, data root, and poll
    ///   interval
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FlowClient::new(FlowConfig::new("flow_client.py", "/data"));
        assert_eq!(
            client.config().client_path,
            std::path::PathBuf::from("flow_client.py")
        );
    }
}
