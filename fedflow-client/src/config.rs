//! Client configuration
//!
//! All knobs the invoker needs are explicit here rather than ambient
//! process state, so tests can run with fast polling intervals and fake
//! flow-client scripts.

use std::path::PathBuf;
use std::time::Duration;

/// Flow client configuration
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Interpreter used to run the flow client (e.g. "python")
    pub interpreter: PathBuf,

    /// Path to the orchestrator's command-line client script
    pub client_path: PathBuf,

    /// Installation root against which relative dataset file paths are
    /// resolved before upload
    pub data_root: PathBuf,

    /// How long to wait between job status polls
    pub poll_interval: Duration,
}

impl FlowConfig {
    /// Creates a configuration with default interpreter and poll interval
    pub fn new(client_path: impl Into<PathBuf>, data_root: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: PathBuf::from("python"),
            client_path: client_path.into(),
            data_root: data_root.into(),
            poll_interval: Duration::from_secs(1),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - FEDFLOW_CLIENT_PATH (required)
    /// - FEDFLOW_DATA_ROOT (required)
    /// - FEDFLOW_INTERPRETER (optional, default: python)
    /// - FEDFLOW_POLL_INTERVAL_SECS (optional, default: 1)
    pub fn from_env() -> anyhow::Result<Self> {
        let client_path = std::env::var("FEDFLOW_CLIENT_PATH")
            .map_err(|_| anyhow::anyhow!("FEDFLOW_CLIENT_PATH environment variable not set"))?;

        let data_root = std::env::var("FEDFLOW_DATA_ROOT")
            .map_err(|_| anyhow::anyhow!("FEDFLOW_DATA_ROOT environment variable not set"))?;

        let interpreter = std::env::var("FEDFLOW_INTERPRETER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("python"));

        let poll_interval = std::env::var("FEDFLOW_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(1));

        Ok(Self {
            interpreter,
            client_path: PathBuf::from(client_path),
            data_root: PathBuf::from(data_root),
            poll_interval,
        })
    }

    /// Overrides the interpreter executable
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Overrides the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.interpreter.as_os_str().is_empty() {
            anyhow::bail!("interpreter cannot be empty");
        }

        if self.client_path.as_os_str().is_empty() {
            anyhow::bail!("client_path cannot be empty");
        }

        if self.data_root.as_os_str().is_empty() {
            anyhow::bail!("data_root cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}
