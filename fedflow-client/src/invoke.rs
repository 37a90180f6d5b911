//! Flow-client subprocess invocation
//!
//! Every operation of the client maps to one child process: the configured
//! interpreter runs the flow-client script with `-f <function>` plus
//! function-specific flags, and the JSON document on stdout is the tool's
//! response. Arguments are always passed as a vector, never through a
//! shell.

use std::ffi::{OsStr, OsString};

use tokio::process::Command;
use tracing::debug;

use crate::FlowClient;
use crate::error::{ClientError, Result};

/// Function selectors understood by the flow client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlowFunction {
    SubmitJob,
    Upload,
    QueryJob,
    QueryTask,
    ComponentOutputData,
    ComponentOutputModel,
    ComponentMetricAll,
}

impl FlowFunction {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::SubmitJob => "submit_job",
            Self::Upload => "upload",
            Self::QueryJob => "query_job",
            Self::QueryTask => "query_task",
            Self::ComponentOutputData => "component_output_data",
            Self::ComponentOutputModel => "component_output_model",
            Self::ComponentMetricAll => "component_metric_all",
        }
    }
}

/// One assembled flow-client call: a function selector plus its flags
#[derive(Debug)]
pub(crate) struct ToolInvocation {
    function: FlowFunction,
    args: Vec<OsString>,
}

impl ToolInvocation {
    pub(crate) fn new(function: FlowFunction) -> Self {
        Self {
            function,
            args: Vec::new(),
        }
    }

    /// Appends a flag/value pair (e.g. `-j <job_id>`)
    pub(crate) fn arg(mut self, flag: &str, value: impl AsRef<OsStr>) -> Self {
        self.args.push(OsString::from(flag));
        self.args.push(value.as_ref().to_os_string());
        self
    }

    pub(crate) fn function(&self) -> FlowFunction {
        self.function
    }
}

impl FlowClient {
    /// Runs one flow-client invocation and returns its stdout.
    ///
    /// Stderr is captured separately and logged; when the tool prints
    /// nothing on stdout, stderr stands in so the caller's error carries
    /// whatever diagnostics the tool emitted.
    pub(crate) async fn invoke(&self, invocation: ToolInvocation) -> Result<String> {
        let function = invocation.function().name();

        debug!(
            "Invoking flow client: {} {} -f {} {:?}",
            self.config().interpreter.display(),
            self.config().client_path.display(),
            function,
            invocation.args
        );

        let output = Command::new(&self.config().interpreter)
            .arg(&self.config().client_path)
            .arg("-f")
            .arg(function)
            .args(&invocation.args)
            .output()
            .await
            .map_err(ClientError::Launch)?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !stdout.trim().is_empty() {
            debug!("flow client stdout: {}", stdout.trim());
        }
        if !stderr.trim().is_empty() {
            debug!("flow client stderr: {}", stderr.trim());
        }

        if stdout.trim().is_empty() && !stderr.trim().is_empty() {
            return Ok(stderr.into_owned());
        }

        Ok(stdout)
    }
}
