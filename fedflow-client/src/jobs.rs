//! Job submission and status queries

use serde_json::Value;

use fedflow_core::domain::job::JobStatusView;
use fedflow_core::dto::response::{FlowResponse, JobQuery, Submission, TaskQuery};

use crate::FlowClient;
use crate::error::{ClientError, Result};
use crate::invoke::{FlowFunction, ToolInvocation};

impl FlowClient {
    /// Submit a job to the orchestrator
    ///
    /// The runtime configuration (required) and DAG description (optional)
    /// are staged as JSON files in a scoped temporary directory that is
    /// removed when the call returns, on every exit path.
    ///
    /// # Arguments
    /// * `dag` - Optional DAG description of the pipeline's components
    /// * `runtime_conf` - Per-role, per-party execution parameters
    ///
    /// # Returns
    /// The orchestrator's job id and data payload
    pub async fn submit(&self, dag: Option<&Value>, runtime_conf: &Value) -> Result<Submission> {
        let job_dir = tempfile::tempdir()?;

        let conf_path = job_dir.path().join("job_runtime_conf.json");
        std::fs::write(&conf_path, serde_json::to_vec(runtime_conf)?)?;

        let mut invocation = ToolInvocation::new(FlowFunction::SubmitJob).arg("-c", &conf_path);

        if let Some(dag) = dag {
            let dag_path = job_dir.path().join("job_dag.json");
            std::fs::write(&dag_path, serde_json::to_vec(dag)?)?;
            invocation = invocation.arg("-d", &dag_path);
        }

        let raw = self.invoke(invocation).await?;

        validate_submission(&raw)
    }

    /// Query a job's status
    ///
    /// # Arguments
    /// * `job_id` - The orchestrator's job handle
    /// * `role` - Role to scope the query to (guest, host, arbiter)
    /// * `party_id` - Party to scope the query to
    ///
    /// # Returns
    /// The tool's return code and message plus the job's status view,
    /// taken from the first record of the response's data list
    pub async fn query_job(&self, job_id: &str, role: &str, party_id: u32) -> Result<JobQuery> {
        let raw = self
            .invoke(
                ToolInvocation::new(FlowFunction::QueryJob)
                    .arg("-j", job_id)
                    .arg("-r", role)
                    .arg("-p", party_id.to_string()),
            )
            .await?;

        let response: FlowResponse = serde_json::from_str(&raw)
            .map_err(|e| ClientError::query(format!("response is not valid JSON: {e}"), &raw))?;

        let Some(retcode) = response.retcode else {
            return Err(ClientError::query("response carries no retcode", &raw));
        };
        let retmsg = response.retmsg.clone().unwrap_or_default();

        let record = response
            .data_list()
            .and_then(|records| records.first())
            .cloned()
            .ok_or_else(|| ClientError::query("response carries no status records", &raw))?;

        let view = JobStatusView::from_record(record)
            .ok_or_else(|| ClientError::query("status record carries no f_status", &raw))?;

        Ok(JobQuery {
            retcode,
            retmsg,
            view,
        })
    }

    /// Query the status of one component's task
    ///
    /// Same validation contract as [`FlowClient::query_job`], but the full
    /// record collection comes back: a task may fan out across machines.
    pub async fn query_task(
        &self,
        job_id: &str,
        component: &str,
        role: &str,
        party_id: u32,
    ) -> Result<TaskQuery> {
        let raw = self
            .invoke(
                ToolInvocation::new(FlowFunction::QueryTask)
                    .arg("-j", job_id)
                    .arg("-cpn", component)
                    .arg("-r", role)
                    .arg("-p", party_id.to_string()),
            )
            .await?;

        let response: FlowResponse = serde_json::from_str(&raw)
            .map_err(|e| ClientError::query(format!("response is not valid JSON: {e}"), &raw))?;

        let Some(retcode) = response.retcode else {
            return Err(ClientError::query("response carries no retcode", &raw));
        };
        let retmsg = response.retmsg.clone().unwrap_or_default();

        let tasks = response
            .data_list()
            .cloned()
            .filter(|tasks| !tasks.is_empty())
            .ok_or_else(|| ClientError::query("response carries no task records", &raw))?;

        Ok(TaskQuery {
            retcode,
            retmsg,
            tasks,
        })
    }
}

/// Validates a submit/upload response into an accepted submission.
///
/// Invalid JSON, a missing or non-zero retcode, and a missing jobId are
/// all submission failures; they always propagate to the caller.
pub(crate) fn validate_submission(raw: &str) -> Result<Submission> {
    let response: FlowResponse = serde_json::from_str(raw)
        .map_err(|e| ClientError::submission(format!("response is not valid JSON: {e}"), raw))?;

    if !response.is_ok() {
        let reason = match response.retcode {
            Some(code) => format!(
                "flow client returned retcode {code}: {}",
                response.retmsg.as_deref().unwrap_or("no message")
            ),
            None => "response carries no retcode".to_string(),
        };
        return Err(ClientError::submission(reason, raw));
    }

    let Some(job_id) = response.job_id else {
        return Err(ClientError::submission("response carries no jobId", raw));
    };

    Ok(Submission {
        job_id,
        data: response.data,
    })
}
