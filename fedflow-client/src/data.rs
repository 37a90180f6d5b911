//! Dataset upload and output-data retrieval

use serde_json::Value;
use tracing::debug;

use fedflow_core::dto::response::{FlowResponse, Submission};

use crate::FlowClient;
use crate::error::{ClientError, Result};
use crate::invoke::{FlowFunction, ToolInvocation};
use crate::jobs::validate_submission;

/// What the orchestrator should do when the destination table already
/// holds data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropMode {
    /// Keep the existing table
    #[default]
    Keep,
    /// Overwrite the existing table
    Overwrite,
}

impl DropMode {
    fn flag(self) -> &'static str {
        match self {
            Self::Keep => "0",
            Self::Overwrite => "1",
        }
    }
}

impl FlowClient {
    /// Upload a dataset described by `dataset_conf`
    ///
    /// A relative `file` path in the config is resolved against the
    /// configured data root before the config is handed to the tool;
    /// absolute paths pass through unchanged. Same response contract as
    /// [`FlowClient::submit`].
    ///
    /// # Arguments
    /// * `dataset_conf` - Upload configuration carrying at least a `file`
    ///   field
    /// * `drop` - Whether an existing destination table is kept or
    ///   overwritten
    pub async fn upload(&self, dataset_conf: &Value, drop: DropMode) -> Result<Submission> {
        let conf = self.resolve_dataset_file(dataset_conf.clone())?;

        let job_dir = tempfile::tempdir()?;
        let conf_path = job_dir.path().join("upload_conf.json");
        std::fs::write(&conf_path, serde_json::to_vec(&conf)?)?;

        let raw = self
            .invoke(
                ToolInvocation::new(FlowFunction::Upload)
                    .arg("-c", &conf_path)
                    .arg("-drop", drop.flag()),
            )
            .await?;

        validate_submission(&raw)
    }

    /// Rewrites the config's `file` field to an absolute path.
    ///
    /// `Path::join` replaces the base entirely when `file` is already
    /// absolute, which is exactly the pass-through behavior wanted here.
    fn resolve_dataset_file(&self, mut conf: Value) -> Result<Value> {
        let file = conf
            .get("file")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ClientError::InvalidConfig("dataset config carries no 'file' field".to_string())
            })?;

        let resolved = self.config().data_root.join(file);
        conf["file"] = Value::String(resolved.to_string_lossy().into_owned());

        Ok(conf)
    }

    /// Fetch a component's output rows
    ///
    /// The orchestrator writes an `output_data.csv` into a directory of
    /// its choosing and reports that directory back in the response; the
    /// file is read whole, one row per line. Calling again re-invokes the
    /// orchestrator.
    ///
    /// # Arguments
    /// * `limit` - Truncate the returned rows to at most this many
    pub async fn output_data(
        &self,
        job_id: &str,
        component: &str,
        role: &str,
        party_id: u32,
        limit: Option<usize>,
    ) -> Result<Vec<String>> {
        let out_dir = tempfile::tempdir()?;

        let raw = self
            .invoke(
                ToolInvocation::new(FlowFunction::ComponentOutputData)
                    .arg("-j", job_id)
                    .arg("-cpn", component)
                    .arg("-r", role)
                    .arg("-p", party_id.to_string())
                    .arg("-o", out_dir.path()),
            )
            .await?;

        let response: FlowResponse =
            serde_json::from_str(&raw).map_err(|e| ClientError::OutputData {
                reason: format!("response is not valid JSON: {e} (response: {})", raw.trim()),
            })?;

        let directory = response.directory.ok_or_else(|| ClientError::OutputData {
            reason: match response.retmsg {
                Some(msg) => format!("response carries no output directory: {msg}"),
                None => "response carries no output directory".to_string(),
            },
        })?;

        let rows_path = directory.join("output_data.csv");
        let content =
            tokio::fs::read_to_string(&rows_path)
                .await
                .map_err(|e| ClientError::OutputData {
                    reason: format!("cannot read {}: {e}", rows_path.display()),
                })?;

        let mut rows: Vec<String> = content.lines().map(|line| line.trim().to_string()).collect();
        if let Some(limit) = limit {
            rows.truncate(limit);
        }

        debug!(
            "job {} component {} returned {} output row(s)",
            job_id,
            component,
            rows.len()
        );

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{json_tool, recorded_args, recorded_conf, recording_tool};
    use crate::{FlowClient, FlowConfig};
    use serde_json::json;

    const UPLOAD_OK: &str =
        r#"{"retcode":0,"retmsg":"success","jobId":"202608061530987654321","data":{"table_name":"train"}}"#;

    #[tokio::test]
    async fn test_upload_resolves_relative_file_against_data_root() {
        let (dir, client) = recording_tool(UPLOAD_OK);
        let data_root = client.config().data_root.clone();

        client
            .upload(&json!({"file": "data/train.csv", "head": 1}), DropMode::Keep)
            .await
            .unwrap();

        let conf = recorded_conf(&dir);
        assert_eq!(
            conf["file"].as_str().unwrap(),
            data_root.join("data/train.csv").to_string_lossy()
        );
        assert_eq!(conf["head"], 1);
    }

    #[tokio::test]
    async fn test_upload_passes_absolute_file_through() {
        let (dir, client) = recording_tool(UPLOAD_OK);

        client
            .upload(&json!({"file": "/abs/path/train.csv"}), DropMode::Keep)
            .await
            .unwrap();

        let conf = recorded_conf(&dir);
        assert_eq!(conf["file"].as_str().unwrap(), "/abs/path/train.csv");
    }

    #[tokio::test]
    async fn test_upload_rejects_config_without_file_field() {
        let (_dir, client) = json_tool(UPLOAD_OK);

        let err = client.upload(&json!({"head": 1}), DropMode::Keep).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_upload_sends_drop_flag() {
        let (dir, client) = recording_tool(UPLOAD_OK);

        client
            .upload(&json!({"file": "a.csv"}), DropMode::Overwrite)
            .await
            .unwrap();

        let args = recorded_args(&dir);
        assert_eq!(args[1], "upload");
        let at = args.iter().position(|a| a == "-drop").unwrap();
        assert_eq!(args[at + 1], "1");
    }

    #[tokio::test]
    async fn test_upload_temp_config_removed_after_call() {
        let (dir, client) = recording_tool(UPLOAD_OK);

        client.upload(&json!({"file": "a.csv"}), DropMode::Keep).await.unwrap();

        let args = recorded_args(&dir);
        let at = args.iter().position(|a| a == "-c").unwrap();
        assert!(!std::path::Path::new(&args[at + 1]).exists());
    }

    #[tokio::test]
    async fn test_upload_validates_like_submit() {
        let (_dir, client) = json_tool(r#"{"retcode":42,"retmsg":"table exists"}"#);

        let err = client.upload(&json!({"file": "a.csv"}), DropMode::Keep).await.unwrap_err();
        assert!(matches!(err, ClientError::Submission { .. }));
    }

    #[tokio::test]
    async fn test_output_data_reads_reported_row_file() {
        let rows_dir = tempfile::tempdir().unwrap();
        std::fs::write(rows_dir.path().join("output_data.csv"), "id,score\n1,0.83\n2,0.14\n")
            .unwrap();

        let response = format!(
            r#"{{"retcode":0,"directory":"{}"}}"#,
            rows_dir.path().display()
        );
        let (_dir, client) = json_tool(&response);

        let rows = client
            .output_data("1", "hetero_lr_0", "guest", 9999, None)
            .await
            .unwrap();

        assert_eq!(rows, vec!["id,score", "1,0.83", "2,0.14"]);
    }

    #[tokio::test]
    async fn test_output_data_applies_limit() {
        let rows_dir = tempfile::tempdir().unwrap();
        std::fs::write(rows_dir.path().join("output_data.csv"), "a\nb\nc\n").unwrap();

        let response = format!(
            r#"{{"retcode":0,"directory":"{}"}}"#,
            rows_dir.path().display()
        );
        let (_dir, client) = json_tool(&response);

        let rows = client
            .output_data("1", "hetero_lr_0", "guest", 9999, Some(2))
            .await
            .unwrap();

        assert_eq!(rows, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_output_data_rejects_missing_directory() {
        let (_dir, client) = json_tool(r#"{"retcode":100,"retmsg":"no such component"}"#);

        let err = client
            .output_data("1", "hetero_lr_0", "guest", 9999, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::OutputData { .. }));
    }

    #[tokio::test]
    async fn test_output_data_rejects_non_json_output() {
        let (_dir, client) = json_tool("no such job");

        let err = client
            .output_data("1", "hetero_lr_0", "guest", 9999, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::OutputData { .. }));
    }

    #[tokio::test]
    async fn test_output_data_passes_output_dir_flag() {
        let rows_dir = tempfile::tempdir().unwrap();
        std::fs::write(rows_dir.path().join("output_data.csv"), "a\n").unwrap();

        let response = format!(
            r#"{{"retcode":0,"directory":"{}"}}"#,
            rows_dir.path().display()
        );
        let (dir, client) = recording_tool(&response);

        client
            .output_data("1", "hetero_lr_0", "guest", 9999, None)
            .await
            .unwrap();

        let args = recorded_args(&dir);
        assert_eq!(args[1], "component_output_data");
        assert!(args.contains(&"-o".to_string()));
    }

    #[test]
    fn test_resolve_dataset_file_rewrites_in_place() {
        let client = FlowClient::new(FlowConfig::new("flow_client.py", "/data/projects/fedflow"));

        let conf = client
            .resolve_dataset_file(json!({"file": "data/train.csv", "partition": 4}))
            .unwrap();

        assert_eq!(conf["file"], "/data/projects/fedflow/data/train.csv");
        assert_eq!(conf["partition"], 4);
    }
}
