//! Model-parameter and metric retrieval
//!
//! Artifact introspection never fails the calling pipeline: a component
//! with no model or metrics is a normal case, and a response this client
//! cannot read is reported as malformed, logged, and carried as a value
//! rather than raised.

use serde_json::Value;
use tracing::{info, warn};

use fedflow_core::dto::response::FlowResponse;

use crate::FlowClient;
use crate::invoke::{FlowFunction, ToolInvocation};

/// Outcome of an artifact query
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// The component produced the artifact
    Present(Value),
    /// The response parsed but carried no data payload: the component
    /// produced nothing
    Absent,
    /// The tool could not be run or its response could not be read.
    /// Distinct from [`Artifact::Absent`] so callers can tell "no output"
    /// from "broken response".
    Malformed {
        /// What went wrong
        detail: String,
    },
}

impl Artifact {
    /// The payload, when present
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl FlowClient {
    /// Fetch a component's model parameters
    ///
    /// Job/component combinations with no model output are a normal,
    /// non-error case and come back as [`Artifact::Absent`].
    pub async fn model_params(
        &self,
        job_id: &str,
        component: &str,
        role: &str,
        party_id: u32,
    ) -> Artifact {
        self.component_artifact(
            FlowFunction::ComponentOutputModel,
            "model output",
            job_id,
            component,
            role,
            party_id,
        )
        .await
    }

    /// Fetch a component's computed metrics
    ///
    /// Identical contract to [`FlowClient::model_params`].
    pub async fn metric(
        &self,
        job_id: &str,
        component: &str,
        role: &str,
        party_id: u32,
    ) -> Artifact {
        self.component_artifact(
            FlowFunction::ComponentMetricAll,
            "metrics",
            job_id,
            component,
            role,
            party_id,
        )
        .await
    }

    async fn component_artifact(
        &self,
        function: FlowFunction,
        kind: &str,
        job_id: &str,
        component: &str,
        role: &str,
        party_id: u32,
    ) -> Artifact {
        let raw = match self
            .invoke(
                ToolInvocation::new(function)
                    .arg("-j", job_id)
                    .arg("-cpn", component)
                    .arg("-r", role)
                    .arg("-p", party_id.to_string()),
            )
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "cannot fetch {} for job {} component {}: {}",
                    kind, job_id, component, e
                );
                return Artifact::Malformed {
                    detail: e.to_string(),
                };
            }
        };

        match serde_json::from_str::<FlowResponse>(&raw) {
            Ok(response) => match response.data {
                Some(data) => Artifact::Present(data),
                None => {
                    info!("job {} component {} has no {}", job_id, component, kind);
                    Artifact::Absent
                }
            },
            Err(e) => {
                warn!(
                    "cannot parse {} response for job {} component {}: {} (response: {})",
                    kind,
                    job_id,
                    component,
                    e,
                    raw.trim()
                );
                Artifact::Malformed {
                    detail: format!("response is not valid JSON: {e}"),
                }
            }
        }
    }
}
