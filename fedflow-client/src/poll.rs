//! Job status polling
//!
//! Watches a submitted job until the orchestrator settles it. The loop is
//! generic over a status source so tests can script status sequences and
//! run with a zero interval.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time;
use tracing::{debug, info, warn};

use fedflow_core::domain::job::{JobStatus, JobStatusView};

use crate::FlowClient;
use crate::error::{ClientError, Result};

/// Anything that can report a job's current status
///
/// [`FlowClient`] is the production implementation; tests substitute
/// scripted sequences.
#[async_trait]
pub trait StatusSource {
    /// Fetch the job's current status view
    async fn job_status(&self, job_id: &str, role: &str, party_id: u32) -> Result<JobStatusView>;
}

#[async_trait]
impl StatusSource for FlowClient {
    async fn job_status(&self, job_id: &str, role: &str, party_id: u32) -> Result<JobStatusView> {
        Ok(self.query_job(job_id, role, party_id).await?.view)
    }
}

/// Monitor loop knobs
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Wait between polls
    pub interval: Duration,

    /// Stop with [`ClientError::MonitorExhausted`] after this many polls.
    /// `None` polls until the orchestrator settles the job, which blocks
    /// indefinitely if it never does.
    pub max_polls: Option<u32>,
}

impl MonitorOptions {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_polls: None,
        }
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }
}

impl FlowClient {
    /// Poll a job until it reaches a terminal status
    ///
    /// Returns the terminal status the orchestrator reported. With no poll
    /// budget this blocks for as long as the job stays waiting or running;
    /// run it inside a task you can abort if you need to give up early.
    /// Query failures propagate immediately — polling retries by design,
    /// it does not recover errors.
    pub async fn monitor(&self, job_id: &str, role: &str, party_id: u32) -> Result<JobStatus> {
        monitor_with(
            self,
            job_id,
            role,
            party_id,
            MonitorOptions::new(self.config().poll_interval),
        )
        .await
    }
}

/// Poll `source` until the job settles
///
/// One status query per poll, separated by `options.interval`. The future
/// is cancel-safe: dropping it between polls abandons the watch without
/// touching the job.
pub async fn monitor_with<S>(
    source: &S,
    job_id: &str,
    role: &str,
    party_id: u32,
    options: MonitorOptions,
) -> Result<JobStatus>
where
    S: StatusSource + ?Sized,
{
    let mut polls = 0u32;

    loop {
        polls += 1;

        let view = source.job_status(job_id, role, party_id).await?;

        match view.status {
            JobStatus::Success => {
                info!("job {} succeeded", job_id);
                return Ok(JobStatus::Success);
            }
            JobStatus::Fail => {
                info!(
                    "job {} failed, inspect it via the board or the flow cli",
                    job_id
                );
                return Ok(JobStatus::Fail);
            }
            status @ (JobStatus::Canceled | JobStatus::Timeout) => {
                warn!("job {} settled as {}", job_id, status);
                return Ok(status);
            }
            JobStatus::Waiting => {
                debug!("job {} is still waiting", job_id);
            }
            JobStatus::Running => {
                info!(
                    "job {} is running component(s) {}",
                    job_id,
                    view.current_tasks.as_deref().unwrap_or("(unreported)")
                );
            }
            JobStatus::Unknown(ref raw) => {
                warn!("job {} reported unrecognized status {:?}", job_id, raw);
            }
        }

        if let Some(max) = options.max_polls {
            if polls >= max {
                return Err(ClientError::MonitorExhausted { polls });
            }
        }

        time::sleep(options.interval).await;
    }
}
