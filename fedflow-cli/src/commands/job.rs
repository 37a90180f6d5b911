//! Job command handlers
//!
//! Handles job submission, status queries, task queries, and the polling
//! monitor.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value;

use fedflow_client::{FlowClient, FlowConfig, MonitorOptions, monitor_with};
use fedflow_core::domain::job::{JobStatus, JobStatusView};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Submit a job from config files
    Submit {
        /// Runtime configuration file (JSON)
        conf: PathBuf,

        /// DAG description file (JSON)
        #[arg(short, long)]
        dag: Option<PathBuf>,

        /// Poll the job until it settles, scoped to the conf's initiator
        #[arg(short, long)]
        monitor: bool,
    },
    /// Query a job's status
    Status {
        /// Job id returned at submission
        job_id: String,

        /// Role to scope the query to
        #[arg(short, long)]
        role: String,

        /// Party to scope the query to
        #[arg(short, long)]
        party_id: u32,
    },
    /// Poll a job until it reaches a terminal status
    Monitor {
        job_id: String,

        #[arg(short, long)]
        role: String,

        #[arg(short, long)]
        party_id: u32,

        /// Give up after this many polls
        #[arg(long)]
        max_polls: Option<u32>,
    },
    /// Query a component's task status
    Task {
        job_id: String,

        /// Component name within the pipeline
        component: String,

        #[arg(short, long)]
        role: String,

        #[arg(short, long)]
        party_id: u32,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &FlowConfig) -> Result<()> {
    let client = FlowClient::new(config.clone());

    match command {
        JobCommands::Submit { conf, dag, monitor } => {
            submit_job(&client, &conf, dag.as_deref(), monitor).await
        }
        JobCommands::Status {
            job_id,
            role,
            party_id,
        } => query_status(&client, &job_id, &role, party_id).await,
        JobCommands::Monitor {
            job_id,
            role,
            party_id,
            max_polls,
        } => monitor_job(&client, &job_id, &role, party_id, max_polls).await,
        JobCommands::Task {
            job_id,
            component,
            role,
            party_id,
        } => query_task(&client, &job_id, &component, &role, party_id).await,
    }
}

/// Submit a job and optionally stay attached until it settles
async fn submit_job(
    client: &FlowClient,
    conf_path: &Path,
    dag_path: Option<&Path>,
    monitor: bool,
) -> Result<()> {
    let conf = read_json(conf_path)?;
    let dag = dag_path.map(read_json).transpose()?;

    let submission = client.submit(dag.as_ref(), &conf).await?;

    println!("{} {}", "Submitted job".bold(), submission.job_id.cyan());
    if let Some(data) = &submission.data {
        if let Some(board_url) = data.get("board_url").and_then(Value::as_str) {
            println!("  Board: {}", board_url.dimmed());
        }
    }

    if monitor {
        let (role, party_id) = initiator_of(&conf)?;
        println!();
        let status = client.monitor(&submission.job_id, &role, party_id).await?;
        print_final_status(&submission.job_id, &status);
    }

    Ok(())
}

/// Query and display a job's status
async fn query_status(client: &FlowClient, job_id: &str, role: &str, party_id: u32) -> Result<()> {
    let query = client.query_job(job_id, role, party_id).await?;

    println!("{}", "Job Status:".bold());
    println!("  ID:     {}", job_id.cyan());
    println!("  Status: {}", colorize_status(&query.view.status));
    print_times(&query.view);

    if query.view.status == JobStatus::Running {
        if let Some(tasks) = &query.view.current_tasks {
            println!("  Tasks:  {}", tasks);
        }
    }

    Ok(())
}

/// Poll a job until it settles and report the terminal status
async fn monitor_job(
    client: &FlowClient,
    job_id: &str,
    role: &str,
    party_id: u32,
    max_polls: Option<u32>,
) -> Result<()> {
    let mut options = MonitorOptions::new(client.config().poll_interval);
    if let Some(max) = max_polls {
        options = options.with_max_polls(max);
    }

    let status = monitor_with(client, job_id, role, party_id, options).await?;
    print_final_status(job_id, &status);

    Ok(())
}

/// Query and display a component's task records
async fn query_task(
    client: &FlowClient,
    job_id: &str,
    component: &str,
    role: &str,
    party_id: u32,
) -> Result<()> {
    let query = client.query_task(job_id, component, role, party_id).await?;

    println!(
        "{}",
        format!("Found {} task record(s) for {}:", query.tasks.len(), component).bold()
    );
    for task in &query.tasks {
        if let Ok(pretty) = serde_json::to_string_pretty(task) {
            println!("{}", pretty);
        }
    }

    Ok(())
}

/// Read a JSON document from disk
fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Pull the initiator role/party out of a runtime conf
fn initiator_of(conf: &Value) -> Result<(String, u32)> {
    let initiator = conf
        .get("initiator")
        .context("runtime conf carries no initiator; use `fedflow job monitor` instead")?;

    let role = initiator
        .get("role")
        .and_then(Value::as_str)
        .context("initiator carries no role")?;
    let party_id = initiator
        .get("party_id")
        .and_then(Value::as_u64)
        .context("initiator carries no party_id")?;

    Ok((role.to_string(), party_id as u32))
}

fn print_final_status(job_id: &str, status: &JobStatus) {
    match status {
        JobStatus::Success => println!("{} job {}", "✓".green(), job_id),
        JobStatus::Fail => println!(
            "{} job {} failed, inspect it via the board or the flow cli",
            "✗".red(),
            job_id
        ),
        other => println!("{} job {} settled as {}", "!".yellow(), job_id, other),
    }
}

fn print_times(view: &JobStatusView) {
    if let Some(started) = view.start_time {
        println!("  Started: {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(ended) = view.end_time {
        println!("  Ended:   {}", ended.format("%Y-%m-%d %H:%M:%S"));

        if let Some(started) = view.start_time {
            let duration = ended.signed_duration_since(started);
            println!("  Duration: {}s", duration.num_seconds());
        }
    }
}

/// Colorize a job status for display
fn colorize_status(status: &JobStatus) -> colored::ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Waiting => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Success => status_str.green(),
        JobStatus::Fail => status_str.red(),
        JobStatus::Canceled => status_str.dimmed(),
        JobStatus::Timeout => status_str.red(),
        JobStatus::Unknown(_) => status_str.magenta(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initiator_extraction() {
        let conf = json!({"initiator": {"role": "guest", "party_id": 9999}});
        let (role, party_id) = initiator_of(&conf).unwrap();
        assert_eq!(role, "guest");
        assert_eq!(party_id, 9999);
    }

    #[test]
    fn test_initiator_missing_is_an_error() {
        assert!(initiator_of(&json!({"job_parameters": {}})).is_err());
        assert!(initiator_of(&json!({"initiator": {"role": "guest"}})).is_err());
    }
}
