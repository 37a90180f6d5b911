//! Data command handlers
//!
//! Handles dataset upload and component output-data retrieval.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value;

use fedflow_client::{DropMode, FlowClient, FlowConfig};

/// Data subcommands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Upload a dataset described by a config file
    Upload {
        /// Upload configuration file (JSON), carrying at least a `file`
        /// field
        conf: PathBuf,

        /// Overwrite the destination table if it already exists
        #[arg(long)]
        drop: bool,
    },
    /// Fetch a component's output rows
    Output {
        job_id: String,

        /// Component name within the pipeline
        component: String,

        #[arg(short, long)]
        role: String,

        #[arg(short, long)]
        party_id: u32,

        /// Print at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle data commands
pub async fn handle_data_command(command: DataCommands, config: &FlowConfig) -> Result<()> {
    let client = FlowClient::new(config.clone());

    match command {
        DataCommands::Upload { conf, drop } => upload_data(&client, &conf, drop).await,
        DataCommands::Output {
            job_id,
            component,
            role,
            party_id,
            limit,
        } => fetch_output(&client, &job_id, &component, &role, party_id, limit).await,
    }
}

/// Upload a dataset
async fn upload_data(client: &FlowClient, conf_path: &Path, drop: bool) -> Result<()> {
    let raw = std::fs::read_to_string(conf_path)
        .with_context(|| format!("cannot read {}", conf_path.display()))?;
    let conf: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", conf_path.display()))?;

    let drop = if drop {
        DropMode::Overwrite
    } else {
        DropMode::Keep
    };

    let submission = client.upload(&conf, drop).await?;

    println!("{} {}", "Upload accepted as job".bold(), submission.job_id.cyan());
    if let Some(data) = &submission.data {
        if let Ok(pretty) = serde_json::to_string_pretty(data) {
            println!("{}", pretty.dimmed());
        }
    }

    Ok(())
}

/// Fetch and print a component's output rows
async fn fetch_output(
    client: &FlowClient,
    job_id: &str,
    component: &str,
    role: &str,
    party_id: u32,
    limit: Option<usize>,
) -> Result<()> {
    let rows = client
        .output_data(job_id, component, role, party_id, limit)
        .await?;

    if rows.is_empty() {
        println!("{}", "No output rows.".yellow());
    } else {
        println!(
            "{}",
            format!("{} output row(s) for {}:", rows.len(), component).bold()
        );
        for row in &rows {
            println!("{}", row);
        }
    }

    Ok(())
}
