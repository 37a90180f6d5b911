//! Component artifact command handlers
//!
//! Model parameters and metrics are best-effort: a component with nothing
//! to show is reported, not treated as a failure.

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use fedflow_client::{Artifact, FlowClient, FlowConfig};

/// Component subcommands
#[derive(Subcommand)]
pub enum ComponentCommands {
    /// Fetch a component's model parameters
    Model {
        job_id: String,

        /// Component name within the pipeline
        component: String,

        #[arg(short, long)]
        role: String,

        #[arg(short, long)]
        party_id: u32,
    },
    /// Fetch a component's computed metrics
    Metric {
        job_id: String,

        /// Component name within the pipeline
        component: String,

        #[arg(short, long)]
        role: String,

        #[arg(short, long)]
        party_id: u32,
    },
}

/// Handle component commands
pub async fn handle_component_command(
    command: ComponentCommands,
    config: &FlowConfig,
) -> Result<()> {
    let client = FlowClient::new(config.clone());

    match command {
        ComponentCommands::Model {
            job_id,
            component,
            role,
            party_id,
        } => {
            let artifact = client.model_params(&job_id, &component, &role, party_id).await;
            print_artifact(&component, "model output", &artifact)
        }
        ComponentCommands::Metric {
            job_id,
            component,
            role,
            party_id,
        } => {
            let artifact = client.metric(&job_id, &component, &role, party_id).await;
            print_artifact(&component, "metrics", &artifact)
        }
    }
}

/// Render an artifact outcome
fn print_artifact(component: &str, kind: &str, artifact: &Artifact) -> Result<()> {
    match artifact {
        Artifact::Present(value) => {
            println!("{}", format!("{} of {}:", kind, component).bold());
            if let Ok(pretty) = serde_json::to_string_pretty(value) {
                println!("{}", pretty);
            } else {
                println!("{:?}", value);
            }
        }
        Artifact::Absent => {
            println!(
                "{}",
                format!("Component {} produced no {}.", component, kind).yellow()
            );
        }
        Artifact::Malformed { detail } => {
            println!(
                "{}",
                format!("Could not read {} for {}: {}", kind, component, detail).red()
            );
        }
    }

    Ok(())
}
