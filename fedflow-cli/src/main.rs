//! Fedflow CLI
//!
//! Command-line interface for driving a federated-learning orchestrator
//! through its flow client.

mod commands;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};
use fedflow_client::FlowConfig;

#[derive(Parser)]
#[command(name = "fedflow")]
#[command(about = "Federated training job CLI", long_about = None)]
struct Cli {
    /// Interpreter used to run the flow client
    #[arg(long, env = "FEDFLOW_INTERPRETER", default_value = "python")]
    interpreter: PathBuf,

    /// Path to the orchestrator's flow-client script
    #[arg(long, env = "FEDFLOW_CLIENT_PATH")]
    client_path: PathBuf,

    /// Installation root against which relative dataset paths are resolved
    #[arg(long, env = "FEDFLOW_DATA_ROOT", default_value = ".")]
    data_root: PathBuf,

    /// Seconds between job status polls
    #[arg(long, env = "FEDFLOW_POLL_INTERVAL_SECS", default_value_t = 1)]
    poll_interval: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fedflow_cli=info,fedflow_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = FlowConfig::new(cli.client_path, cli.data_root)
        .with_interpreter(cli.interpreter)
        .with_poll_interval(Duration::from_secs(cli.poll_interval));
    config.validate()?;

    handle_command(cli.command, &config).await
}
