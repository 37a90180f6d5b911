//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod component;
mod data;
mod job;

pub use component::ComponentCommands;
pub use data::DataCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use fedflow_client::FlowConfig;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job submission and monitoring
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Dataset upload and output retrieval
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },
    /// Component artifact retrieval
    Component {
        #[command(subcommand)]
        command: ComponentCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &FlowConfig) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Data { command } => data::handle_data_command(command, config).await,
        Commands::Component { command } => {
            component::handle_component_command(command, config).await
        }
    }
}
