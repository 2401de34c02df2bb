//! CLI command definitions and dispatch.

pub mod check;
pub mod create;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use shareport_client::HttpShareGateway;
use shareport_core::config::AppConfig;
use shareport_core::error::AppError;
use shareport_core::traits::ShareGateway;

/// Shareport — share files through short, human-typable links
#[derive(Debug, Parser)]
#[command(name = "shareport", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment to load (config/<env>.toml)
    #[arg(short, long, default_value = "default")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new share interactively
    Create(create::CreateArgs),
    /// Check whether a share link is still available
    Check(check::CheckArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Create(args) => create::execute(args, config).await,
            Commands::Check(args) => check::execute(args, config).await,
        }
    }
}

/// Helper: build the HTTP gateway from configuration
pub fn build_gateway(config: &AppConfig) -> Result<Arc<dyn ShareGateway>, AppError> {
    Ok(Arc::new(HttpShareGateway::new(&config.gateway)?))
}

/// Helper: map prompt I/O failures into the application error type
pub fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::internal(format!("Prompt failed: {err}"))
}
