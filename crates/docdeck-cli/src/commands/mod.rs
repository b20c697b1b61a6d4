//! Command implementations

mod collections;
mod config;
mod documents;
mod search;
mod upload;

use std::sync::Arc;

use anyhow::Result;
use docdeck_core::config::{ClientConfig, CliConfigOverrides};
use docdeck_core::RetrievalGateway;
use docdeck_gateway::{HttpGateway, MemoryGateway};

use crate::browse;
use crate::cli::{Cli, Commands, GatewayBackend};
use crate::output::OutputWriter;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let mut client_config = ClientConfig::with_defaults();
    if let Some(path) = &cli.config {
        client_config = client_config.load_from_file(path)?;
    }
    client_config = client_config.load_from_env();
    client_config.update_from_cli(CliConfigOverrides {
        endpoint: cli.endpoint.clone(),
        ..Default::default()
    });

    tracing::debug!(backend = ?cli.backend, endpoint = %client_config.endpoint.value, "selected gateway");
    let gateway: Arc<dyn RetrievalGateway> = match cli.backend {
        GatewayBackend::Memory => Arc::new(MemoryGateway::new()),
        GatewayBackend::Http => Arc::new(HttpGateway::new(client_config.endpoint.value.clone())),
    };

    match cli.command {
        Commands::Collections(args) => collections::execute(args, gateway.as_ref(), &output).await,
        Commands::Documents(args) => documents::execute(args, gateway.as_ref(), &output).await,
        Commands::Search(args) => {
            search::execute(args, gateway.as_ref(), &client_config, &output).await
        }
        Commands::Upload(args) => upload::execute(args, gateway.as_ref(), &client_config, &output).await,
        Commands::Browse(_) => browse::execute(gateway, &client_config, &output).await,
        Commands::Config(_) => config::execute(&client_config, &output),
    }
}
