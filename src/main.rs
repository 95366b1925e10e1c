//! Apollo MCP Server - Main entry point
//!
//! This is the main executable for the Apollo MCP Server, which provides a
//! Model Context Protocol (MCP) interface to Apollo.io people search and
//! contact enrichment.

use anyhow::Result;
use apollo_mcp_server::client::{ApolloClient, AsyncApolloClient, AsyncApolloClientImpl};
use apollo_mcp_server::{ApolloMcpServer, Config};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration; a missing API key is fatal here, never a per-call failure
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Apollo MCP Server with API URL: {}",
        config.apollo_api_url
    );

    // Initialize Apollo client
    let sync_client = ApolloClient::new(&config);
    let client = Arc::new(AsyncApolloClientImpl::new(sync_client)) as Arc<dyn AsyncApolloClient>;

    // Create the MCP server (tool executors are constructed internally)
    let server = ApolloMcpServer::new(
        client,
        config.default_webhook_url.clone(),
        config.enrich_concurrency,
    );

    info!(
        "Apollo MCP Server initialized (enrich concurrency: {}, default webhook: {})",
        config.enrich_concurrency,
        config.default_webhook_url.as_deref().unwrap_or("none")
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    apollo_mcp_server::server::run_server(server).await?;

    info!("Apollo MCP Server shutdown complete");
    Ok(())
}
