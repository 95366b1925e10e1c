//! MCP server implementation for Apollo people search and enrichment.
//!
//! This module provides the MCP protocol server that exposes the Apollo
//! tools to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::ApolloMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the Apollo MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: ApolloMcpServer) -> Result<()> {
    // Serve the server with stdio transport
    let service = server.serve(stdio()).await?;

    // Wait for completion
    service.waiting().await?;

    Ok(())
}
