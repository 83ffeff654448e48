//! Freelo MCP server over stdin/stdout.
//!
//! stdout carries the protocol, so logs go to stderr.

use std::sync::Arc;

use freelo_mcp::api;
use freelo_mcp::config::{ConfigError, Credentials};
use freelo_mcp::freelo::{FreeloClient, FreeloError};
use freelo_mcp::mcp::FreeloServer;
use miette::Diagnostic;
use rmcp::{ServiceExt, service::ServerInitializeError, transport::stdio};
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Freelo client error: {0}")]
    #[diagnostic(code(freelo_mcp::binary::freelo))]
    Freelo(#[from] FreeloError),

    #[error("MCP initialization failed: {0}")]
    #[diagnostic(code(freelo_mcp::binary::initialize))]
    Initialize(#[from] ServerInitializeError),

    #[error("MCP service task failed: {0}")]
    #[diagnostic(code(freelo_mcp::binary::service))]
    Service(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    api::init_stderr_tracing();

    let credentials = Credentials::from_env().require()?;
    let client = Arc::new(FreeloClient::new(credentials)?);

    info!("Freelo MCP server running on stdio");
    let service = FreeloServer::new(client).serve(stdio()).await?;
    let reason = service.waiting().await?;
    info!(?reason, "MCP service stopped");

    Ok(())
}
