//! Freelo MCP server over legacy HTTP+SSE, with the REST façade.

use std::net::IpAddr;
use std::sync::Arc;

use clap::Parser;
use freelo_mcp::api::{self, ApiError, Config};
use freelo_mcp::config::Credentials;
use freelo_mcp::freelo::{FreeloClient, FreeloError};
use miette::Diagnostic;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Freelo client error: {0}")]
    #[diagnostic(code(freelo_mcp::binary::freelo))]
    Freelo(#[from] FreeloError),

    #[error("API server error: {0}")]
    #[diagnostic(code(freelo_mcp::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "freelo-mcp-sse")]
#[command(author, version, about = "Freelo MCP server (HTTP+SSE)", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    api::init_tracing();

    let credentials = Credentials::from_env();
    let missing = credentials.missing();
    if !missing.is_empty() {
        warn!(missing = ?missing, "Freelo credentials incomplete, upstream calls will fail");
    }
    let client = Arc::new(FreeloClient::new(credentials)?);

    api::run_sse(
        Config {
            host: cli.host,
            port: cli.port,
        },
        client,
    )
    .await?;

    Ok(())
}
