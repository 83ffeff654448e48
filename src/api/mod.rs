//! HTTP server: MCP endpoints, the REST façade and health.

mod handlers;
mod routes;
mod state;
mod v1;

#[cfg(test)]
mod mod_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use miette::Diagnostic;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::freelo::FreeloClient;
use crate::mcp::{create_sse_manager, create_streamable_manager};
use crate::session::SessionGateway;

pub use handlers::{ErrorResponse, HealthResponse};
pub use routes::{ApiDoc, sse_router, streamable_router};
pub use state::AppState;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "freelo_mcp=debug,tower_http=debug";

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind to {addr}: {source}")]
    #[diagnostic(
        code(freelo_mcp::api::bind),
        help("Pick a free port with PORT or the first argument.")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(freelo_mcp::api::serve))]
    Serve(#[source] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter, logging to stdout
pub fn init_tracing() {
    init_tracing_with(std::io::stdout);
}

/// Same as [`init_tracing`] but on stderr, leaving stdout to the protocol.
pub fn init_stderr_tracing() {
    init_tracing_with(std::io::stderr);
}

fn init_tracing_with<W>(writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
}

/// Run the Streamable HTTP server until SIGINT/SIGTERM.
pub async fn run_http(config: Config, client: Arc<FreeloClient>) -> Result<(), ApiError> {
    let sessions = create_streamable_manager(Arc::clone(&client));
    let app = streamable_router(AppState::new(sessions.clone(), client));
    serve(config, app, sessions).await
}

/// Run the legacy SSE server until SIGINT/SIGTERM.
pub async fn run_sse(config: Config, client: Arc<FreeloClient>) -> Result<(), ApiError> {
    let sessions = create_sse_manager(Arc::clone(&client));
    let app = sse_router(AppState::new(sessions.clone(), client));
    serve(config, app, sessions).await
}

async fn serve<S: SessionGateway>(
    config: Config,
    app: Router,
    sessions: S,
) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!(transport = sessions.kind(), "MCP server listening on http://{}", addr);

    let stopped = CancellationToken::new();
    tokio::spawn(drain_on_signal(sessions, stopped.clone()));

    let app = app.layer(TraceLayer::new_for_http());
    axum::serve(listener, app)
        .with_graceful_shutdown(stopped.cancelled_owned())
        .await
        .map_err(ApiError::Serve)?;

    info!("Server stopped");
    Ok(())
}

/// Wait for a termination signal, close every session, then let the
/// server stop. Open streams end once their session is closed.
async fn drain_on_signal<S: SessionGateway>(
    sessions: S,
    stopped: CancellationToken,
) {
    shutdown_signal().await;
    info!("Shutdown signal received, closing sessions");
    sessions.shutdown().await;
    stopped.cancel();
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
