//! In-memory pipe between an HTTP transport and one `rmcp` service.
//!
//! The service speaks newline-delimited JSON-RPC over a duplex stream; the
//! HTTP side writes client messages into it and reads server messages back
//! line by line.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex as StdMutex, MutexGuard, PoisonError};

use rmcp::{ServerHandler, ServiceExt};
use serde_json::Value;
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf,
};
use tokio::sync::Mutex;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, warn};

use crate::session::TransportError;

const CHANNEL_BUFFER: usize = 64 * 1024;

pub(crate) type ServiceLines = Lines<BufReader<ReadHalf<DuplexStream>>>;

pub(crate) struct ServiceChannel {
    writer: Mutex<Option<WriteHalf<DuplexStream>>>,
}

impl ServiceChannel {
    /// Start `handler` as an MCP server on a fresh pipe.
    ///
    /// Returns the client end and the stream of lines the server writes.
    pub(crate) fn spawn<S: ServerHandler>(handler: S) -> (Self, ServiceLines) {
        let (client_io, server_io) = tokio::io::duplex(CHANNEL_BUFFER);
        tokio::spawn(run_service(handler, server_io));

        let (reader, writer) = tokio::io::split(client_io);
        let channel = Self {
            writer: Mutex::new(Some(writer)),
        };
        (channel, BufReader::new(reader).lines())
    }

    /// Write one message to the server.
    pub(crate) async fn send(&self, message: &Value) -> Result<(), TransportError> {
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        let writer = writer.as_mut().ok_or(TransportError::Closed)?;
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Signal end of input; the server stops once it sees it.
    pub(crate) async fn shutdown(&self) {
        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Err(e) = writer.shutdown().await {
                debug!(error = %e, "Failed to shut down service channel");
            }
        }
    }
}

async fn run_service<S: ServerHandler>(handler: S, io: DuplexStream) {
    match handler.serve(io).await {
        Ok(service) => match service.waiting().await {
            Ok(reason) => debug!(?reason, "MCP service stopped"),
            Err(e) => warn!(error = %e, "MCP service task failed"),
        },
        Err(e) => debug!(error = %e, "MCP service stopped before initialization"),
    }
}

/// Close bookkeeping shared by the HTTP transports.
///
/// `closing` asks the reader task to stop; `closed` fires once it has
/// finished tearing the session down.
#[derive(Default)]
pub(crate) struct Lifecycle {
    closing: CancellationToken,
    closed: CancellationToken,
    notified: AtomicBool,
}

impl Lifecycle {
    pub(crate) fn request_close(&self) {
        self.closing.cancel();
    }

    pub(crate) fn is_closing(&self) -> bool {
        self.closing.is_cancelled()
    }

    pub(crate) async fn closing(&self) {
        self.closing.cancelled().await
    }

    /// Guard that requests close when dropped.
    pub(crate) fn close_on_drop(&self) -> DropGuard {
        self.closing.clone().drop_guard()
    }

    /// `true` exactly once, for whoever reports the close first.
    pub(crate) fn first_close(&self) -> bool {
        !self.notified.swap(true, Ordering::SeqCst)
    }

    pub(crate) fn mark_closed(&self) {
        self.closed.cancel();
    }

    pub(crate) async fn wait_closed(&self) {
        self.closed.cancelled().await
    }
}

/// Lock a std mutex, recovering the data if a holder panicked.
pub(crate) fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
