//! Session managers for the HTTP transports
//!
//! Both managers build one [`FreeloServer`] per session over a shared
//! upstream client and draw session ids from [`UuidGenerator`].

use std::io;
use std::sync::Arc;

use crate::freelo::FreeloClient;
use crate::session::{SessionManager, SessionStore, UuidGenerator};

use super::server::FreeloServer;
use super::transport::{SseFactory, StreamableEndpoint, StreamableSessions};

/// Builds the handler for a new session.
pub type ServiceFactory = Box<dyn Fn() -> Result<FreeloServer, io::Error> + Send + Sync>;

pub type StreamableManager = StreamableEndpoint<FreeloServer>;
pub type SseManager = SessionManager<SseFactory<FreeloServer, ServiceFactory>>;

fn service_factory(client: Arc<FreeloClient>) -> ServiceFactory {
    // Returns io::Error to match the transport factory signature
    Box::new(move || Ok(FreeloServer::new(Arc::clone(&client))))
}

/// Create the session manager behind `/mcp/v1/endpoint`.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// # use freelo_mcp::config::Credentials;
/// # use freelo_mcp::freelo::FreeloClient;
/// # use freelo_mcp::mcp::create_streamable_manager;
/// # use freelo_mcp::session::SessionGateway;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Arc::new(FreeloClient::new(Credentials::from_env())?);
/// let manager = create_streamable_manager(client);
/// assert_eq!(manager.session_count(), 0);
/// # Ok(())
/// # }
/// ```
pub fn create_streamable_manager(client: Arc<FreeloClient>) -> StreamableManager {
    StreamableEndpoint::new(
        service_factory(client),
        StreamableSessions::new(SessionStore::new(), Arc::new(UuidGenerator)),
    )
}

/// Create the session manager behind `/sse` and `/message`.
pub fn create_sse_manager(client: Arc<FreeloClient>) -> SseManager {
    SessionManager::new(
        SseFactory::new(service_factory(client)),
        SessionStore::new(),
        Arc::new(UuidGenerator),
    )
}
