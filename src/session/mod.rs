//! MCP session management.
//!
//! A session is one client conversation: one handler and one transport bound
//! to each other and registered under an opaque id once the protocol
//! handshake succeeds.
//!
//! - **store**: id → session map, owned by the manager
//! - **manager**: routes requests, creates sessions, drains on shutdown
//! - **transport**: the traits a concrete transport implements
//! - **gateway**: the view the HTTP layer has of either manager
//!
//! Lifecycle per session: `UNINITIALIZED → ACTIVE → CLOSED`. Only `ACTIVE`
//! sessions are in the store; a closed id is simply unknown afterwards.

pub mod envelope;
mod error;
mod gateway;
mod id;
mod manager;
mod store;
mod transport;

#[cfg(test)]
mod store_test;

pub use error::TransportError;
pub use gateway::SessionGateway;
pub use id::{IdGenerator, UuidGenerator};
pub use manager::SessionManager;
pub use store::SessionStore;
pub use transport::{SessionCallback, SessionHooks, SessionTransport, TransportFactory};

#[cfg(test)]
pub use id::MockIdGenerator;
