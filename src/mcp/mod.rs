//! Model Context Protocol (MCP) server implementation
//!
//! This module exposes the Freelo API as MCP tools over stdio, SSE and
//! Streamable HTTP.
//!
//! # Architecture
//!
//! - **server**: [`FreeloServer`], the per-session handler
//! - **tools**: tool routers grouped by Freelo area
//! - **transport**: HTTP transports binding one handler per session
//! - **service**: session managers wired to [`FreeloServer`]

pub mod server;
mod service;
pub mod tools;
pub mod transport;

#[cfg(test)]
mod server_test;

pub use server::FreeloServer;
pub use service::{
    ServiceFactory, SseManager, StreamableManager, create_sse_manager, create_streamable_manager,
};
