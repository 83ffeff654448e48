//! Freelo MCP gateway.
//!
//! Exposes the Freelo project management API as MCP tools over stdio, legacy
//! HTTP+SSE and Streamable HTTP, plus a small REST façade. The [`session`]
//! module owns the per-client session lifecycle for the HTTP transports.

pub mod api;
pub mod config;
pub mod freelo;
pub mod mcp;
pub mod session;

#[cfg(test)]
mod test_support;
