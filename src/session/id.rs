//! Session identifier generation.

use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

/// Produces identifiers for newly established sessions.
///
/// Identifiers must be unique among active sessions and safe to send as an
/// HTTP header value.
#[cfg_attr(test, automock)]
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
