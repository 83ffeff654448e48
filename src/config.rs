//! Process configuration read from the environment.

use std::env;

use miette::Diagnostic;
use thiserror::Error;

/// Environment variable holding the Freelo account email.
pub const EMAIL_VAR: &str = "FREELO_EMAIL";
/// Environment variable holding the Freelo API key.
pub const API_KEY_VAR: &str = "FREELO_API_KEY";
/// Environment variable holding the User-Agent Freelo requires on every call.
pub const USER_AGENT_VAR: &str = "FREELO_USER_AGENT";
/// Optional override of the upstream base URL.
pub const API_URL_VAR: &str = "FREELO_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.freelo.io/v1";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .names.join(", "))]
    #[diagnostic(
        code(freelo_mcp::config::missing_credentials),
        help("Set FREELO_EMAIL, FREELO_API_KEY and FREELO_USER_AGENT before starting the server.")
    )]
    MissingCredentials { names: Vec<&'static str> },
}

/// Credentials injected into every upstream request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub api_key: String,
    pub user_agent: String,
}

// Keep the API key out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Credentials {
    pub fn new(
        email: impl Into<String>,
        api_key: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Read credentials from the environment.
    ///
    /// Absent variables become empty strings; use [`Credentials::missing`] or
    /// [`Credentials::require`] to decide what to do about them.
    pub fn from_env() -> Self {
        let read = |name: &str| env::var(name).unwrap_or_default().trim().to_string();
        Self {
            email: read(EMAIL_VAR),
            api_key: read(API_KEY_VAR),
            user_agent: read(USER_AGENT_VAR),
        }
    }

    /// Names of the variables that were not provided.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (EMAIL_VAR, &self.email),
            (API_KEY_VAR, &self.api_key),
            (USER_AGENT_VAR, &self.user_agent),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Fail unless every credential is present.
    pub fn require(self) -> Result<Self, ConfigError> {
        let names = self.missing();
        if names.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::MissingCredentials { names })
        }
    }
}

/// Upstream base URL: `FREELO_API_URL` or the public Freelo API.
pub fn api_url() -> String {
    env::var(API_URL_VAR)
        .ok()
        .map(|url| url.trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
