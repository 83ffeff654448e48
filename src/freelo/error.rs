use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum FreeloError {
    #[error("Failed to reach the Freelo API")]
    #[diagnostic(
        code(freelo_mcp::freelo::connection_failed),
        help("Check network access to the Freelo API or the FREELO_API_URL override.")
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Freelo API error ({status}): {message}")]
    #[diagnostic(code(freelo_mcp::freelo::api_error))]
    Api {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    #[error("Invalid response from the Freelo API: {message}")]
    #[diagnostic(code(freelo_mcp::freelo::invalid_response))]
    InvalidResponse { message: String },

    #[error("Failed to build HTTP client: {message}")]
    #[diagnostic(code(freelo_mcp::freelo::client))]
    Client { message: String },
}

impl FreeloError {
    /// HTTP status reported by the upstream, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            FreeloError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FreeloError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            FreeloError::ConnectionFailed { source: e }
        } else {
            FreeloError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for FreeloError {
    fn from(e: serde_json::Error) -> Self {
        FreeloError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type FreeloResult<T> = Result<T, FreeloError>;
