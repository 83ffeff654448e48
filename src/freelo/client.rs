use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::{FreeloError, FreeloResult};
use crate::config::{self, Credentials};

/// HTTP client for the Freelo REST API.
///
/// Every request carries HTTP basic auth (account email + API key) and the
/// User-Agent Freelo asks integrations to send.
pub struct FreeloClient {
    base_url: String,
    credentials: Credentials,
    client: Client,
}

impl FreeloClient {
    /// Create a client against `FREELO_API_URL` or the public API.
    pub fn new(credentials: Credentials) -> FreeloResult<Self> {
        Self::with_base_url(credentials, config::api_url())
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(
        credentials: Credentials,
        base_url: impl Into<String>,
    ) -> FreeloResult<Self> {
        // reqwest is built without a bundled provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let user_agent = if credentials.user_agent.is_empty() {
            concat!("freelo-mcp/", env!("CARGO_PKG_VERSION")).to_string()
        } else {
            credentials.user_agent.clone()
        };

        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FreeloError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.api_key))
    }

    #[instrument(skip(self, query))]
    pub(crate) async fn get<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> FreeloResult<Value> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::handle_response(response).await
    }

    #[instrument(skip(self, body))]
    pub(crate) async fn post(&self, path: &str, body: Option<&Value>) -> FreeloResult<Value> {
        let mut builder = self.request(Method::POST, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    #[instrument(skip(self))]
    pub(crate) async fn delete(&self, path: &str) -> FreeloResult<Value> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::handle_response(response).await
    }

    /// Decode a successful body as JSON, or turn a failure status into
    /// [`FreeloError::Api`] carrying the upstream message.
    ///
    /// Empty bodies decode to `null`.
    pub async fn handle_response(response: Response) -> FreeloResult<Value> {
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "Freelo response");

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        let body = serde_json::from_str::<Value>(&text).ok();
        let message = body
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    text.clone()
                }
            });

        Err(FreeloError::Api {
            status: status.as_u16(),
            message,
            body,
        })
    }
}

/// Freelo reports failures as `{"errors": [...]}`; some endpoints use
/// `{"message": "..."}` instead.
fn error_message(body: &Value) -> Option<String> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let parts: Vec<String> = errors
            .iter()
            .map(|e| match e {
                Value::String(s) => s.clone(),
                Value::Object(o) => o
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string()),
                other => other.to_string(),
            })
            .collect();
        if !parts.is_empty() {
            return Some(parts.join("; "));
        }
    }
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_joins_errors_array() {
        let body = json!({"errors": ["Task not found", {"message": "Bad id"}]});
        assert_eq!(
            error_message(&body).as_deref(),
            Some("Task not found; Bad id")
        );
    }

    #[test]
    fn test_error_message_falls_back_to_message_field() {
        let body = json!({"message": "Unauthorized"});
        assert_eq!(error_message(&body).as_deref(), Some("Unauthorized"));
        assert_eq!(error_message(&json!({"errors": []})), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = FreeloClient::with_base_url(
            Credentials::new("a@b.c", "key", "ua"),
            "http://localhost:1234/v1/",
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
    }
}
