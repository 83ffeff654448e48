//! JSON-RPC envelopes used for errors raised outside the MCP handler.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const INTERNAL_ERROR: i64 = -32603;
/// Implementation-defined code used for transport-level rejections.
pub const SERVER_ERROR: i64 = -32000;

pub fn error_body(code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": { "code": code, "message": message },
        "id": null,
    })
}

pub fn error_response(status: StatusCode, code: i64, message: &str) -> Response {
    (status, Json(error_body(code, message))).into_response()
}

/// Generic failure; never exposes internals.
pub fn internal_error() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR,
        "Internal server error",
    )
}

pub fn method_not_allowed(allow: &'static str) -> Response {
    let mut response = error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        SERVER_ERROR,
        "Method not allowed.",
    );
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    response
}

/// A message with both `method` and `id` expects a response.
pub fn is_request(message: &Value) -> bool {
    message.get("method").is_some() && message.get("id").is_some_and(|id| !id.is_null())
}

pub fn is_initialize_request(message: &Value) -> bool {
    is_request(message) && message.get("method").and_then(Value::as_str) == Some("initialize")
}

/// Request id as a map key; `1` and `"1"` stay distinct.
pub fn request_key(message: &Value) -> String {
    message.get("id").map(Value::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_classification() {
        let request = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});
        let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        let response = json!({"jsonrpc": "2.0", "id": 1, "result": {}});

        assert!(is_request(&request));
        assert!(!is_request(&notification));
        assert!(!is_request(&response));
    }

    #[test]
    fn test_request_key_distinguishes_string_and_numeric_ids() {
        let numeric = json!({"id": 1});
        let string = json!({"id": "1"});
        assert_ne!(request_key(&numeric), request_key(&string));
    }

    #[test]
    fn test_initialize_detection() {
        let init = json!({"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {}});
        assert!(is_initialize_request(&init));
        assert!(!is_initialize_request(&json!({"jsonrpc": "2.0", "method": "initialize"})));
    }

    #[test]
    fn test_error_body_shape() {
        let body = error_body(INTERNAL_ERROR, "Internal server error");
        assert_eq!(body["error"]["code"], -32603);
        assert_eq!(body["id"], Value::Null);
    }
}
