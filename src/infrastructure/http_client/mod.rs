//! HTTP client for communicating with the triad API backend.
//!
//! The facade (`ApiClient`) owns the base URL and the JSON/error contract; the
//! actual bytes move through an `HttpTransport` so the contract can be tested
//! without a live server.

mod api_client;
mod scripted_transport;
mod ureq_transport;

pub use api_client::ApiClient;
pub use scripted_transport::{HoldRelease, ScriptedTransport};
pub use ureq_transport::UreqTransport;

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::domain::{ApiError, HttpMethod};

/// Timeout applied to health probes only; regular calls use the transport default.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Headers sent with every API call.
pub const JSON_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
];

/// Fully resolved request handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

/// Whatever came back on the wire, regardless of status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No response was received.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Blocking HTTP primitive. Implementations must return `Ok` for every
/// response that arrived, including non-2xx ones.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<RawResponse, TransportError>;
}

/// Convert a received response into the JSON body or an `ApiError`.
pub fn handle_response(response: RawResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::http(
            response.status,
            error_detail(&response.body)
                .unwrap_or_else(|| ApiError::status_message(response.status)),
        ));
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|err| {
        ApiError::http(response.status, format!("invalid JSON response: {}", err))
    })
}

/// Extract `detail` from an error body. FastAPI validation errors carry a
/// structured detail, which is rendered as compact JSON.
fn error_detail(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_uses_detail_when_present() {
        let err = handle_response(RawResponse::new(
            400,
            r#"{"detail": "Unknown source domain: audio"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.status, Some(400));
        assert_eq!(err.message, "Unknown source domain: audio");
    }

    #[test]
    fn non_success_without_detail_uses_generic_message() {
        let err = handle_response(RawResponse::new(502, "<html>bad gateway</html>")).unwrap_err();
        assert_eq!(err, ApiError::http(502, "API Error: 502"));
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let err = handle_response(RawResponse::new(
            422,
            r#"{"detail": [{"loc": ["body", "k"], "msg": "field required"}]}"#,
        ))
        .unwrap_err();
        assert!(err.message.contains("field required"));
    }

    #[test]
    fn success_body_is_returned_verbatim() {
        let value = handle_response(RawResponse::new(200, r#"{"similarity": 0.5, "x": [1]}"#))
            .unwrap();
        assert_eq!(value["x"][0], 1);
        assert_eq!(
            handle_response(RawResponse::new(204, "")).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn success_with_garbage_body_is_an_error() {
        let err = handle_response(RawResponse::new(200, "not json")).unwrap_err();
        assert_eq!(err.status, Some(200));
        assert!(err.message.starts_with("invalid JSON response"));
    }
}
