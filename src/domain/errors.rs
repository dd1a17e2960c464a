use thiserror::Error;

/// Failure reported by the remote API or the transport underneath it.
///
/// `status` is `None` when no HTTP response was received at all (DNS failure,
/// connection refused, timeout).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.status, .message))]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Generic message used when a non-2xx body carries no `detail`.
    pub fn status_message(status: u16) -> String {
        format!("API Error: {}", status)
    }

    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }
}

fn describe(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP {}: {}", code, message),
        None => format!("transport error: {}", message),
    }
}

/// Errors surfaced to action handlers and the UI.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required input was missing or blank. Never reaches the network.
    #[error("validation error: {0}")]
    Validation(String),

    /// The health probe reports the API as unreachable.
    #[error("API offline")]
    Offline,

    /// The call was issued and failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Preference file could not be written.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Any other unexpected failure.
    #[error("unexpected error: {0}")]
    Other(String),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Text shown in the error banner. Validation messages are shown as-is,
    /// API failures prefer the server supplied detail.
    pub fn banner_text(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Offline => "API offline".to_string(),
            ClientError::Api(err) => err.message.clone(),
            ClientError::Storage(msg) | ClientError::Other(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_when_present() {
        assert_eq!(
            ApiError::http(404, "Not found").to_string(),
            "HTTP 404: Not found"
        );
        assert_eq!(
            ApiError::transport("connection refused").to_string(),
            "transport error: connection refused"
        );
    }

    #[test]
    fn banner_text_prefers_server_detail() {
        let err = ClientError::from(ApiError::http(400, "Unknown source domain: foo"));
        assert_eq!(err.banner_text(), "Unknown source domain: foo");
        assert_eq!(ClientError::Offline.banner_text(), "API offline");
    }
}
