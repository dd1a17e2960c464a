//! `ureq` backed transport used outside of tests.

use tracing::debug;

use super::{HttpRequest, HttpTransport, RawResponse, TransportError};

/// Blocking transport sharing one `ureq::Agent` (and its connection pool).
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new().build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        let mut call = self.agent.request(request.method.as_str(), &request.url);
        for &(name, value) in &request.headers {
            call = call.set(name, value);
        }

        if let Some(timeout) = request.timeout {
            call = call.timeout(timeout);
        }

        let result = match &request.body {
            Some(body) => call.send_string(body),
            None => call.call(),
        };

        match result {
            Ok(response) => {
                let status = response.status();
                let body = response
                    .into_string()
                    .map_err(|e| TransportError(format!("failed to read response body: {}", e)))?;
                Ok(RawResponse { status, body })
            }
            Err(ureq::Error::Status(code, response)) => {
                debug!(
                    target: "triad_client::http",
                    status = code,
                    url = %request.url,
                    "non-success status"
                );
                Ok(RawResponse {
                    status: code,
                    body: response.into_string().unwrap_or_default(),
                })
            }
            Err(ureq::Error::Transport(transport)) => Err(TransportError(transport.to_string())),
        }
    }
}
