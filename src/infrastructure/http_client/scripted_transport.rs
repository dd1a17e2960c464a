//! In-memory transport with canned responses, for tests and offline demos.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use serde_json::Value;

use super::{HttpRequest, HttpTransport, RawResponse, TransportError};
use crate::domain::HttpMethod;

#[derive(Debug, Clone)]
enum Scripted {
    Respond(RawResponse),
    Fail(String),
}

#[derive(Default)]
struct GateState {
    held: bool,
    permits: usize,
}

/// Requests wait on the condvar while the gate is held and no permit is left.
#[derive(Default)]
struct Gate {
    state: Mutex<GateState>,
    opened: Condvar,
}

impl Gate {
    fn pass(&self) {
        let mut state = self.state.lock();
        while state.held && state.permits == 0 {
            self.opened.wait(&mut state);
        }
        if state.held {
            state.permits -= 1;
        }
    }
}

/// Releases held requests: one per `one()`, all of them on drop.
pub struct HoldRelease {
    gate: Arc<Gate>,
}

impl HoldRelease {
    pub fn one(&self) {
        self.gate.state.lock().permits += 1;
        self.gate.opened.notify_all();
    }
}

impl Drop for HoldRelease {
    fn drop(&mut self) {
        *self.gate.state.lock() = GateState::default();
        self.gate.opened.notify_all();
    }
}

/// Transport answering from a route table keyed by method and path.
///
/// Every request is recorded before it is answered. Unknown routes get a
/// FastAPI style `404 {"detail": "Not Found"}`.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(HttpMethod, String), Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
    gate: Arc<Gate>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.routes.lock().insert(
            (method, path.to_string()),
            Scripted::Respond(RawResponse::new(status, body.to_string())),
        );
    }

    /// Answer `method path` with a raw, possibly non-JSON body.
    pub fn respond_raw(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.routes.lock().insert(
            (method, path.to_string()),
            Scripted::Respond(RawResponse::new(status, body)),
        );
    }

    /// Fail `method path` as if no response had been received.
    pub fn fail(&self, method: HttpMethod, path: &str, message: &str) {
        self.routes
            .lock()
            .insert((method, path.to_string()), Scripted::Fail(message.to_string()));
    }

    /// Hold every following request until the returned handle releases it.
    /// Held requests on any route wait side by side.
    pub fn hold(&self) -> HoldRelease {
        *self.gate.state.lock() = GateState {
            held: true,
            permits: 0,
        };
        HoldRelease {
            gate: Arc::clone(&self.gate),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of recorded requests whose path equals `path`.
    pub fn count_for(&self, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| path_of(&r.url) == path)
            .count()
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().push(request.clone());

        self.gate.pass();

        let key = (request.method, path_of(&request.url).to_string());
        let scripted = self.routes.lock().get(&key).cloned();
        match scripted {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(TransportError(message)),
            None => Ok(RawResponse::new(404, r#"{"detail": "Not Found"}"#)),
        }
    }
}

/// Path component of an absolute URL (`http://host:port/a/b` -> `/a/b`).
fn path_of(url: &str) -> &str {
    let after_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    match after_scheme.find('/') {
        Some(idx) => &after_scheme[idx..],
        None => "/",
    }
}
