//! Infrastructure layer wiring concrete adapters (HTTP transport, surfaces).

pub mod http_client;
pub mod surface;

pub use http_client::{ApiClient, HttpTransport, ScriptedTransport, UreqTransport};
pub use surface::{LogSurface, MemorySurface};
