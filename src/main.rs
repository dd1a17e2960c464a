/// Headless runner: keeps the health probe going and logs API status
/// transitions until interrupted.
///
/// # Environment Variables
///
/// - `TRIAD_API_URL`: Backend base URL (default: http://localhost:8000)
/// - `TRIAD_HEALTH_INTERVAL_SECS`: Probe interval (default: 5)
/// - `TRIAD_DATA_DIR`: Override data directory location
/// - `TRIAD_LOG`: Set logging level (trace, debug, info, warn, error)
#[tokio::main]
async fn main() {
    if let Err(err) = triad_client_lib::run().await {
        eprintln!("[triad-client] startup failed: {err:?}");
        std::process::exit(1);
    }
}
