use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::info;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod settings;

use application::services::{Notifier, UiSurface};
use application::{ActionService, AppState, HealthMonitor};
use infrastructure::{ApiClient, HttpTransport, LogSurface, UreqTransport};
use settings::{ClientConfig, PreferenceStore};

/// Everything a front-end needs, built once at startup.
pub struct AppHandles {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub state: Arc<AppState>,
    pub actions: Arc<ActionService>,
    pub monitor: HealthMonitor,
}

/// Entry point invoked from `main.rs`: probe the API until Ctrl+C.
pub async fn run() -> Result<()> {
    init_tracing();

    let config = ClientConfig::from_env();
    let handles = build_environment(config, Arc::new(LogSurface))
        .context("failed to bootstrap triad client")?;

    info!(
        target: "triad_client",
        base_url = handles.client.base_url(),
        interval_secs = handles.monitor.interval().as_secs(),
        default_k = handles.config.default_k,
        dark_mode = handles.state.dark_mode(),
        "client ready"
    );

    let probe = handles.monitor.clone().spawn();

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    probe.abort();
    Ok(())
}

/// Wire the production stack: `ureq` transport, on-disk preferences.
pub fn build_environment(config: ClientConfig, surface: Arc<dyn UiSurface>) -> Result<AppHandles> {
    let data_dir = resolve_data_dir(&config)?;
    let preferences =
        Arc::new(PreferenceStore::load(&data_dir).context("failed to load preferences")?);
    Ok(build_with(
        config,
        Arc::new(UreqTransport::new()),
        preferences,
        surface,
    ))
}

/// Wire the stack around caller-provided transport and preferences.
pub fn build_with(
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    preferences: Arc<PreferenceStore>,
    surface: Arc<dyn UiSurface>,
) -> AppHandles {
    let client = ApiClient::new(config.base_url.clone(), transport);
    let state = Arc::new(AppState::new(preferences));
    let notifier = Notifier::new(
        Arc::clone(&surface),
        config.success_banner_delay,
        config.error_banner_delay,
    );
    let actions = Arc::new(ActionService::new(
        client.clone(),
        Arc::clone(&state),
        Arc::clone(&surface),
        notifier,
    ));
    let monitor = HealthMonitor::new(
        client.clone(),
        Arc::clone(&state),
        surface,
        config.health_interval,
    );

    AppHandles {
        config,
        client,
        state,
        actions,
        monitor,
    }
}

pub fn init_tracing() {
    init_tracing_with_writer(std::io::stderr);
}

fn init_tracing_with_writer<W>(make_writer: fn() -> W)
where
    W: std::io::Write + Send + Sync + 'static,
{
    static INIT: std::sync::OnceLock<()> = std::sync::OnceLock::new();

    let _ = INIT.get_or_init(|| {
        let filter = std::env::var("TRIAD_LOG").unwrap_or_else(|_| "info".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(make_writer)
            .compact()
            .try_init();
    });
}

fn resolve_data_dir(config: &ClientConfig) -> Result<std::path::PathBuf> {
    let dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => directories::ProjectDirs::from("dev", "triad", "TriadClient")
            .ok_or_else(|| anyhow!("unable to determine OS data dir"))?
            .data_dir()
            .to_path_buf(),
    };
    std::fs::create_dir_all(&dir).context("failed to create data directory")?;
    Ok(dir)
}
