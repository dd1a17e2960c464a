use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::{application::state::AppState, infrastructure::http_client::ApiClient};

use super::notifier::UiSurface;

/// Periodic `GET /health` probe feeding the shared online flag.
#[derive(Clone)]
pub struct HealthMonitor {
    client: ApiClient,
    state: Arc<AppState>,
    surface: Arc<dyn UiSurface>,
    interval: Duration,
}

impl HealthMonitor {
    pub fn new(
        client: ApiClient,
        state: Arc<AppState>,
        surface: Arc<dyn UiSurface>,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            state,
            surface,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Probe once and publish the verdict. Any 2xx means online.
    pub async fn probe_once(&self) -> bool {
        let online = match self.client.health().await {
            Ok(_) => true,
            Err(err) => {
                debug!(target: "triad_client::health", error = %err, "health probe failed");
                false
            }
        };

        let previous = self.state.record_probe(online, Utc::now());
        if previous != online {
            if online {
                info!(target: "triad_client::health", url = self.client.base_url(), "API online");
            } else {
                warn!(target: "triad_client::health", url = self.client.base_url(), "API offline");
            }
        }
        self.surface.set_api_status(online);
        online
    }

    /// Probe immediately, then every `interval`, for the life of the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.probe_once().await;
            }
        })
    }
}
