use tracing::{info, warn};

use crate::application::services::{
    ActionKind, Banner, BannerKind, ControlState, ResultView, UiSurface,
};

/// Surface for headless runs: every paint becomes a log line.
#[derive(Debug, Default)]
pub struct LogSurface;

impl UiSurface for LogSurface {
    fn render(&self, kind: ActionKind, view: &ResultView) {
        let rendered = serde_json::to_string(view).unwrap_or_else(|_| format!("{:?}", view));
        info!(target: "triad_client::surface", action = %kind, "{}", rendered);
    }

    fn show_banner(&self, banner: &Banner) {
        match banner.kind {
            BannerKind::Success => {
                info!(target: "triad_client::surface", id = banner.id, "{}", banner.message)
            }
            BannerKind::Error => {
                warn!(target: "triad_client::surface", id = banner.id, "{}", banner.message)
            }
        }
    }

    fn dismiss_banner(&self, _id: u64) {}

    fn set_control(&self, kind: ActionKind, state: ControlState, label: &str) {
        info!(
            target: "triad_client::surface",
            action = %kind,
            state = ?state,
            "{}",
            label
        );
    }

    fn set_api_status(&self, online: bool) {
        if online {
            info!(target: "triad_client::surface", "API Online");
        } else {
            warn!(target: "triad_client::surface", "API Offline");
        }
    }
}
