use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info};

use super::actions::ActionKind;
use super::controls::ControlState;
use super::render::ResultView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient message shown above the result regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
}

/// Whatever paints view models: a DOM bridge, a TUI, a test recorder.
///
/// Calls may arrive from any task; implementations must tolerate a region
/// that no longer exists.
pub trait UiSurface: Send + Sync {
    fn render(&self, kind: ActionKind, view: &ResultView);

    fn show_banner(&self, banner: &Banner);

    /// Remove banner `id` if it is still the one displayed.
    fn dismiss_banner(&self, id: u64);

    fn set_control(&self, _kind: ActionKind, _state: ControlState, _label: &str) {}

    fn set_api_status(&self, _online: bool) {}
}

/// Shows banners and schedules their auto-dismissal.
pub struct Notifier {
    surface: Arc<dyn UiSurface>,
    next_id: AtomicU64,
    success_delay: Duration,
    error_delay: Duration,
}

impl Notifier {
    pub fn new(surface: Arc<dyn UiSurface>, success_delay: Duration, error_delay: Duration) -> Self {
        Self {
            surface,
            next_id: AtomicU64::new(1),
            success_delay,
            error_delay,
        }
    }

    pub fn success(&self, message: impl Into<String>) -> Banner {
        let message = message.into();
        info!(target: "triad_client::actions", "{}", message);
        self.show(BannerKind::Success, message, self.success_delay)
    }

    pub fn error(&self, message: impl Into<String>) -> Banner {
        let message = message.into();
        error!(target: "triad_client::actions", "{}", message);
        self.show(BannerKind::Error, message, self.error_delay)
    }

    fn show(&self, kind: BannerKind, message: String, delay: Duration) -> Banner {
        let banner = Banner {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            kind,
            message,
        };
        self.surface.show_banner(&banner);

        // Outside a runtime the banner simply stays until replaced.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let surface = Arc::clone(&self.surface);
            let id = banner.id;
            handle.spawn(async move {
                tokio::time::sleep(delay).await;
                surface.dismiss_banner(id);
            });
        }

        banner
    }
}
