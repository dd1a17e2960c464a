use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::ClientError;
use crate::settings::PreferenceStore;

/// Shared, explicitly owned application state handed to every action handler.
pub struct AppState {
    online: AtomicBool,
    last_probe: RwLock<Option<DateTime<Utc>>>,
    preferences: Arc<PreferenceStore>,
}

impl AppState {
    /// Starts offline until the first health probe succeeds.
    pub fn new(preferences: Arc<PreferenceStore>) -> Self {
        Self {
            online: AtomicBool::new(false),
            last_probe: RwLock::new(None),
            preferences,
        }
    }

    /// State with an in-memory preference store.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(PreferenceStore::ephemeral()))
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// Store the probe verdict and return the previous one.
    pub fn set_online(&self, online: bool) -> bool {
        self.online.swap(online, Ordering::AcqRel)
    }

    /// Store a probe verdict together with the time it was taken.
    pub fn record_probe(&self, online: bool, checked_at: DateTime<Utc>) -> bool {
        *self.last_probe.write() = Some(checked_at);
        self.set_online(online)
    }

    /// When the health probe last completed, if ever.
    pub fn last_probe(&self) -> Option<DateTime<Utc>> {
        *self.last_probe.read()
    }

    pub fn dark_mode(&self) -> bool {
        self.preferences.current().dark_mode
    }

    /// Flip the dark-mode preference, persist it, and return the new value.
    pub fn toggle_dark_mode(&self) -> Result<bool, ClientError> {
        let next = !self.dark_mode();
        self.preferences
            .set_dark_mode(next)
            .map(|prefs| prefs.dark_mode)
            .map_err(|err| ClientError::storage(format!("failed to save preferences: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_offline_and_reports_previous_value() {
        let state = AppState::ephemeral();
        assert!(!state.is_online());
        assert!(!state.set_online(true));
        assert!(state.set_online(false));
        assert!(!state.is_online());
        assert!(state.last_probe().is_none());
    }

    #[test]
    fn record_probe_keeps_timestamp() {
        let state = AppState::ephemeral();
        let now = Utc::now();
        assert!(!state.record_probe(true, now));
        assert!(state.is_online());
        assert_eq!(state.last_probe(), Some(now));
    }

    #[test]
    fn toggle_dark_mode_flips_preference() {
        let state = AppState::ephemeral();
        assert!(state.toggle_dark_mode().unwrap());
        assert!(state.dark_mode());
        assert!(!state.toggle_dark_mode().unwrap());
    }
}
