use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::RwLock;

use crate::application::dtos::{default_k, Preferences};

/// Default filename used to persist preferences within the data directory.
const PREFERENCES_FILENAME: &str = "preferences.json";

/// Backend address used when `TRIAD_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(5);
const ERROR_BANNER_DELAY: Duration = Duration::from_secs(5);
const SUCCESS_BANNER_DELAY: Duration = Duration::from_secs(3);

/// Process-wide client configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub health_interval: Duration,
    pub error_banner_delay: Duration,
    pub success_banner_delay: Duration,
    pub default_k: usize,
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_interval: DEFAULT_HEALTH_INTERVAL,
            error_banner_delay: ERROR_BANNER_DELAY,
            success_banner_delay: SUCCESS_BANNER_DELAY,
            default_k: default_k(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Read `TRIAD_API_URL`, `TRIAD_HEALTH_INTERVAL_SECS`, `TRIAD_DEFAULT_K`
    /// and `TRIAD_DATA_DIR`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("TRIAD_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);

        let health_interval = lookup("TRIAD_HEALTH_INTERVAL_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.health_interval);

        let default_k = lookup("TRIAD_DEFAULT_K")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .map(|k| k.max(1))
            .unwrap_or(defaults.default_k);

        let data_dir = lookup("TRIAD_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Self {
            base_url,
            health_interval,
            default_k,
            data_dir,
            ..defaults
        }
    }
}

/// Thread-safe holder for `Preferences`, optionally backed by a JSON file.
pub struct PreferenceStore {
    path: Option<PathBuf>,
    state: RwLock<Preferences>,
}

impl PreferenceStore {
    /// Create a store rooted at `data_dir`. The JSON file will be located at
    /// `<data_dir>/preferences.json`. A missing or unreadable file yields defaults.
    pub fn load(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = data_dir.as_ref().join(PREFERENCES_FILENAME);
        let preferences = if path.exists() {
            fs::read(&path)
                .ok()
                .and_then(|bytes| serde_json::from_slice::<Preferences>(&bytes).ok())
                .unwrap_or_default()
        } else {
            Preferences::default()
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(preferences),
        })
    }

    /// Store that never touches the disk.
    pub fn ephemeral() -> Self {
        Self {
            path: None,
            state: RwLock::new(Preferences::default()),
        }
    }

    /// Snapshot of the current preferences.
    pub fn current(&self) -> Preferences {
        *self.state.read()
    }

    /// Update the dark-mode flag and persist to disk.
    pub fn set_dark_mode(&self, enabled: bool) -> std::io::Result<Preferences> {
        let mut guard = self.state.write();
        guard.dark_mode = enabled;
        self.persist_locked(&guard)?;
        Ok(*guard)
    }

    /// Ensure the backing directory exists and write the JSON payload.
    fn persist_locked(&self, preferences: &Preferences) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(preferences)?;
        fs::write(path, payload)
    }
}
