//! Application configuration.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `config.json` in the data directory
//! 3. environment variables (`DOTDNS_DATA_DIR`, `DOTDNS_KEYRING_SERVICE`)

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use dotdns_core::error::{CoreError, CoreResult};
use dotdns_provider::ProbeTarget;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const ENV_DATA_DIR: &str = "DOTDNS_DATA_DIR";
pub const ENV_KEYRING_SERVICE: &str = "DOTDNS_KEYRING_SERVICE";

const APP_DIR_NAME: &str = "dotdns";
const DEFAULT_KEYRING_SERVICE: &str = "dotdns";

/// Background reachability probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_probe_interval")]
    pub interval_secs: u64,
}

fn default_probe_interval() -> u64 {
    30
}

impl ProbeConfig {
    pub fn target(&self) -> ProbeTarget {
        ProbeTarget::new(
            self.host.clone(),
            self.port,
            Duration::from_secs(self.interval_secs.max(1)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Where durable records (`stored_providers.json`, ...) live.
    pub data_dir: PathBuf,
    /// Keychain service name secrets are stored under.
    pub keyring_service: String,
    /// Disabled when absent.
    pub connectivity_probe: Option<ProbeConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
            connectivity_probe: None,
        }
    }
}

/// `<platform config dir>/dotdns`, or `./dotdns` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

impl AppConfig {
    /// Load from the process environment and the config file it points at.
    pub fn load() -> CoreResult<Self> {
        Self::load_with_env(|name| std::env::var(name).ok())
    }

    /// Same as [`load`](Self::load) with an injectable environment lookup.
    pub fn load_with_env(env: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let env_data_dir = env(ENV_DATA_DIR).filter(|v| !v.is_empty()).map(PathBuf::from);
        let data_dir = env_data_dir.clone().unwrap_or_else(default_data_dir);

        let mut config = Self::from_file(&data_dir.join(CONFIG_FILE_NAME))?.unwrap_or_default();
        config.data_dir = env_data_dir.unwrap_or(config.data_dir);
        if let Some(service) = env(ENV_KEYRING_SERVICE).filter(|v| !v.is_empty()) {
            config.keyring_service = service;
        }

        log::debug!("Using data directory {}", config.data_dir.display());
        Ok(config)
    }

    /// Parse a config file; `None` when it does not exist.
    pub fn from_file(path: &Path) -> CoreResult<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )))
            }
        };
        serde_json::from_str(&text).map(Some).map_err(|e| {
            CoreError::SerializationError(format!("Invalid config {}: {e}", path.display()))
        })
    }
}
