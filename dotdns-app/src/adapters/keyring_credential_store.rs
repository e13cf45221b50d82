//! Keyring-based credential store.
//!
//! Uses the system keychain (macOS Keychain, Windows Credential Manager,
//! Linux Secret Service) via the `keyring` crate. Each logical key is its own
//! keychain entry under one service name.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use keyring::Entry;
use tokio::sync::Mutex;

use dotdns_core::error::{CoreError, CoreResult};
use dotdns_core::traits::CredentialStore;

/// Default keychain service name.
pub const DEFAULT_SERVICE_NAME: &str = "dotdns";

/// Keyring-based credential store.
///
/// Keychain calls block, so they run on the blocking pool. Values that have
/// been read or written are cached (`None` caches a known-missing key). All
/// access goes through one lock, so a `load` never observes a half-applied
/// `save`.
pub struct KeyringCredentialStore {
    service: String,
    cache: Arc<Mutex<HashMap<String, Option<String>>>>,
}

impl KeyringCredentialStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(service: &str, key: &str) -> CoreResult<Entry> {
        Entry::new(service, key).map_err(|e| CoreError::CredentialError(e.to_string()))
    }

    fn read_sync(service: &str, key: &str) -> CoreResult<Option<String>> {
        match Self::entry(service, key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CoreError::CredentialError(e.to_string())),
        }
    }

    fn write_sync(service: &str, key: &str, value: &str) -> CoreResult<()> {
        Self::entry(service, key)?
            .set_password(value)
            .map_err(|e| CoreError::CredentialError(e.to_string()))
    }

    fn delete_sync(service: &str, key: &str) -> CoreResult<()> {
        match Self::entry(service, key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CoreError::CredentialError(e.to_string())),
        }
    }

    async fn blocking<T, F>(&self, key: &str, op: F) -> CoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&str, &str) -> CoreResult<T> + Send + 'static,
    {
        let service = self.service.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || op(&service, &key))
            .await
            .map_err(|e| CoreError::CredentialError(format!("Task join error: {e}")))?
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

#[async_trait]
impl CredentialStore for KeyringCredentialStore {
    async fn save(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut cache = self.cache.lock().await;

        let owned = value.to_string();
        self.blocking(key, move |service, key| {
            Self::write_sync(service, key, &owned)
        })
        .await?;

        cache.insert(key.to_string(), Some(value.to_string()));
        log::info!("Credential saved: {key}");
        Ok(())
    }

    async fn load(&self, key: &str) -> CoreResult<Option<String>> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.get(key) {
            return Ok(cached.clone());
        }

        log::debug!("Loading credential {key} from Keychain");
        let value = self.blocking(key, Self::read_sync).await?;
        cache.insert(key.to_string(), value.clone());
        Ok(value)
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        let mut cache = self.cache.lock().await;
        self.blocking(key, Self::delete_sync).await?;
        cache.insert(key.to_string(), None);
        log::info!("Credential deleted: {key}");
        Ok(())
    }
}
