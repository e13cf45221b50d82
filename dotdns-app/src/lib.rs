//! Platform-agnostic application bootstrap for dotDNS.
//!
//! Provides `AppConfig` (data directory, keychain service, probe settings),
//! `AppState` (service container) and `AppStateBuilder` (adapter injection).
//!
//! ```no_run
//! use dotdns_app::{AppConfig, AppStateBuilder};
//!
//! # async fn run() -> dotdns_core::CoreResult<()> {
//! let state = AppStateBuilder::new(AppConfig::load()?).build()?;
//! for provider in state.provider_service.list_providers().await? {
//!     println!("{}", provider.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
mod config;

pub use config::{
    default_data_dir, AppConfig, ProbeConfig, CONFIG_FILE_NAME, ENV_DATA_DIR, ENV_KEYRING_SERVICE,
};

use std::sync::Arc;

use dotdns_core::error::{CoreError, CoreResult};
use dotdns_core::services::{DnsService, DomainService, ProviderService, ServiceContext};
use dotdns_core::storage::ProviderStorage;
use dotdns_core::traits::{CredentialStore, RecordStore};
use dotdns_provider::{NetworkClient, ProbeHandle};

use crate::adapters::FileRecordStore;

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder` and keeps it for the process lifetime.
pub struct AppState {
    pub config: AppConfig,
    /// Service context (network client and storage adapters)
    pub ctx: Arc<ServiceContext>,
    pub provider_service: ProviderService,
    pub domain_service: DomainService,
    pub dns_service: DnsService,
    /// Running connectivity probe; dropped with the state.
    probe: Option<ProbeHandle>,
}

impl AppState {
    pub fn network(&self) -> &NetworkClient {
        &self.ctx.network
    }

    pub fn is_probing(&self) -> bool {
        self.probe.is_some()
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Defaults
/// - `credential_store`: system keychain under `config.keyring_service`
///   (requires the `keyring-store` feature)
/// - `record_store`: JSON files in `config.data_dir`
/// - `network`: reqwest transport with a fresh connectivity monitor
pub struct AppStateBuilder {
    config: AppConfig,
    credential_store: Option<Arc<dyn CredentialStore>>,
    record_store: Option<Arc<dyn RecordStore>>,
    network: Option<Arc<NetworkClient>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            credential_store: None,
            record_store: None,
            network: None,
        }
    }

    #[must_use]
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    #[must_use]
    pub fn record_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.record_store = Some(store);
        self
    }

    #[must_use]
    pub fn network(mut self, network: Arc<NetworkClient>) -> Self {
        self.network = Some(network);
        self
    }

    /// Build the `AppState`.
    ///
    /// When `config.connectivity_probe` is set the probe task is spawned here,
    /// so this must then be called from within a tokio runtime.
    ///
    /// # Errors
    /// - `CoreError::ValidationError` if no credential store was given and the
    ///   `keyring-store` feature is off, or a probe is configured outside a runtime
    /// - `CoreError::Provider` if the default HTTP transport cannot be built
    pub fn build(self) -> CoreResult<AppState> {
        let credential_store = match self.credential_store {
            Some(store) => store,
            None => default_credential_store(&self.config)?,
        };
        let record_store: Arc<dyn RecordStore> = match self.record_store {
            Some(store) => store,
            None => Arc::new(FileRecordStore::new(&self.config.data_dir)),
        };
        let network = match self.network {
            Some(network) => network,
            None => Arc::new(NetworkClient::with_default_transport()?),
        };

        let probe = match &self.config.connectivity_probe {
            Some(probe) => {
                if tokio::runtime::Handle::try_current().is_err() {
                    return Err(CoreError::ValidationError(
                        "connectivity probe requires a tokio runtime".to_string(),
                    ));
                }
                Some(network.connectivity().spawn_probe(probe.target()))
            }
            None => None,
        };

        let ctx = Arc::new(ServiceContext::new(
            network,
            credential_store,
            Arc::new(ProviderStorage::new(record_store)),
        ));

        log::info!(
            "App state ready (data dir: {})",
            self.config.data_dir.display()
        );

        Ok(AppState {
            config: self.config,
            provider_service: ProviderService::new(Arc::clone(&ctx)),
            domain_service: DomainService::new(Arc::clone(&ctx)),
            dns_service: DnsService::new(Arc::clone(&ctx)),
            ctx,
            probe,
        })
    }
}

#[cfg(feature = "keyring-store")]
fn default_credential_store(config: &AppConfig) -> CoreResult<Arc<dyn CredentialStore>> {
    Ok(Arc::new(adapters::KeyringCredentialStore::new(
        config.keyring_service.clone(),
    )))
}

#[cfg(not(feature = "keyring-store"))]
fn default_credential_store(_config: &AppConfig) -> CoreResult<Arc<dyn CredentialStore>> {
    Err(CoreError::ValidationError(
        "credential_store is required without the keyring-store feature".to_string(),
    ))
}
