//! Persisted provider list

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::traits::{ProviderRepository, RecordStore};
use crate::types::Provider;

/// Name of the durable record holding the provider list.
pub const PROVIDERS_RECORD: &str = "stored_providers";

/// [`ProviderRepository`] that keeps the whole ordered list as one JSON
/// record in a [`RecordStore`].
///
/// Every mutation reads the current list, applies the change and writes the
/// full list back before returning. Mutations are serialized by an internal
/// lock, so concurrent callers never lose each other's writes.
pub struct ProviderStorage<S: RecordStore> {
    store: S,
    lock: Mutex<()>,
}

impl<S: RecordStore> ProviderStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// The underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn read_all(&self) -> CoreResult<Vec<Provider>> {
        match self.store.read(PROVIDERS_RECORD).await? {
            None => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                log::error!("Stored provider list is corrupt: {e}");
                CoreError::SerializationError(format!("Failed to decode providers: {e}"))
            }),
        }
    }

    async fn write_all(&self, providers: &[Provider]) -> CoreResult<()> {
        let bytes = serde_json::to_vec(providers)
            .map_err(|e| CoreError::SerializationError(format!("Failed to encode providers: {e}")))?;
        self.store.write(PROVIDERS_RECORD, &bytes).await
    }
}

#[async_trait]
impl<S: RecordStore> ProviderRepository for ProviderStorage<S> {
    async fn load_providers(&self) -> CoreResult<Vec<Provider>> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    async fn add_provider(&self, provider: &Provider) -> CoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut providers = self.read_all().await?;
        providers.push(provider.clone());
        self.write_all(&providers).await?;
        log::info!("Provider added: {} ({})", provider.name, provider.id);
        Ok(())
    }

    async fn update_provider(&self, provider: &Provider) -> CoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut providers = self.read_all().await?;
        let Some(slot) = providers.iter_mut().find(|p| p.id == provider.id) else {
            log::debug!("Update skipped, provider {} is not stored", provider.id);
            return Ok(());
        };
        *slot = provider.clone();
        self.write_all(&providers).await
    }

    async fn set_connected(&self, id: Uuid, is_connected: bool) -> CoreResult<Option<Provider>> {
        let _guard = self.lock.lock().await;
        let mut providers = self.read_all().await?;
        let Some(slot) = providers.iter_mut().find(|p| p.id == id) else {
            log::debug!("Connection flag not stored, provider {id} is gone");
            return Ok(None);
        };
        if slot.is_connected == is_connected {
            return Ok(Some(slot.clone()));
        }
        slot.is_connected = is_connected;
        let updated = slot.clone();
        self.write_all(&providers).await?;
        log::info!("Provider {id} connected: {is_connected}");
        Ok(Some(updated))
    }

    async fn remove_provider(&self, id: Uuid) -> CoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut providers = self.read_all().await?;
        let before = providers.len();
        providers.retain(|p| p.id != id);
        if providers.len() == before {
            return Ok(());
        }
        self.write_all(&providers).await?;
        log::info!("Provider removed: {id}");
        Ok(())
    }
}
