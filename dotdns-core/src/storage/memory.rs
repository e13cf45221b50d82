//! In-memory stores for tests and ephemeral sessions

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::traits::{CredentialStore, RecordStore};

/// [`RecordStore`] backed by a map; contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn read(&self, name: &str) -> CoreResult<Option<Vec<u8>>> {
        Ok(self.records.read().await.get(name).cloned())
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> CoreResult<()> {
        self.records
            .write()
            .await
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// [`CredentialStore`] backed by a map.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.secrets.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn save(&self, key: &str, value: &str) -> CoreResult<()> {
        self.secrets
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn load(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.secrets.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        self.secrets.write().await.remove(key);
        Ok(())
    }
}
