//! Provider persistence abstract Trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::types::Provider;

/// Provider Registry Trait
///
/// Single source of truth for the configured providers. Order is preserved
/// across every operation.
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Load every stored provider; empty when nothing has been stored yet.
    async fn load_providers(&self) -> CoreResult<Vec<Provider>>;

    /// Append a provider. No de-duplication by id.
    async fn add_provider(&self, provider: &Provider) -> CoreResult<()>;

    /// Replace the first stored provider with the same id.
    ///
    /// Unknown ids are ignored and nothing is written.
    async fn update_provider(&self, provider: &Provider) -> CoreResult<()>;

    /// Set `is_connected` on the stored provider with this id, leaving every
    /// other field as stored.
    ///
    /// Returns the stored provider after the change, or `None` (and writes
    /// nothing) when the id is unknown.
    async fn set_connected(&self, id: Uuid, is_connected: bool) -> CoreResult<Option<Provider>>;

    /// Remove every stored provider with this id; no-op when none match.
    async fn remove_provider(&self, id: Uuid) -> CoreResult<()>;
}
