//! Durable named record abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Named blobs that survive process restarts.
///
/// A failed `write` must leave the previously stored bytes intact.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read a record; `None` when it was never written.
    async fn read(&self, name: &str) -> CoreResult<Option<Vec<u8>>>;

    /// Replace a record's bytes.
    async fn write(&self, name: &str, bytes: &[u8]) -> CoreResult<()>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    async fn read(&self, name: &str) -> CoreResult<Option<Vec<u8>>> {
        (**self).read(name).await
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> CoreResult<()> {
        (**self).write(name, bytes).await
    }
}
