//! 凭证存储抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// 凭证存储 Trait
///
/// Durable secret storage looked up by logical key (see
/// [`CredentialKey`](crate::types::CredentialKey)), never by provider id.
///
/// 平台实现:
/// - Desktop: `KeyringCredentialStore` (keyring crate, `dotdns-app`)
/// - Tests / ephemeral sessions: [`InMemoryCredentialStore`](crate::storage::InMemoryCredentialStore)
///
/// Implementations serialize their own access; callers may invoke them
/// concurrently.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// 保存凭证
    ///
    /// Last write wins. Overwriting an existing key is not an error.
    async fn save(&self, key: &str, value: &str) -> CoreResult<()>;

    /// 读取凭证
    ///
    /// # Returns
    /// * `Ok(Some(value))` - 凭证存在
    /// * `Ok(None)` - 凭证不存在
    async fn load(&self, key: &str) -> CoreResult<Option<String>>;

    /// 删除凭证，不存在时为空操作
    async fn delete(&self, key: &str) -> CoreResult<()>;
}
