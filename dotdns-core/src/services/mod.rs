//! 业务逻辑服务层

mod dns_service;
mod domain_service;
mod provider_service;

pub use dns_service::DnsService;
pub use domain_service::DomainService;
pub use provider_service::ProviderService;

use std::sync::Arc;

use dotdns_provider::{create_provider, DnsProvider, NetworkClient, ProviderError};

use crate::error::{CoreError, CoreResult};
use crate::traits::{CredentialStore, ProviderRepository};
use crate::types::{CloudflareCredentials, CredentialKey, Provider, ProviderCredentials, ProviderType};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。The network client and
/// credential store are built once per process and shared by every service.
pub struct ServiceContext {
    /// 共享网络客户端（含连通性监视器）
    pub network: Arc<NetworkClient>,
    /// 凭证存储
    pub credential_store: Arc<dyn CredentialStore>,
    /// Provider 持久化仓库
    pub provider_repository: Arc<dyn ProviderRepository>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        network: Arc<NetworkClient>,
        credential_store: Arc<dyn CredentialStore>,
        provider_repository: Arc<dyn ProviderRepository>,
    ) -> Self {
        Self {
            network,
            credential_store,
            provider_repository,
        }
    }

    /// Credentials attached to `provider`, falling back to the credential
    /// store when the stored provider carries none.
    pub async fn resolve_credentials(&self, provider: &Provider) -> CoreResult<ProviderCredentials> {
        if let Some(credentials) = &provider.credentials {
            return Ok(credentials.clone());
        }

        let provider_type = provider.provider_type;
        if provider_type != ProviderType::Cloudflare {
            return Err(ProviderError::UnsupportedProvider(provider_type).into());
        }

        let store = &self.credential_store;
        let load = |key: CredentialKey| async move {
            store
                .load(&key.for_provider(provider_type))
                .await
                .map(|v| v.filter(|s| !s.is_empty()))
        };

        if let Some(token) = load(CredentialKey::ApiToken).await? {
            return Ok(ProviderCredentials::Cloudflare(
                CloudflareCredentials::with_token(token),
            ));
        }
        match (
            load(CredentialKey::Email).await?,
            load(CredentialKey::GlobalKey).await?,
        ) {
            (Some(email), Some(key)) => Ok(ProviderCredentials::Cloudflare(
                CloudflareCredentials::with_global_key(email, key),
            )),
            _ => Err(CoreError::CredentialError(format!(
                "No stored credentials for {provider_type}"
            ))),
        }
    }

    /// 获取 Provider 客户端实例
    pub async fn client_for(&self, provider: &Provider) -> CoreResult<Arc<dyn DnsProvider>> {
        let credentials = self.resolve_credentials(provider).await?;
        Ok(create_provider(
            self.network.clone(),
            provider.provider_type,
            Some(credentials),
        )?)
    }

    /// 处理 Provider 错误，如果是凭证失效则将 provider 标记为未连接
    ///
    /// Only the stored connection flag changes; a rename or credential change
    /// made while the call was in flight is kept. A provider removed in the
    /// meantime stays removed.
    pub async fn handle_provider_error(&self, provider: &Provider, err: ProviderError) -> CoreError {
        if err == ProviderError::InvalidCredentials {
            match self.provider_repository.set_connected(provider.id, false).await {
                Ok(Some(_)) => log::warn!("Provider {} marked as disconnected: {err}", provider.id),
                Ok(None) => {}
                Err(e) => {
                    log::error!("Failed to mark provider {} as disconnected: {e}", provider.id);
                }
            }
        }
        CoreError::Provider(err)
    }
}
