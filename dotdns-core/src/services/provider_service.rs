//! Provider 连接与管理服务

use std::sync::Arc;

use dotdns_provider::{create_provider, ProviderError};
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{ConnectProviderRequest, ConnectionState, Provider};

/// Provider 连接与管理服务
///
/// Publishes the state of the current connect/reconnect attempt on a
/// `watch` channel; subscribers always see the latest state.
pub struct ProviderService {
    ctx: Arc<ServiceContext>,
    state: watch::Sender<ConnectionState>,
}

impl ProviderService {
    /// 创建 Provider 服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let (state, _rx) = watch::channel(ConnectionState::Unauthenticated);
        Self { ctx, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// 列出所有已配置的 provider
    pub async fn list_providers(&self) -> CoreResult<Vec<Provider>> {
        self.ctx.provider_repository.load_providers().await
    }

    /// 更新 provider（不存在时为空操作）
    pub async fn update_provider(&self, provider: &Provider) -> CoreResult<()> {
        self.ctx.provider_repository.update_provider(provider).await
    }

    /// 删除 provider
    ///
    /// Secrets stay in the credential store: keys are shared by every
    /// provider of the same type.
    pub async fn remove_provider(&self, id: Uuid) -> CoreResult<()> {
        self.ctx.provider_repository.remove_provider(id).await
    }

    /// Connect a new provider account and add it to the registry.
    ///
    /// With `verify_connection` the credentials are checked against the
    /// vendor and the provider is named after the account email. Without it
    /// the provider is stored unverified. With `save_credentials` the secrets
    /// for the chosen auth method are written to the credential store.
    pub async fn connect(&self, request: &ConnectProviderRequest) -> CoreResult<Provider> {
        if let Err(e) = request.validate() {
            return Err(self.fail(e, "Rejected provider connection"));
        }

        self.state.send_replace(ConnectionState::Verifying);
        match self.try_connect(request).await {
            Ok(provider) => {
                self.state.send_replace(ConnectionState::Authenticated);
                Ok(provider)
            }
            Err(e) => Err(self.fail(e, "Failed to connect provider")),
        }
    }

    async fn try_connect(&self, request: &ConnectProviderRequest) -> CoreResult<Provider> {
        let provider_type = request.provider_type;
        let credentials = request.credentials();
        let client = create_provider(
            self.ctx.network.clone(),
            provider_type,
            Some(credentials.clone()),
        )?;

        let provider = if request.verify_connection {
            client.verify_credentials().await?;
            let user = client.get_user_details().await?;
            log::info!(
                "Verified {provider_type} account {} ({})",
                user.email,
                user.full_name()
            );
            Provider::new(user.email.clone(), provider_type)
                .with_email(user.email)
                .with_credentials(credentials)
                .connected(true)
        } else {
            let mut provider = Provider::new(provider_type.display_name(), provider_type)
                .with_credentials(credentials);
            if !request.use_api_token && !request.email.is_empty() {
                provider.name.clone_from(&request.email);
                provider.email = Some(request.email.clone());
            }
            provider
        };

        // secrets first: a failed save must not leave a stored provider behind
        if request.save_credentials {
            for (key, value) in request.secret_entries() {
                self.ctx.credential_store.save(&key, value).await?;
            }
            log::debug!("Saved {provider_type} credentials");
        }

        self.ctx.provider_repository.add_provider(&provider).await?;

        Ok(provider)
    }

    /// Re-verify a stored provider and persist its connection flag.
    ///
    /// Only the stored connection flag is written, so edits made to the stored
    /// provider meanwhile are kept. Rejected credentials mark it disconnected.
    /// Other failures (offline, server errors) leave it untouched.
    pub async fn reconnect(&self, provider: &Provider) -> CoreResult<Provider> {
        self.state.send_replace(ConnectionState::Verifying);

        let client = match self.ctx.client_for(provider).await {
            Ok(client) => client,
            Err(e) => return Err(self.fail(e, "Failed to reconnect provider")),
        };

        match client.verify_credentials().await {
            Ok(()) => {
                let repository = &self.ctx.provider_repository;
                let stored = match repository.set_connected(provider.id, true).await {
                    Ok(stored) => stored,
                    Err(e) => return Err(self.fail(e, "Failed to store reconnected provider")),
                };
                self.state.send_replace(ConnectionState::Authenticated);
                Ok(stored.unwrap_or_else(|| provider.clone().connected(true)))
            }
            Err(ProviderError::InvalidCredentials) => {
                let repository = &self.ctx.provider_repository;
                if let Err(e) = repository.set_connected(provider.id, false).await {
                    return Err(self.fail(e, "Failed to store disconnected provider"));
                }
                Err(self.fail(
                    ProviderError::InvalidCredentials.into(),
                    "Provider credentials rejected",
                ))
            }
            Err(e) => Err(self.fail(e.into(), "Failed to reconnect provider")),
        }
    }

    fn fail(&self, err: CoreError, context: &str) -> CoreError {
        err.log(context);
        self.state
            .send_replace(ConnectionState::Failed(err.to_string()));
        err
    }
}
