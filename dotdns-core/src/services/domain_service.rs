//! 域名管理服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{Domain, Provider};

/// 域名管理服务
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    /// 创建域名服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出 provider 下的所有域名
    ///
    /// Rejected credentials mark the provider disconnected in the registry.
    pub async fn list_domains(&self, provider: &Provider) -> CoreResult<Vec<Domain>> {
        let client = self.ctx.client_for(provider).await?;

        match client.get_domains(provider).await {
            Ok(domains) => {
                log::debug!("{} domains for provider {}", domains.len(), provider.id);
                Ok(domains)
            }
            Err(e) => Err(self.ctx.handle_provider_error(provider, e).await),
        }
    }
}
