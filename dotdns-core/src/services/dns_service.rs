//! DNS 记录管理服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{DnsRecord, Domain};

/// DNS 记录管理服务
pub struct DnsService {
    ctx: Arc<ServiceContext>,
}

impl DnsService {
    /// 创建 DNS 服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出域名下的所有 DNS 记录
    pub async fn list_records(&self, domain: &Domain) -> CoreResult<Vec<DnsRecord>> {
        let client = self.ctx.client_for(&domain.provider).await?;
        match client.list_records(domain).await {
            Ok(records) => Ok(records),
            Err(e) => Err(self.ctx.handle_provider_error(&domain.provider, e).await),
        }
    }

    /// 创建 DNS 记录
    ///
    /// Invalid records (empty name or content, TTL below the minimum) are
    /// rejected before any request is made.
    pub async fn add_record(&self, domain: &Domain, record: &DnsRecord) -> CoreResult<DnsRecord> {
        record
            .validate()
            .map_err(|e| CoreError::ValidationError(e.to_string()))?;

        let client = self.ctx.client_for(&domain.provider).await?;
        match client.add_record(domain, record).await {
            Ok(created) => {
                log::info!(
                    "Created {} record {} in {}",
                    created.record_type,
                    created.name,
                    domain.name
                );
                Ok(created)
            }
            Err(e) => Err(self.ctx.handle_provider_error(&domain.provider, e).await),
        }
    }

    /// 删除 DNS 记录
    pub async fn delete_record(&self, domain: &Domain, record: &DnsRecord) -> CoreResult<()> {
        let client = self.ctx.client_for(&domain.provider).await?;
        match client.delete_record(domain, record).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.ctx.handle_provider_error(&domain.provider, e).await),
        }
    }
}
