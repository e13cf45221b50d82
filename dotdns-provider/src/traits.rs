use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DnsRecord, Domain, Provider, ProviderType, UserDetails};

/// DNS 提供商 Trait
///
/// One implementation per [`ProviderType`]. Operations a vendor does not
/// support yet must fail with
/// [`ProviderError::UnsupportedProvider`](crate::ProviderError::UnsupportedProvider)
/// rather than return an empty result.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Which vendor this client talks to.
    fn provider_type(&self) -> ProviderType;

    /// 验证凭证是否有效
    async fn verify_credentials(&self) -> Result<()>;

    /// Account owner details for the authenticated credentials.
    async fn get_user_details(&self) -> Result<UserDetails>;

    /// 获取域名列表
    ///
    /// `owner` is the configured provider the returned domains belong to.
    async fn get_domains(&self, owner: &Provider) -> Result<Vec<Domain>>;

    /// 获取 DNS 记录列表
    async fn list_records(&self, domain: &Domain) -> Result<Vec<DnsRecord>>;

    /// 创建 DNS 记录
    async fn add_record(&self, domain: &Domain, record: &DnsRecord) -> Result<DnsRecord>;

    /// 删除 DNS 记录
    async fn delete_record(&self, domain: &Domain, record: &DnsRecord) -> Result<()>;
}
