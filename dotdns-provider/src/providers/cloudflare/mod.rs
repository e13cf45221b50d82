//! Cloudflare DNS Provider

mod http;
mod provider;
mod types;

use std::sync::Arc;

use crate::http_client::NetworkClient;
use crate::types::CloudflareCredentials;

pub(crate) use types::{
    CloudflareDnsRecord, CloudflareResponse, CloudflareTokenStatus, CloudflareZone,
};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;
/// 分页拉取的页数上限，不信任服务端返回的 `total_pages`
pub(crate) const MAX_PAGES: u32 = 500;

/// Cloudflare DNS Provider
pub struct CloudflareProvider {
    pub(crate) network: Arc<NetworkClient>,
    pub(crate) credentials: CloudflareCredentials,
    pub(crate) base_url: String,
}

impl CloudflareProvider {
    pub fn new(network: Arc<NetworkClient>, credentials: CloudflareCredentials) -> Self {
        Self::with_base_url(network, credentials, CF_API_BASE)
    }

    /// Point the client at a different API root (mock servers, proxies).
    pub fn with_base_url(
        network: Arc<NetworkClient>,
        credentials: CloudflareCredentials,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            network,
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}
