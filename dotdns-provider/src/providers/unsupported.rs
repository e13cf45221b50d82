//! Placeholder client for vendors without an implementation

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{DnsRecord, Domain, Provider, ProviderType, UserDetails};

/// Client for a [`ProviderType`] that has no working integration yet.
///
/// Every operation fails with [`ProviderError::UnsupportedProvider`]; nothing
/// is sent over the network.
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedProvider {
    provider_type: ProviderType,
}

impl UnsupportedProvider {
    pub fn new(provider_type: ProviderType) -> Self {
        Self { provider_type }
    }

    fn unsupported<T>(&self) -> Result<T> {
        log::info!("{} is not supported yet", self.provider_type);
        Err(ProviderError::UnsupportedProvider(self.provider_type))
    }
}

#[async_trait]
impl DnsProvider for UnsupportedProvider {
    fn provider_type(&self) -> ProviderType {
        self.provider_type
    }

    async fn verify_credentials(&self) -> Result<()> {
        self.unsupported()
    }

    async fn get_user_details(&self) -> Result<UserDetails> {
        self.unsupported()
    }

    async fn get_domains(&self, _owner: &Provider) -> Result<Vec<Domain>> {
        self.unsupported()
    }

    async fn list_records(&self, _domain: &Domain) -> Result<Vec<DnsRecord>> {
        self.unsupported()
    }

    async fn add_record(&self, _domain: &Domain, _record: &DnsRecord) -> Result<DnsRecord> {
        self.unsupported()
    }

    async fn delete_record(&self, _domain: &Domain, _record: &DnsRecord) -> Result<()> {
        self.unsupported()
    }
}
