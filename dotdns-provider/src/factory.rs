//! Provider factory functions.

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::http_client::NetworkClient;
use crate::providers::{CloudflareProvider, UnsupportedProvider};
use crate::traits::DnsProvider;
use crate::types::{Provider, ProviderCredentials, ProviderType};

/// Creates a [`DnsProvider`] client for `provider_type`.
///
/// Cloudflare requires Cloudflare credentials and fails with
/// [`ProviderError::InvalidCredentials`] without them. Every other type yields
/// an [`UnsupportedProvider`] whose operations all fail.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use dotdns_provider::{
///     CloudflareCredentials, NetworkClient, ProviderCredentials, ProviderType, create_provider,
/// };
///
/// let network = Arc::new(NetworkClient::with_default_transport().unwrap());
/// let client = create_provider(
///     network,
///     ProviderType::Cloudflare,
///     Some(ProviderCredentials::Cloudflare(CloudflareCredentials::with_token("token"))),
/// )
/// .unwrap();
/// ```
pub fn create_provider(
    network: Arc<NetworkClient>,
    provider_type: ProviderType,
    credentials: Option<ProviderCredentials>,
) -> Result<Arc<dyn DnsProvider>> {
    match provider_type {
        ProviderType::Cloudflare => match credentials {
            Some(ProviderCredentials::Cloudflare(creds)) => {
                Ok(Arc::new(CloudflareProvider::new(network, creds)))
            }
            None => {
                log::warn!("Cloudflare client requested without credentials");
                Err(ProviderError::InvalidCredentials)
            }
        },
        other => Ok(Arc::new(UnsupportedProvider::new(other))),
    }
}

/// Creates a client for a configured [`Provider`] using its attached
/// credentials.
pub fn create_provider_for(
    network: Arc<NetworkClient>,
    provider: &Provider,
) -> Result<Arc<dyn DnsProvider>> {
    create_provider(network, provider.provider_type, provider.credentials.clone())
}

/// Provider types with a working client.
pub fn supported_provider_types() -> Vec<ProviderType> {
    ProviderType::ALL
        .into_iter()
        .filter(|t| matches!(t, ProviderType::Cloudflare))
        .collect()
}
