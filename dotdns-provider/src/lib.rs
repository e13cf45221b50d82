//! # dotdns-provider
//!
//! Vendor integration layer for dotDNS: the data model shared by every
//! crate, the HTTP pipeline, and one client per DNS hosting vendor.
//!
//! ## Supported Providers
//!
//! | Provider | Status | Auth Method |
//! |----------|--------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | implemented | API token or email + global API key |
//! | Name.com | placeholder | - |
//! | GoDaddy | placeholder | - |
//! | AWS Route53 | placeholder | - |
//!
//! Placeholder vendors are accepted everywhere a [`ProviderType`] is, but
//! every client operation fails with [`ProviderError::UnsupportedProvider`].
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dotdns_provider::{
//!     CloudflareCredentials, DnsProvider, NetworkClient, Provider, ProviderCredentials,
//!     ProviderType, create_provider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let network = Arc::new(NetworkClient::with_default_transport()?);
//!     let credentials =
//!         ProviderCredentials::Cloudflare(CloudflareCredentials::with_token("your-token"));
//!
//!     let client = create_provider(network, ProviderType::Cloudflare, Some(credentials))?;
//!     client.verify_credentials().await?;
//!
//!     let owner = Provider::new("Cloudflare", ProviderType::Cloudflare).connected(true);
//!     for domain in client.get_domains(&owner).await? {
//!         println!("{} ({:?})", domain.name, domain.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Client operations return [`Result<T, ProviderError>`](ProviderError).
//! Network failures keep their [`NetworkError`] kind so callers can tell an
//! offline device from rejected credentials. Nothing is retried
//! automatically.

mod connectivity;
mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{CloudflareServiceError, NetworkError, ProviderError, Result};

// Re-export factory functions
pub use factory::{create_provider, create_provider_for, supported_provider_types};

pub use traits::DnsProvider;

// Re-export types
pub use types::{
    CloudflareAuth, CloudflareCredentials, DnsRecord, Domain, DomainStatus, MIN_TTL, Provider,
    ProviderCredentials, ProviderType, RecordType, RecordValidationError, UserDetails,
};

// Re-export networking
pub use connectivity::{ConnectivityMonitor, PathStatus, ProbeHandle, ProbeTarget};
pub use http_client::{
    HttpRequest, HttpResponse, HttpTransport, NetworkClient, REQUEST_TIMEOUT_SECS,
    ReqwestTransport, decode_json, describe_decoding_error,
};

// Re-export concrete providers
pub use providers::{CloudflareProvider, UnsupportedProvider};

pub use providers::common::{full_name_to_relative, normalize_domain_name, relative_to_full_name};
