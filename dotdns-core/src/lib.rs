//! dotDNS Core Library
//!
//! Platform-independent business logic on top of `dotdns-provider`:
//! - Provider registry persisted as one JSON record ([`storage::ProviderStorage`])
//! - Credential store abstraction keyed by logical secret names
//! - Services for connecting providers, listing domains and managing records
//!
//! Storage is abstracted through traits; `dotdns-app` supplies the keyring
//! and file-backed implementations.

pub mod error;
pub mod services;
pub mod storage;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{DnsService, DomainService, ProviderService, ServiceContext};
pub use traits::{CredentialStore, ProviderRepository, RecordStore};
