//! 类型定义模块

mod connection;
mod credential_key;

pub use connection::{ConnectProviderRequest, ConnectionState};
pub use credential_key::CredentialKey;

// Re-export provider 库的公共类型
pub use dotdns_provider::{
    CloudflareCredentials, DnsRecord, Domain, DomainStatus, Provider, ProviderCredentials,
    ProviderType, RecordType, UserDetails,
};
