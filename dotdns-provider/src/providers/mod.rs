//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod cloudflare;
mod unsupported;

pub use cloudflare::CloudflareProvider;
pub use unsupported::UnsupportedProvider;
