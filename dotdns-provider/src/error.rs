use serde::Serialize;
use thiserror::Error;

use crate::types::ProviderType;

/// Transport-level failures produced by [`NetworkClient`](crate::NetworkClient).
///
/// 401/403 are reported as [`ServerError`](Self::ServerError) here; vendor
/// clients upgrade them to their own "invalid credentials" kind.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum NetworkError {
    /// The last known network path status was unsatisfied.
    #[error("No internet connection. Please check your network settings.")]
    NoInternetConnection,

    /// The endpoint answered 404 and is treated as unreachable.
    #[error("Unable to connect to server. Please check your internet connection.")]
    DnsResolutionFailed,

    /// The request URL could not be parsed.
    #[error("Invalid URL configuration.")]
    InvalidUrl,

    /// Non-success HTTP status.
    #[error("Server error occurred (Code: {0})")]
    ServerError(u16),

    /// The 2xx body did not match the expected shape.
    #[error("Data format error: {0}")]
    DecodingError(String),

    /// Timeouts, TLS failures, connection resets and other transport failures.
    #[error("An error occurred: {0}")]
    Unknown(String),
}

/// Errors specific to the Cloudflare client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloudflareServiceError {
    #[error("Invalid API credentials. Please check your API token or key.")]
    InvalidCredentials,

    #[error("Cloudflare API Error: {0}")]
    ApiError(String),

    /// Declared for completeness; no status code is mapped to it.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    #[error("Network Error: {0}")]
    NetworkError(NetworkError),
}

impl From<NetworkError> for CloudflareServiceError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::ServerError(401 | 403) => Self::InvalidCredentials,
            other => Self::NetworkError(other),
        }
    }
}

/// Unified error type returned by every [`DnsProvider`](crate::DnsProvider) operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ProviderError {
    /// The provider type has no working client yet.
    #[error("This DNS provider is not yet supported ({0})")]
    UnsupportedProvider(ProviderType),

    #[error("Invalid provider credentials")]
    InvalidCredentials,

    #[error("Provider API Error: {0}")]
    ApiError(String),

    #[error("{0}")]
    NetworkError(NetworkError),
}

impl ProviderError {
    /// 是否为预期行为（用户输入、未实现的服务商等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedProvider(_)
                | Self::InvalidCredentials
                | Self::NetworkError(NetworkError::NoInternetConnection)
        )
    }
}

impl From<NetworkError> for ProviderError {
    fn from(err: NetworkError) -> Self {
        Self::NetworkError(err)
    }
}

impl From<CloudflareServiceError> for ProviderError {
    fn from(err: CloudflareServiceError) -> Self {
        match err {
            CloudflareServiceError::InvalidCredentials => Self::InvalidCredentials,
            CloudflareServiceError::ApiError(message) => Self::ApiError(message),
            CloudflareServiceError::RateLimitExceeded => {
                Self::ApiError(CloudflareServiceError::RateLimitExceeded.to_string())
            }
            CloudflareServiceError::NetworkError(inner) => Self::NetworkError(inner),
        }
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
