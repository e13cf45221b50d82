//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use dotdns_provider::{NetworkError, ProviderError};

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Durable record store failure (read, write, rename)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Secret store failure
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// Caller input rejected before any I/O
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, unsupported vendor, offline, ...), used
    /// for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }

    /// Log this error at the level [`is_expected`](Self::is_expected) selects.
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

impl From<NetworkError> for CoreError {
    fn from(err: NetworkError) -> Self {
        Self::Provider(ProviderError::NetworkError(err))
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
