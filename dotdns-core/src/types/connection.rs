//! Provider connection flow types

use serde::{Deserialize, Serialize};

use dotdns_provider::{CloudflareCredentials, ProviderCredentials, ProviderError, ProviderType};

use crate::error::{CoreError, CoreResult};
use crate::types::CredentialKey;

/// Progress of a connect/reconnect attempt, published on a `watch` channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message")]
pub enum ConnectionState {
    #[default]
    Unauthenticated,
    Verifying,
    Authenticated,
    Failed(String),
}

impl ConnectionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Authenticated | Self::Failed(_))
    }
}

/// Raw input for connecting a new provider account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectProviderRequest {
    pub provider_type: ProviderType,
    /// Authenticate with an API token rather than email + global key.
    pub use_api_token: bool,
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub global_api_key: String,
    /// Write the secrets to the credential store after connecting.
    pub save_credentials: bool,
    /// Verify against the vendor before storing the provider.
    pub verify_connection: bool,
}

impl ConnectProviderRequest {
    pub fn cloudflare_token(token: impl Into<String>) -> Self {
        Self {
            provider_type: ProviderType::Cloudflare,
            use_api_token: true,
            api_token: token.into(),
            email: String::new(),
            global_api_key: String::new(),
            save_credentials: true,
            verify_connection: true,
        }
    }

    pub fn cloudflare_global_key(email: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            use_api_token: false,
            email: email.into(),
            global_api_key: key.into(),
            ..Self::cloudflare_token(String::new())
        }
    }

    #[must_use]
    pub fn save_credentials(mut self, save: bool) -> Self {
        self.save_credentials = save;
        self
    }

    #[must_use]
    pub fn verify_connection(mut self, verify: bool) -> Self {
        self.verify_connection = verify;
        self
    }

    /// The selected auth method has all its fields filled in, and the vendor
    /// is one with a working client.
    pub fn is_valid(&self) -> bool {
        match self.provider_type {
            ProviderType::Cloudflare => {
                if self.use_api_token {
                    !self.api_token.is_empty()
                } else {
                    !self.email.is_empty() && !self.global_api_key.is_empty()
                }
            }
            _ => false,
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.provider_type != ProviderType::Cloudflare {
            return Err(ProviderError::UnsupportedProvider(self.provider_type).into());
        }
        if self.is_valid() {
            Ok(())
        } else if self.use_api_token {
            Err(CoreError::ValidationError("API token is required".to_string()))
        } else {
            Err(CoreError::ValidationError(
                "Email and global API key are required".to_string(),
            ))
        }
    }

    /// Credentials for the selected auth method only.
    pub fn credentials(&self) -> ProviderCredentials {
        let creds = if self.use_api_token {
            CloudflareCredentials::with_token(self.api_token.clone())
        } else {
            CloudflareCredentials::with_global_key(self.email.clone(), self.global_api_key.clone())
        };
        ProviderCredentials::Cloudflare(creds)
    }

    /// Secret-store entries written when `save_credentials` is set.
    pub fn secret_entries(&self) -> Vec<(String, &str)> {
        let key = |k: CredentialKey| k.for_provider(self.provider_type);
        if self.use_api_token {
            vec![(key(CredentialKey::ApiToken), self.api_token.as_str())]
        } else {
            vec![
                (key(CredentialKey::Email), self.email.as_str()),
                (key(CredentialKey::GlobalKey), self.global_api_key.as_str()),
            ]
        }
    }
}

// secrets stay out of logs
impl std::fmt::Debug for ConnectProviderRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectProviderRequest")
            .field("provider_type", &self.provider_type)
            .field("use_api_token", &self.use_api_token)
            .field("email", &self.email)
            .field("save_credentials", &self.save_credentials)
            .field("verify_connection", &self.verify_connection)
            .finish_non_exhaustive()
    }
}
