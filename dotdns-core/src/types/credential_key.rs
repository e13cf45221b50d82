//! Logical secret-store keys

use std::fmt;

use dotdns_provider::ProviderType;

/// Which secret a credential-store entry holds.
///
/// Keys are scoped by provider type only, so two configured providers of the
/// same type share (and overwrite) the same entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    ApiToken,
    Email,
    GlobalKey,
}

impl CredentialKey {
    pub const ALL: [Self; 3] = [Self::ApiToken, Self::Email, Self::GlobalKey];

    fn suffix(self) -> &'static str {
        match self {
            Self::ApiToken => "api_token",
            Self::Email => "email",
            Self::GlobalKey => "global_key",
        }
    }

    /// Store key for this secret, e.g. `cloudflare_api_token`.
    pub fn for_provider(self, provider_type: ProviderType) -> String {
        format!("{}_{}", provider_type.key_prefix(), self.suffix())
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
