use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum TTL (seconds) accepted for a DNS record.
pub const MIN_TTL: u32 = 60;

// ============ Provider Types ============

/// Identifies which DNS hosting vendor a [`Provider`] talks to.
///
/// Serialized with the vendor's display name, which is also what the
/// persisted provider list stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderType {
    #[serde(rename = "Cloudflare")]
    Cloudflare,
    #[serde(rename = "Name.com")]
    NameDotCom,
    #[serde(rename = "GoDaddy")]
    GoDaddy,
    #[serde(rename = "AWS Route53")]
    Route53,
}

impl ProviderType {
    /// All known provider types, in display order.
    pub const ALL: [Self; 4] = [Self::Cloudflare, Self::NameDotCom, Self::GoDaddy, Self::Route53];

    /// Human readable vendor name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Cloudflare => "Cloudflare",
            Self::NameDotCom => "Name.com",
            Self::GoDaddy => "GoDaddy",
            Self::Route53 => "AWS Route53",
        }
    }

    /// Stable prefix used for secret-store keys (`<prefix>_api_token`, ...).
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Cloudflare => "cloudflare",
            Self::NameDotCom => "namecom",
            Self::GoDaddy => "godaddy",
            Self::Route53 => "route53",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============ Credentials ============

/// Cloudflare authentication material.
///
/// A usable set carries either an API token, or an account email together
/// with the global API key. When both are present the token wins.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudflareCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_api_key: Option<String>,
}

/// The authentication method resolved from [`CloudflareCredentials`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CloudflareAuth<'a> {
    /// `Authorization: Bearer <token>`
    ApiToken(&'a str),
    /// `X-Auth-Email` / `X-Auth-Key`
    GlobalKey { email: &'a str, key: &'a str },
}

impl CloudflareCredentials {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_global_key(email: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            token: None,
            email: Some(email.into()),
            global_api_key: Some(key.into()),
        }
    }

    /// Resolve which authentication method these credentials allow.
    ///
    /// Empty strings count as absent. Returns `None` for an incomplete set.
    pub fn auth(&self) -> Option<CloudflareAuth<'_>> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        if let Some(token) = present(&self.token) {
            return Some(CloudflareAuth::ApiToken(token));
        }
        match (present(&self.email), present(&self.global_api_key)) {
            (Some(email), Some(key)) => Some(CloudflareAuth::GlobalKey { email, key }),
            _ => None,
        }
    }

    pub fn uses_token(&self) -> bool {
        matches!(self.auth(), Some(CloudflareAuth::ApiToken(_)))
    }
}

// secrets stay out of logs
impl fmt::Debug for CloudflareCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("CloudflareCredentials")
            .field("token", &mask(&self.token))
            .field("email", &self.email)
            .field("global_api_key", &mask(&self.global_api_key))
            .finish()
    }
}

/// Per-provider-type credential payload attached to a [`Provider`].
///
/// Encoded as `{"type": "<provider>", "credentials": {...}}`; the `type`
/// discriminant is what lets new credential shapes be added without breaking
/// stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "credentials", rename_all = "lowercase")]
pub enum ProviderCredentials {
    Cloudflare(CloudflareCredentials),
}

impl ProviderCredentials {
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::Cloudflare(_) => ProviderType::Cloudflare,
        }
    }
}

// ============ Provider ============

/// A configured connection to one DNS hosting vendor account.
///
/// Identity is `id` only: two values with the same id compare equal and hash
/// identically even if other fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<ProviderCredentials>,
}

impl Provider {
    /// New, disconnected provider with a fresh id.
    pub fn new(name: impl Into<String>, provider_type: ProviderType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            provider_type,
            is_connected: false,
            email: None,
            credentials: None,
        }
    }

    #[must_use]
    pub fn connected(mut self, is_connected: bool) -> Self {
        self.is_connected = is_connected;
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: ProviderCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

impl PartialEq for Provider {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Provider {}

impl Hash for Provider {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============ Account ============

/// Account owner details as reported by the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserDetails {
    /// First and last name joined by a space, skipping absent parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ============ Domain Types ============

/// Status of a domain/zone within a DNS provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainStatus {
    Active,
    Inactive,
    Transferring,
}

/// A domain (zone) served by a configured provider.
///
/// Not persisted; rebuilt from the vendor's zone listing each session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: Uuid,
    /// Vendor-side zone identifier, used for record operations.
    pub zone_id: String,
    pub name: String,
    pub provider: Provider,
    pub status: DomainStatus,
    pub record_count: u32,
}

// ============ DNS Record Types ============

/// DNS record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Srv,
}

impl RecordType {
    pub const ALL: [Self; 6] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Srv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
        }
    }

    /// Only MX and SRV records carry a priority.
    pub fn has_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported record type: {s}"))
    }
}

/// Why a record failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordValidationError {
    #[error("record name must not be empty")]
    EmptyName,
    #[error("record content must not be empty")]
    EmptyContent,
    #[error("TTL {0}s is below the {min}s minimum", min = MIN_TTL)]
    TtlTooLow(u32),
}

/// A DNS record backed by a provider. No local copy is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    pub id: Uuid,
    /// Vendor-side record identifier; `None` until the record exists remotely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    pub provider: Provider,
}

impl DnsRecord {
    /// Build a record that does not exist remotely yet.
    ///
    /// `priority` is dropped for types other than MX and SRV.
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        content: impl Into<String>,
        ttl: u32,
        priority: Option<u16>,
        provider: Provider,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            remote_id: None,
            record_type,
            name: name.into(),
            content: content.into(),
            ttl,
            priority: priority.filter(|_| record_type.has_priority()),
            provider,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        if self.content.is_empty() {
            return Err(RecordValidationError::EmptyContent);
        }
        if self.ttl < MIN_TTL {
            return Err(RecordValidationError::TtlTooLow(self.ttl));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
