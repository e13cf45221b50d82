//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};

/// Cloudflare API 通用响应
///
/// `result` may be `null` or absent; callers decide whether that is an error.
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub errors: Vec<CloudflareError>,
    #[serde(default)]
    pub messages: Vec<CloudflareMessage>,
    pub result: Option<T>,
    pub result_info: Option<CloudflareResultInfo>,
}

impl<T> CloudflareResponse<T> {
    /// First vendor error message, or a generic fallback.
    pub fn first_error_message(&self) -> String {
        self.errors
            .first()
            .map_or_else(|| "Unknown error".to_string(), |e| e.message.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    #[allow(dead_code)]
    pub code: i32,
    pub message: String,
}

/// `messages` entries are either bare strings or `{code?, message}` objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CloudflareMessage {
    Text(String),
    Detailed {
        #[allow(dead_code)]
        #[serde(default)]
        code: Option<i32>,
        message: String,
    },
}

impl CloudflareMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(message) | Self::Detailed { message, .. } => message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    #[allow(dead_code)]
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
}

/// `/user/tokens/verify` 结果
#[derive(Debug, Deserialize)]
pub struct CloudflareTokenStatus {
    #[allow(dead_code)]
    pub id: String,
    pub status: Option<String>,
}

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub priority: Option<u16>,
}

/// Cloudflare DNS Record 结构（创建请求）
#[derive(Debug, Serialize)]
pub struct CreateRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: String,
    pub content: &'a str,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}
