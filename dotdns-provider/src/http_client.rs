//! HTTP transport and request pipeline
//!
//! Split in two layers:
//! - [`HttpTransport`] moves raw bytes. The default implementation wraps
//!   `reqwest`; tests plug in their own double.
//! - [`NetworkClient`] adds the shared behaviour every vendor client relies on:
//!   connectivity fail-fast, status-code mapping and JSON decoding into
//!   [`NetworkError`].
//!
//! No retries happen at this layer. Every failure goes straight back to the caller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::connectivity::ConnectivityMonitor;
use crate::error::NetworkError;
use crate::utils::log_sanitizer::{redact_headers, truncate_for_log};

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 请求超时（秒），固定值
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A raw outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// A raw response: status code plus body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a single request over the wire.
///
/// Implementations report transport failures (timeouts, TLS errors,
/// connection resets) as [`NetworkError::Unknown`]; status codes are left to
/// [`NetworkClient`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError>;
}

/// `reqwest`-backed transport with fixed connect and request timeouts.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, NetworkError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NetworkError::Unknown(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let url = reqwest::Url::parse(&request.url).map_err(|_| NetworkError::InvalidUrl)?;

        let mut builder = self.client.request(request.method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| NetworkError::Unknown(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::Unknown(format!("Failed to read response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

/// Shared request pipeline used by every vendor client.
///
/// Built once per process and handed around as `Arc<NetworkClient>`.
pub struct NetworkClient {
    transport: Arc<dyn HttpTransport>,
    connectivity: ConnectivityMonitor,
}

impl NetworkClient {
    pub fn new(transport: Arc<dyn HttpTransport>, connectivity: ConnectivityMonitor) -> Self {
        Self {
            transport,
            connectivity,
        }
    }

    /// `reqwest` transport with a fresh connectivity monitor.
    pub fn with_default_transport() -> Result<Self, NetworkError> {
        Ok(Self::new(
            Arc::new(ReqwestTransport::new()?),
            ConnectivityMonitor::new(),
        ))
    }

    pub fn connectivity(&self) -> &ConnectivityMonitor {
        &self.connectivity
    }

    /// Fail fast when the network path is known to be down.
    pub fn check_connection(&self) -> Result<(), NetworkError> {
        if self.connectivity.is_connected() {
            Ok(())
        } else {
            Err(NetworkError::NoInternetConnection)
        }
    }

    /// Perform a request and decode a 2xx JSON body into `T`.
    ///
    /// Status mapping:
    /// - `200..=299` → decoded body
    /// - `404` → [`NetworkError::DnsResolutionFailed`]
    /// - anything else (including 401/403) → [`NetworkError::ServerError`]
    pub async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        method: Method,
        headers: &[(String, String)],
        body: Option<Vec<u8>>,
    ) -> Result<T, NetworkError> {
        self.check_connection()?;

        log::debug!("{method} {url}");
        log::trace!("Request headers: {}", redact_headers(headers));

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.to_string(),
                headers: headers.to_vec(),
                body,
            })
            .await
            .inspect_err(|e| log::warn!("Transport failure for {url}: {e}"))?;

        log::debug!("Response Status: {}", response.status);
        log::debug!("Response Body: {}", truncate_for_log(&response.body));

        match response.status {
            200..=299 => decode_json(&response.body),
            404 => Err(NetworkError::DnsResolutionFailed),
            code => Err(NetworkError::ServerError(code)),
        }
    }
}

/// Decode a JSON body, describing failures in human terms.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, NetworkError> {
    serde_json::from_str(body).map_err(|e| {
        let detail = describe_decoding_error(&e);
        log::error!("JSON parse failed: {detail}");
        log::error!("Raw response: {}", truncate_for_log(body));
        NetworkError::DecodingError(detail)
    })
}

/// Classify a `serde_json` error as missing key, type mismatch, value not
/// found, or corrupted payload.
pub fn describe_decoding_error(err: &serde_json::Error) -> String {
    match err.classify() {
        Category::Syntax | Category::Eof | Category::Io => format!("Data corrupted: {err}"),
        Category::Data => {
            let message = err.to_string();
            if message.starts_with("missing field") {
                let key = message.split('`').nth(1).unwrap_or("?");
                format!("Key '{key}' not found: {message}")
            } else if message.starts_with("invalid type: null") {
                format!("Value not found: {message}")
            } else if message.starts_with("invalid type")
                || message.starts_with("invalid value")
                || message.starts_with("invalid length")
            {
                format!("Type mismatch: {message}")
            } else {
                format!("Invalid data: {message}")
            }
        }
    }
}
