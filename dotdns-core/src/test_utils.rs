//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dotdns_provider::{
    ConnectivityMonitor, HttpRequest, HttpResponse, HttpTransport, NetworkClient, NetworkError,
};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::CredentialStore;
use crate::storage::{InMemoryCredentialStore, InMemoryRecordStore, ProviderStorage};
use crate::types::{
    CloudflareCredentials, Domain, DomainStatus, Provider, ProviderCredentials, ProviderType,
};

// ===== Canned Cloudflare bodies =====

pub const TOKEN_VERIFY_ACTIVE: &str = r#"{"success":true,"errors":[],"messages":[],
    "result":{"id":"tok","status":"active"}}"#;

pub const TOKEN_VERIFY_DISABLED: &str = r#"{"success":true,"errors":[],"messages":[],
    "result":{"id":"tok","status":"disabled"}}"#;

pub const USER_OK: &str = r#"{"success":true,"errors":[],"messages":[],
    "result":{"id":"u1","email":"ops@example.com","first_name":"Ops","last_name":"Team"}}"#;

pub const ZONES_OK: &str = r#"{"success":true,"errors":[],"messages":[],
    "result":[{"id":"z1","name":"example.com","status":"active"}],
    "result_info":{"page":1,"total_pages":1}}"#;

pub const RECORDS_OK: &str = r#"{"success":true,"errors":[],"messages":[],
    "result":[{"id":"r1","type":"A","name":"www.example.com","content":"192.0.2.1","ttl":300}],
    "result_info":{"page":1,"total_pages":1}}"#;

// ===== StubTransport =====

/// Canned responses matched by URL substring, first registered wins.
/// Unmatched requests fail with `NetworkError::Unknown`.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<Vec<(String, u16, String)>>,
    calls: Mutex<Vec<HttpRequest>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StubTransport {
    pub fn respond(&self, url_part: &str, status: u16, body: &str) {
        lock(&self.routes).push((url_part.to_string(), status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let url = request.url.clone();
        lock(&self.calls).push(request);
        lock(&self.routes)
            .iter()
            .find(|(part, _, _)| url.contains(part.as_str()))
            .map(|(_, status, body)| HttpResponse {
                status: *status,
                body: body.clone(),
            })
            .ok_or_else(|| NetworkError::Unknown(format!("no stub for {url}")))
    }
}

// ===== FailingCredentialStore =====

/// Credential store whose writes always fail; reads find nothing.
pub struct FailingCredentialStore;

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn save(&self, key: &str, _value: &str) -> CoreResult<()> {
        Err(CoreError::CredentialError(format!("keychain locked: {key}")))
    }

    async fn load(&self, _key: &str) -> CoreResult<Option<String>> {
        Ok(None)
    }

    async fn delete(&self, _key: &str) -> CoreResult<()> {
        Ok(())
    }
}

// ===== 工厂方法 =====

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub transport: Arc<StubTransport>,
    pub credentials: Arc<InMemoryCredentialStore>,
}

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> TestContext {
    let transport = Arc::new(StubTransport::default());
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let network = Arc::new(NetworkClient::new(
        transport.clone(),
        ConnectivityMonitor::new(),
    ));
    let repository = Arc::new(ProviderStorage::new(InMemoryRecordStore::new()));

    let ctx = Arc::new(ServiceContext::new(
        network,
        credentials.clone(),
        repository,
    ));

    TestContext {
        ctx,
        transport,
        credentials,
    }
}

/// 已连接的 Cloudflare provider（token 认证）
pub fn cloudflare_provider() -> Provider {
    Provider::new("ops@example.com", ProviderType::Cloudflare)
        .with_email("ops@example.com")
        .with_credentials(ProviderCredentials::Cloudflare(
            CloudflareCredentials::with_token("test-token-12345"),
        ))
        .connected(true)
}

pub fn test_domain() -> Domain {
    Domain {
        id: Uuid::new_v4(),
        zone_id: "z1".to_string(),
        name: "example.com".to_string(),
        provider: cloudflare_provider(),
        status: DomainStatus::Active,
        record_count: 0,
    }
}
