//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dotdns_provider::{
    CloudflareCredentials, CloudflareProvider, ConnectivityMonitor, DnsProvider, HttpRequest,
    HttpResponse, HttpTransport, NetworkClient, NetworkError, Provider, ProviderCredentials,
    ProviderType, create_provider,
};

pub const TEST_API_BASE: &str = "https://api.cloudflare.test/client/v4";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: {} is not set", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {res:?}", format_args!($($msg)+));
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ Mock transport ============

/// Canned-response transport. Routes are matched by substring against the
/// request URL, first registered wins.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<(String, u16, String)>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url_part: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .push((url_part.to_string(), status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn header(request: &HttpRequest, name: &str) -> Option<String> {
        request
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let url = request.url.clone();
        self.calls.lock().unwrap().push(request);

        let routes = self.routes.lock().unwrap();
        routes
            .iter()
            .find(|(part, _, _)| url.contains(part.as_str()))
            .map(|(_, status, body)| HttpResponse {
                status: *status,
                body: body.clone(),
            })
            .ok_or_else(|| NetworkError::Unknown(format!("no mock route for {url}")))
    }
}

/// A Cloudflare client talking to `transport`.
pub fn cloudflare_with(
    transport: Arc<MockTransport>,
    credentials: CloudflareCredentials,
) -> CloudflareProvider {
    cloudflare_with_monitor(transport, credentials, ConnectivityMonitor::new())
}

pub fn cloudflare_with_monitor(
    transport: Arc<MockTransport>,
    credentials: CloudflareCredentials,
    monitor: ConnectivityMonitor,
) -> CloudflareProvider {
    let network = Arc::new(NetworkClient::new(transport, monitor));
    CloudflareProvider::with_base_url(network, credentials, TEST_API_BASE)
}

pub fn cloudflare_owner() -> Provider {
    Provider::new("ops@example.com", ProviderType::Cloudflare).connected(true)
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

// ============ Live context ============

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub owner: Provider,
    pub domain: String,
}

impl TestContext {
    /// 创建 Cloudflare 测试上下文
    pub fn cloudflare() -> Option<Self> {
        let token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let network = Arc::new(NetworkClient::with_default_transport().ok()?);
        let credentials =
            ProviderCredentials::Cloudflare(CloudflareCredentials::with_token(token));
        let provider =
            create_provider(network, ProviderType::Cloudflare, Some(credentials)).ok()?;

        Some(Self {
            provider,
            owner: cloudflare_owner(),
            domain,
        })
    }
}
