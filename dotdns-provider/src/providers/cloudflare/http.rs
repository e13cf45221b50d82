//! Cloudflare HTTP 请求方法

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CloudflareServiceError, NetworkError};
use crate::types::CloudflareAuth;

use super::{CloudflareProvider, CloudflareResponse, MAX_PAGES};

type CfResult<T> = std::result::Result<T, CloudflareServiceError>;

impl CloudflareProvider {
    /// 根据凭证选择认证请求头
    ///
    /// Fails with `InvalidCredentials` for an incomplete set, before anything
    /// touches the network.
    pub(crate) fn auth_headers(&self) -> CfResult<Vec<(String, String)>> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];

        match self.credentials.auth() {
            Some(CloudflareAuth::ApiToken(token)) => {
                headers.push(("Authorization".to_string(), format!("Bearer {token}")));
            }
            Some(CloudflareAuth::GlobalKey { email, key }) => {
                headers.push(("X-Auth-Email".to_string(), email.to_string()));
                headers.push(("X-Auth-Key".to_string(), key.to_string()));
            }
            None => {
                log::warn!("Cloudflare credentials are incomplete, request not sent");
                return Err(CloudflareServiceError::InvalidCredentials);
            }
        }

        Ok(headers)
    }

    /// 执行请求并返回完整响应信封（不检查 `success`）
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> CfResult<CloudflareResponse<T>> {
        let headers = self.auth_headers()?;
        let url = format!("{}{path}", self.base_url);

        let response: CloudflareResponse<T> =
            self.network.request(&url, method, &headers, body).await?;

        for message in &response.messages {
            log::debug!("Cloudflare message: {}", message.text());
        }
        if !response.success {
            log::error!("API 错误: {}", response.first_error_message());
        }

        Ok(response)
    }

    /// 执行 GET 请求，按 `result_info.total_pages` 逐页拉取并合并结果
    ///
    /// Stops early at an empty page, and never fetches more than `MAX_PAGES`.
    pub(crate) async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
    ) -> CfResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1_u32;

        loop {
            let response = self
                .call::<Vec<T>>(
                    Method::GET,
                    &format!("{path}?page={page}&per_page={per_page}"),
                    None,
                )
                .await?;

            let total_pages = response
                .result_info
                .as_ref()
                .and_then(|info| info.total_pages)
                .unwrap_or(1);
            let batch = Self::unwrap_result(response)?;
            if batch.is_empty() {
                break;
            }
            items.extend(batch);

            if page >= total_pages {
                break;
            }
            if page >= MAX_PAGES {
                log::warn!("{path}: stopped after {MAX_PAGES} of {total_pages} pages");
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// 执行 POST 请求（JSON body）
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> CfResult<T> {
        let body = serde_json::to_vec(body).map_err(|e| {
            CloudflareServiceError::NetworkError(NetworkError::Unknown(format!(
                "Failed to serialize request body: {e}"
            )))
        })?;
        let response = self.call::<T>(Method::POST, path, Some(body)).await?;
        Self::unwrap_result(response)
    }

    /// 执行 DELETE 请求，只检查 `success`
    pub(crate) async fn delete(&self, path: &str) -> CfResult<()> {
        let response = self
            .call::<serde_json::Value>(Method::DELETE, path, None)
            .await?;
        if response.success {
            Ok(())
        } else {
            Err(CloudflareServiceError::ApiError(
                response.first_error_message(),
            ))
        }
    }

    /// `success == false` surfaces the first vendor error; a missing `result`
    /// on success is a contract violation, never an empty value.
    pub(crate) fn unwrap_result<T>(response: CloudflareResponse<T>) -> CfResult<T> {
        if !response.success {
            return Err(CloudflareServiceError::ApiError(
                response.first_error_message(),
            ));
        }
        response.result.ok_or_else(|| {
            CloudflareServiceError::ApiError("Response is missing the result field".to_string())
        })
    }
}
