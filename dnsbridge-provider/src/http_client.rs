//! 通用 HTTP 请求处理
//!
//! 各 Provider 自己构造 `RequestBuilder`（签名、认证头差异太大，不强行统一），
//! 这里只负责发送、日志、超时/限流/网关错误的归类，以及 JSON 解析。
//!
//! 不做自动重试：瞬时错误原样返回，由调用方决定。

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP 工具函数集合
pub struct HttpUtils;

impl HttpUtils {
    /// 发送请求并返回 `(status_code, body)`
    ///
    /// - 传输层超时 → [`ProviderError::Timeout`]
    /// - 其他传输层失败 → [`ProviderError::NetworkError`]
    /// - HTTP 429 → [`ProviderError::RateLimited`]（读取 `Retry-After`）
    /// - HTTP 502/503/504 → [`ProviderError::NetworkError`]
    ///
    /// 其余状态码连同响应体一起返回，由 Provider 自行解析业务错误。
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(provider_name, &e))?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        // body 被消费前先取 Retry-After
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(provider_name, &e)
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        if let Some(err) = classify_status(provider_name, status_code, retry_after, &response_text)
        {
            log::warn!("[{provider_name}] {method_name} {url_or_action} failed: {err}");
            return Err(err);
        }

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// 解析 JSON 响应，失败时返回 [`ProviderError::ParseError`]
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// 序列化请求体，失败时返回 [`ProviderError::SerializationError`]
    pub fn to_json<T>(body: &T, provider_name: &str) -> Result<String, ProviderError>
    where
        T: serde::Serialize + ?Sized,
    {
        serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        })
    }
}

fn transport_error(provider_name: &str, e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    }
}

/// 与具体供应商无关的状态码归类；返回 `None` 表示交给 Provider 解析
fn classify_status(
    provider_name: &str,
    status_code: u16,
    retry_after: Option<u64>,
    body: &str,
) -> Option<ProviderError> {
    match status_code {
        429 => Some(ProviderError::RateLimited {
            provider: provider_name.to_string(),
            retry_after,
            raw_message: (!body.is_empty()).then(|| truncate_for_log(body)),
        }),
        502..=504 => Some(ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("HTTP {status_code}: {}", truncate_for_log(body)),
        }),
        _ => None,
    }
}
