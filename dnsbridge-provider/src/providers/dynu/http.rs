//! Dynu HTTP 请求方法

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::DynuErrorBody;
use super::{DYNU_API_BASE, DynuProvider};

impl DynuProvider {
    /// 发送请求；2xx 时解析响应体
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        api_key: &str,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: &ErrorContext,
    ) -> Result<T> {
        let url = format!("{DYNU_API_BASE}{path}");
        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header("API-Key", api_key)
            .header("Accept", "application/json");
        if let Some(body) = body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(HttpUtils::to_json(body, self.provider_name())?);
        }

        let (status, response_text) =
            HttpUtils::execute_request(builder, self.provider_name(), method.as_str(), &url)
                .await?;

        if !(200..300).contains(&status) {
            return Err(self.error_from_response(status, &response_text, context.clone()));
        }

        HttpUtils::parse_json(&response_text, self.provider_name())
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        api_key: &str,
        path: &str,
        context: &ErrorContext,
    ) -> Result<T> {
        self.request::<T, ()>(api_key, Method::GET, path, None, context)
            .await
    }

    /// Dynu 的创建与更新都是 POST
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        api_key: &str,
        path: &str,
        body: &B,
        context: &ErrorContext,
    ) -> Result<T> {
        self.request(api_key, Method::POST, path, Some(body), context)
            .await
    }

    pub(crate) async fn delete(
        &self,
        api_key: &str,
        path: &str,
        context: &ErrorContext,
    ) -> Result<()> {
        self.request::<serde_json::Value, ()>(api_key, Method::DELETE, path, None, context)
            .await
            .map(|_| ())
    }

    /// 非 2xx：优先使用 `exception.message`，认证与 404 按状态码归类
    pub(crate) fn error_from_response(
        &self,
        status: u16,
        response_text: &str,
        context: ErrorContext,
    ) -> ProviderError {
        let (error_type, message) = serde_json::from_str::<DynuErrorBody>(response_text)
            .map(DynuErrorBody::into_parts)
            .unwrap_or((None, None));
        let message = message.unwrap_or_else(|| truncate_for_log(response_text));
        log::warn!("[dynu] HTTP {status}: {message}");

        match (status, error_type) {
            (401 | 403 | 404, _) | (_, None) => self.status_error(status, message, context),
            (_, Some(error_type)) => {
                self.map_error(RawApiError::with_code(error_type, message), context)
            }
        }
    }
}
