//! 腾讯云 API 请求（签名 + 信封解析）

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::sign::sign;
use super::types::{TencentError, TencentResponse};
use super::{DNSPOD_API_HOST, DNSPOD_VERSION, TencentCloudProvider, TencentCredentials};

impl TencentCloudProvider {
    /// 执行请求；外层 `Err` 为传输/解析失败，内层 `Err` 为业务错误（未映射）
    pub(crate) async fn request_raw<T: DeserializeOwned, B: Serialize>(
        &self,
        creds: TencentCredentials<'_>,
        action: &str,
        body: &B,
    ) -> Result<std::result::Result<T, RawApiError>> {
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        let timestamp = Utc::now().timestamp();
        let authorization = sign(creds, action, &payload, timestamp)?;

        let url = format!("https://{DNSPOD_API_HOST}");
        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json; charset=utf-8")
            .header("Host", DNSPOD_API_HOST)
            .header("X-TC-Action", action)
            .header("X-TC-Version", DNSPOD_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("Authorization", authorization)
            .body(payload);

        let (_status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("Action: {action}"),
        )
        .await?;

        let envelope: TencentResponse = HttpUtils::parse_json(&response_text, self.provider_name())?;
        self.unwrap_envelope(envelope)
    }

    /// 执行请求并把业务错误映射为 `ProviderError`
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        creds: TencentCredentials<'_>,
        action: &'static str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        match self.request_raw(creds, action, body).await? {
            Ok(data) => Ok(data),
            Err(raw) => {
                let ctx = ErrorContext {
                    operation: ctx.operation.or(Some(action)),
                    ..ctx
                };
                Err(self.map_error(raw, ctx))
            }
        }
    }

    fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        envelope: TencentResponse,
    ) -> Result<std::result::Result<T, RawApiError>> {
        if let Some(error) = envelope.response.get("Error") {
            let error: TencentError = serde_json::from_value(error.clone())
                .map_err(|e| self.parse_error(format!("malformed Error object: {e}")))?;
            log::warn!("[tencentcloud] API error: {} - {}", error.code, error.message);
            return Ok(Err(RawApiError::with_code(error.code, error.message)));
        }

        serde_json::from_value(envelope.response)
            .map(Ok)
            .map_err(|e| self.parse_error(e))
    }
}
