//! Cloudflare HTTP 请求方法

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::CloudflareResultInfo;
use super::{CF_API_BASE, CloudflareProvider, CloudflareRecordBody, CloudflareResponse};

impl CloudflareProvider {
    /// 发送请求并解包 `{success, result, errors, result_info}` 信封
    async fn request<T: DeserializeOwned>(
        &self,
        token: &str,
        method: Method,
        path: &str,
        body: Option<&CloudflareRecordBody>,
        context: &ErrorContext,
    ) -> Result<(Option<T>, Option<CloudflareResultInfo>)> {
        let url = format!("{CF_API_BASE}{path}");
        let mut builder = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(token);
        if let Some(body) = body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(HttpUtils::to_json(body, self.provider_name())?);
        }

        let (status, response_text) =
            HttpUtils::execute_request(builder, self.provider_name(), method.as_str(), &url)
                .await?;

        self.read_envelope(status, response_text, context)
    }

    /// 解包响应信封；`success = false` 时按第一条错误码映射
    pub(crate) fn read_envelope<T: DeserializeOwned>(
        &self,
        status: u16,
        response_text: String,
        context: &ErrorContext,
    ) -> Result<(Option<T>, Option<CloudflareResultInfo>)> {
        let cf_response: CloudflareResponse<T> =
            match serde_json::from_str::<CloudflareResponse<T>>(&response_text) {
                Ok(resp) => resp,
                // 非 2xx 且不是标准信封：按状态码归类
                Err(_) if !(200..300).contains(&status) => {
                    return Err(self.status_error(status, response_text, context.clone()));
                }
                Err(_) => HttpUtils::parse_json(&response_text, self.provider_name())?,
            };

        if !cf_response.success {
            let (code, message) = cf_response.first_error();
            log::warn!("[cloudflare] API error {code}: {message}");
            return Err(self.map_error(RawApiError::with_code(code, message), context.clone()));
        }

        Ok((cf_response.result, cf_response.result_info))
    }

    /// GET 单个对象
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        context: &ErrorContext,
    ) -> Result<T> {
        let (result, _) = self.request(token, Method::GET, path, None, context).await?;
        result.ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// GET 列表，逐页读取直到 `result_info.total_pages`
    pub(crate) async fn get_all_pages<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        per_page: u32,
        context: &ErrorContext,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1_u32;

        loop {
            let paged = format!("{path}?page={page}&per_page={per_page}");
            let (result, info) = self
                .request::<Vec<T>>(token, Method::GET, &paged, None, context)
                .await?;
            let batch = result.unwrap_or_default();
            let fetched = batch.len();
            items.extend(batch);

            let total_pages = info.map_or(0, |i| i.total_pages);
            if fetched == 0 || page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// POST / PUT 记录体
    pub(crate) async fn send_record<T: DeserializeOwned>(
        &self,
        token: &str,
        method: Method,
        path: &str,
        body: &CloudflareRecordBody,
        context: &ErrorContext,
    ) -> Result<T> {
        let (result, _) = self
            .request(token, method, path, Some(body), context)
            .await?;
        result.ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// DELETE
    pub(crate) async fn delete(
        &self,
        token: &str,
        path: &str,
        context: &ErrorContext,
    ) -> Result<()> {
        self.request::<serde_json::Value>(token, Method::DELETE, path, None, context)
            .await
            .map(|_| ())
    }
}
