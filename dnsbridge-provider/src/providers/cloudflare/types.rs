//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
    pub result_info: Option<CloudflareResultInfo>,
}

impl<T> CloudflareResponse<T> {
    /// 第一条错误的 (code, message)
    pub fn first_error(&self) -> (String, String) {
        self.errors.first().map_or_else(
            || (String::new(), "Unknown error".to_string()),
            |e| (e.code.to_string(), e.message.clone()),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created_on: Option<String>,
    pub modified_on: Option<String>,
}

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    pub ttl: Option<u32>,
    pub priority: Option<u16>,
    pub proxied: Option<bool>,
    pub created_on: Option<String>,
    pub modified_on: Option<String>,
    /// SRV/CAA 等复杂记录类型的结构化数据
    pub data: Option<Value>,
}

/// 创建/更新记录的请求体
#[derive(Debug, Serialize)]
pub struct CloudflareRecordBody {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}
