//! 腾讯云 DNSPod API 类型定义

use serde::{Deserialize, Serialize};

// ============ 通用响应 ============

/// `{"Response": {...}}` 信封；先取出 Value 判断是否有 `Error`，再解析业务数据
#[derive(Debug, Deserialize)]
pub struct TencentResponse {
    #[serde(rename = "Response")]
    pub response: serde_json::Value,
}

/// `Response.Error`
#[derive(Debug, Deserialize)]
pub struct TencentError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

// ============ 域名 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDomainListRequest {
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainListResponse {
    pub domain_list: Option<Vec<DnspodDomain>>,
    pub domain_count_info: Option<DomainCountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainCountInfo {
    pub all_total: Option<u32>,
}

/// `DescribeDomainList` 中的域名条目
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnspodDomain {
    pub name: String,
    pub status: Option<String>,
    pub punycode: Option<String>,
    #[serde(rename = "TTL")]
    pub ttl: Option<u32>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDomainRequest<'a> {
    pub domain: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDomainResponse {
    pub domain_info: DnspodDomainInfo,
}

/// `DescribeDomain` 返回的域名详情
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnspodDomainInfo {
    pub domain: String,
    pub status: Option<String>,
    pub punycode: Option<String>,
    #[serde(rename = "TTL")]
    pub ttl: Option<u32>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}

// ============ 记录 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeRecordListRequest<'a> {
    pub domain: &'a str,
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordListResponse {
    pub record_list: Option<Vec<DnspodRecord>>,
    pub record_count_info: Option<RecordCountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordCountInfo {
    pub total_count: Option<u32>,
}

/// `DescribeRecordList` 中的记录条目
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnspodRecord {
    pub record_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(default)]
    pub value: String,
    pub status: Option<String>,
    #[serde(rename = "TTL")]
    pub ttl: Option<u32>,
    #[serde(rename = "MX")]
    pub mx: Option<u16>,
    pub weight: Option<u32>,
    pub line: Option<String>,
    pub remark: Option<String>,
    pub updated_on: Option<String>,
}

/// `CreateRecord` / `ModifyRecord` 共用的请求体；`RecordId` 仅在修改时出现
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordWriteRequest {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<u64>,
    pub sub_domain: String,
    pub record_type: String,
    pub record_line: String,
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "MX", skip_serializing_if = "Option::is_none")]
    pub mx: Option<u16>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRecordResponse {
    pub record_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRecordRequest<'a> {
    pub domain: &'a str,
    pub record_id: u64,
}
