//! Dynu API 类型定义

use serde::{Deserialize, Serialize};

/// `GET /dns`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynuDomainsResponse {
    #[serde(default)]
    pub domains: Vec<DynuDomain>,
}

/// Dynu 域名对象（`GET /dns/{id}`）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DynuDomain {
    pub id: i64,
    pub name: String,
    pub unicode_name: String,
    pub state: String,
    pub group: String,
    pub ipv4_address: String,
    pub ipv6_address: String,
    pub ttl: u32,
    pub ipv4: bool,
    pub ipv6: bool,
    pub ipv4_wildcard_alias: bool,
    pub ipv6_wildcard_alias: bool,
    pub created_on: String,
    pub updated_on: String,
}

/// `POST /dns/{id}` 请求体；Dynu 要求携带完整的域名设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynuDomainUpdate {
    pub name: String,
    pub group: String,
    pub ipv4_address: String,
    pub ipv6_address: String,
    pub ttl: u32,
    pub ipv4: bool,
    pub ipv6: bool,
    pub ipv4_wildcard_alias: bool,
    pub ipv6_wildcard_alias: bool,
}

impl From<&DynuDomain> for DynuDomainUpdate {
    fn from(d: &DynuDomain) -> Self {
        Self {
            name: d.name.clone(),
            group: d.group.clone(),
            ipv4_address: d.ipv4_address.clone(),
            ipv6_address: d.ipv6_address.clone(),
            ttl: d.ttl,
            ipv4: d.ipv4,
            ipv6: d.ipv6,
            ipv4_wildcard_alias: d.ipv4_wildcard_alias,
            ipv6_wildcard_alias: d.ipv6_wildcard_alias,
        }
    }
}

const fn enabled() -> bool {
    true
}

/// `GET /dns/{id}/record`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynuRecordsResponse {
    #[serde(default)]
    pub dns_records: Vec<DynuRecord>,
}

/// Dynu 记录对象；值分散在按类型区分的字段里
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DynuRecord {
    pub id: i64,
    pub domain_id: i64,
    pub domain_name: String,
    pub node_name: String,
    pub hostname: String,
    pub record_type: String,
    pub ttl: Option<u32>,
    /// 缺省视为启用
    #[serde(default = "enabled")]
    pub state: bool,
    pub content: String,
    pub updated_on: String,
    pub text_data: String,
    pub group: String,
    pub ipv4_address: String,
    pub ipv6_address: String,
    pub host: String,
    pub priority: Option<u16>,
    pub weight: Option<u16>,
    pub port: Option<u16>,
}

/// 创建/更新记录的请求体，只携带该类型需要的字段
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynuRecordBody {
    pub node_name: String,
    pub record_type: String,
    pub ttl: u32,
    pub state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_data: Option<String>,
}

/// 失败响应：`{"exception": {"statusCode", "type", "message"}}`，部分接口不带外层
#[derive(Debug, Deserialize)]
pub struct DynuErrorBody {
    pub exception: Option<DynuException>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DynuException {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: Option<String>,
}

impl DynuErrorBody {
    /// (type, message)
    pub fn into_parts(self) -> (Option<String>, Option<String>) {
        match self.exception {
            Some(ex) => (ex.error_type, ex.message),
            None => (self.error_type, self.message),
        }
    }
}
