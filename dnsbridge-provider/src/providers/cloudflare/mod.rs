//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) use types::{CloudflareDnsRecord, CloudflareRecordBody, CloudflareResponse, CloudflareZone};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;
/// 读取时 TTL 为 1（自动）或缺失时的展示值
pub(crate) const DEFAULT_READ_TTL: u32 = 300;
/// 写入时 TTL 为 0 时使用的"自动"值
pub(crate) const AUTO_TTL: u32 = 1;
/// MX/SRV 未指定优先级时的默认值
pub(crate) const DEFAULT_PRIORITY: u16 = 10;

/// Cloudflare DNS Provider
///
/// 凭证为 API Token（Bearer 认证）。
pub struct CloudflareProvider {
    pub(crate) client: Client,
}

impl CloudflareProvider {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_http_client("cloudflare")?,
        })
    }
}
