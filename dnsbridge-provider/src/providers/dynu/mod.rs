//! Dynu.com DNS Provider
//!
//! Dynu 把根域名的 A/AAAA 地址存放在域名对象上（而不是独立记录），
//! 因此这里把它们合成为 `root-a` / `root-aaaa` 伪记录，写入时改写域名对象。

mod error;
mod http;
mod provider;
mod root;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) const DYNU_API_BASE: &str = "https://api.dynu.com/v2";
/// TTL 缺失时的默认值
pub(crate) const DEFAULT_TTL: u32 = 300;

/// Dynu DNS Provider
///
/// 凭证为 API Key，通过 `API-Key` 请求头发送。
pub struct DynuProvider {
    pub(crate) client: Client,
}

impl DynuProvider {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_http_client("dynu")?,
        })
    }
}
