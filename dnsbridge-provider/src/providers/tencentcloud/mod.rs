//! 腾讯云 DNSPod Provider（API 3.0，TC3-HMAC-SHA256 签名）

mod error;
mod http;
mod provider;
mod sign;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_credential_pair};

pub(crate) const DNSPOD_API_HOST: &str = "dnspod.tencentcloudapi.com";
pub(crate) const DNSPOD_SERVICE: &str = "dnspod";
pub(crate) const DNSPOD_VERSION: &str = "2021-03-23";
/// 单页最大条数
pub(crate) const MAX_PAGE_SIZE: u32 = 100;
/// TTL 缺失或为 0 时使用的值
pub(crate) const DEFAULT_TTL: u32 = 600;
/// 默认线路
pub(crate) const DEFAULT_RECORD_LINE: &str = "默认";

/// 腾讯云 DNSPod Provider
///
/// 凭证格式为 `"SecretId,SecretKey"`。
pub struct TencentCloudProvider {
    pub(crate) client: Client,
}

impl TencentCloudProvider {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_http_client("tencentcloud")?,
        })
    }
}

/// 解析后的 API 密钥对，仅在单次调用内存活
#[derive(Clone, Copy)]
pub(crate) struct TencentCredentials<'a> {
    pub secret_id: &'a str,
    pub secret_key: &'a str,
}

impl<'a> TencentCredentials<'a> {
    pub fn parse(credential: &'a str) -> Result<Self> {
        let (secret_id, secret_key) = parse_credential_pair(credential, "tencentcloud")?;
        Ok(Self {
            secret_id,
            secret_key,
        })
    }
}

impl std::fmt::Debug for TencentCredentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TencentCredentials")
            .field(
                "secret_id",
                &crate::utils::log_sanitizer::mask_secret(self.secret_id),
            )
            .field("secret_key", &"****")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair() {
        let creds = TencentCredentials::parse("AKIDexample, secret").unwrap();
        assert_eq!(creds.secret_id, "AKIDexample");
        assert_eq!(creds.secret_key, "secret");
    }

    #[test]
    fn debug_masks_secrets() {
        let creds = TencentCredentials::parse("AKIDexample123,topsecretvalue").unwrap();
        let dbg = format!("{creds:?}");
        assert!(!dbg.contains("topsecretvalue"));
        assert!(!dbg.contains("AKIDexample123"));
        assert!(dbg.contains("AKID****"));
    }
}
