//! Provider 公共工具函数

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;

use crate::error::{ProviderError, Result};

type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 凭证解析 ============

/// 单一 token 凭证：去除首尾空白，不能为空
pub fn parse_single_credential<'a>(credential: &'a str, provider: &str) -> Result<&'a str> {
    let token = credential.trim();
    if token.is_empty() {
        return Err(ProviderError::InvalidCredentials {
            provider: provider.to_string(),
            raw_message: Some("API key is required".to_string()),
        });
    }
    Ok(token)
}

/// `"id,secret"` 形式的凭证：按第一个逗号切分，两段都去空白且不能为空
///
/// 错误消息不包含凭证内容。
pub fn parse_credential_pair<'a>(
    credential: &'a str,
    provider: &str,
) -> Result<(&'a str, &'a str)> {
    let invalid = || ProviderError::InvalidCredentials {
        provider: provider.to_string(),
        raw_message: Some("expected credential format 'id,secret'".to_string()),
    };

    let (id, secret) = credential.split_once(',').ok_or_else(invalid)?;
    let (id, secret) = (id.trim(), secret.trim());
    if id.is_empty() || secret.is_empty() {
        return Err(invalid());
    }
    Ok((id, secret))
}

// ============ HMAC-SHA256 ============

/// HMAC-SHA256 计算（TC3 签名使用）
pub fn hmac_sha256(key: &[u8], data: &[u8], provider: &str) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| ProviderError::InvalidCredentials {
            provider: provider.to_string(),
            raw_message: Some(format!("HMAC key rejected: {e}")),
        })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 将完整域名转换为相对名称
/// 如: "www.example.com" + "example.com" -> "www"
/// 如: "example.com" + "example.com" -> "@"
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full.eq_ignore_ascii_case(&zone) {
        "@".to_string()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full
    }
}

/// 将相对名称转换为完整域名
/// 如: "www" + "example.com" -> "www.example.com"
/// 如: "@" + "example.com" -> "example.com"
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    let relative = relative_name.trim();

    if relative == "@" || relative.is_empty() {
        zone
    } else {
        format!("{relative}.{zone}")
    }
}
