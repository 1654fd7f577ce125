//! TC3-HMAC-SHA256 签名
//! 参考: <https://cloud.tencent.com/document/api/1427/56189>

use chrono::DateTime;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::providers::common::hmac_sha256;

use super::{DNSPOD_API_HOST, DNSPOD_SERVICE, TencentCredentials};

const ALGORITHM: &str = "TC3-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// 生成 `Authorization` 头
///
/// 签名日期取自 `timestamp`（UTC），与 `X-TC-Timestamp` 保持一致。
pub(crate) fn sign(
    creds: TencentCredentials<'_>,
    action: &str,
    payload: &str,
    timestamp: i64,
) -> Result<String> {
    let provider = "tencentcloud";
    let date = DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or_else(|| crate::error::ProviderError::InvalidParameter {
            provider: provider.to_string(),
            param: "timestamp".to_string(),
            detail: format!("out of range: {timestamp}"),
        })?;

    // 1. 规范请求串
    let canonical_headers = format!(
        "content-type:application/json; charset=utf-8\nhost:{DNSPOD_API_HOST}\nx-tc-action:{}\n",
        action.to_lowercase()
    );
    let hashed_payload = hex::encode(Sha256::digest(payload.as_bytes()));
    let canonical_request =
        format!("POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{hashed_payload}");

    // 2. 待签名字符串
    let credential_scope = format!("{date}/{DNSPOD_SERVICE}/tc3_request");
    let string_to_sign = format!(
        "{ALGORITHM}\n{timestamp}\n{credential_scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    // 3. 派生签名密钥
    let secret_date = hmac_sha256(
        format!("TC3{}", creds.secret_key).as_bytes(),
        date.as_bytes(),
        provider,
    )?;
    let secret_service = hmac_sha256(&secret_date, DNSPOD_SERVICE.as_bytes(), provider)?;
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request", provider)?;
    let signature = hex::encode(hmac_sha256(
        &secret_signing,
        string_to_sign.as_bytes(),
        provider,
    )?);

    Ok(format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        creds.secret_id
    ))
}
