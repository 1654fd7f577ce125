//! Cloudflare 错误码映射
//!
//! 只收录本适配器调用的接口（zones、dns_records）实际会返回的错误码，
//! 其余一律落到 `Unknown`，消息带上操作名。
//! 参考: <https://developers.cloudflare.com/api/>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

/// 错误码归类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CfFailure {
    Auth,
    BadField(&'static str),
    Conflict,
    RecordGone,
    ZoneGone,
    Quota,
    Throttled,
}

fn classify(code: &str) -> Option<CfFailure> {
    let failure = match code.parse::<u32>().ok()? {
        // 请求头无效 / 无权访问 / 认证失败
        6003 | 6111 | 9109 | 10000 => CfFailure::Auth,
        9000 => CfFailure::BadField("name"),
        // A/AAAA 地址格式、MX 目标不是主机名
        9005 | 9006 | 9009 => CfFailure::BadField("content"),
        9021 => CfFailure::BadField("ttl"),
        1004 => CfFailure::BadField("record"),
        // 81053..81058: 同名记录冲突的各种说法
        81053..=81058 => CfFailure::Conflict,
        81044 => CfFailure::RecordGone,
        7003 => CfFailure::ZoneGone,
        81045 => CfFailure::Quota,
        971 => CfFailure::Throttled,
        _ => return None,
    };
    Some(failure)
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| "<unknown>".to_string())
}

impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let Some(failure) = raw.code.as_deref().and_then(classify) else {
            return self.unknown_error(raw, &context);
        };
        let provider = self.provider_name().to_string();
        let raw_message = Some(raw.message.clone());

        match failure {
            CfFailure::Auth => ProviderError::InvalidCredentials {
                provider,
                raw_message,
            },
            CfFailure::BadField(param) => ProviderError::InvalidParameter {
                provider,
                param: param.to_string(),
                detail: raw.message,
            },
            CfFailure::Conflict => ProviderError::RecordExists {
                provider,
                record_name: or_unknown(context.record_name),
                raw_message,
            },
            CfFailure::RecordGone => ProviderError::RecordNotFound {
                provider,
                record_id: or_unknown(context.record_id),
                raw_message,
            },
            CfFailure::ZoneGone => ProviderError::DomainNotFound {
                provider,
                domain: or_unknown(context.domain),
                raw_message,
            },
            CfFailure::Quota => ProviderError::QuotaExceeded {
                provider,
                raw_message,
            },
            CfFailure::Throttled => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message,
            },
        }
    }
}
