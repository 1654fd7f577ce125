//! DNSPod（腾讯云 API 3.0）错误码映射
//!
//! 错误码形如 `大类.子类`。大类足以判定的（`AuthFailure`、`OperationDenied`）
//! 整类映射；其余按子类细分。
//! 参考: <https://cloud.tencent.com/document/api/1427/56192>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::TencentCloudProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DnspodFailure {
    Auth,
    Denied,
    BadField(&'static str),
    Quota,
    Throttled,
    RecordTaken,
    RecordGone,
    DomainGone,
    DomainLocked,
}

/// `InvalidParameter.*` 中出错字段可辨认的子类
fn bad_field(sub: &str) -> Option<&'static str> {
    let field = match sub {
        "RecordLineInvalid" | "LineNotExist" => "line",
        "RecordTypeInvalid" => "type",
        "RecordValueInvalid" | "RecordValueLengthInvalid" => "value",
        "SubdomainInvalid" => "subdomain",
        "MxInvalid" => "mx",
        "DomainIdInvalid" | "DomainInvalid" | "DomainTooLong" => "domain",
        "RecordIdInvalid" => "record_id",
        _ => return None,
    };
    Some(field)
}

fn classify(code: &str) -> Option<DnspodFailure> {
    use DnspodFailure as F;

    let (category, sub) = code.split_once('.').unwrap_or((code, ""));
    let failure = match (category, sub) {
        ("AuthFailure" | "UnauthorizedOperation", _) => F::Auth,
        // 登录态 / 签名类问题挂在 InvalidParameter 下
        (
            "InvalidParameter",
            "InvalidSecretId" | "InvalidSignature" | "LoginTokenNotExists"
            | "LoginTokenValidateFailed",
        ) => F::Auth,

        ("OperationDenied", _) => F::Denied,
        ("FailedOperation", "NotDomainOwner" | "NotResourceOwner") => F::Denied,
        ("InvalidParameter", "PermissionDenied" | "NoAuthorityToSrcDomain") => F::Denied,

        ("LimitExceeded", "RecordTtlLimit") => F::BadField("ttl"),
        ("InvalidParameter", sub) => match sub {
            "DomainRecordExist" => F::RecordTaken,
            "RecordNotExist" => F::RecordGone,
            "OperationIsTooFrequent" => F::Throttled,
            _ => F::BadField(bad_field(sub)?),
        },

        // 裸 RequestLimitExceeded 是接口频率；带子类的是账户级上限
        ("RequestLimitExceeded", "" | "RequestLimitExceeded") => F::Throttled,
        ("FailedOperation", "FrequencyLimit") => F::Throttled,
        ("LimitExceeded" | "RequestLimitExceeded", _) => F::Quota,

        ("ResourceNotFound", "NoDataOfRecord") => F::RecordGone,
        ("ResourceNotFound", "NoDataOfDomain") => F::DomainGone,
        ("InvalidParameterValue", "DomainNotExists") => F::DomainGone,

        ("FailedOperation", "DomainIsLocked" | "DomainIsSpam" | "AccountIsLocked") => {
            F::DomainLocked
        }
        _ => return None,
    };
    Some(failure)
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| "<unknown>".to_string())
}

impl ProviderErrorMapper for TencentCloudProvider {
    fn provider_name(&self) -> &'static str {
        "tencentcloud"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let Some(failure) = raw.code.as_deref().and_then(classify) else {
            return self.unknown_error(raw, &context);
        };
        let provider = self.provider_name().to_string();
        let raw_message = Some(raw.message.clone());

        match failure {
            DnspodFailure::Auth => ProviderError::InvalidCredentials {
                provider,
                raw_message,
            },
            DnspodFailure::Denied => ProviderError::PermissionDenied {
                provider,
                raw_message,
            },
            DnspodFailure::BadField(param) => ProviderError::InvalidParameter {
                provider,
                param: param.to_string(),
                detail: raw.message,
            },
            DnspodFailure::Quota => ProviderError::QuotaExceeded {
                provider,
                raw_message,
            },
            DnspodFailure::Throttled => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message,
            },
            DnspodFailure::RecordTaken => ProviderError::RecordExists {
                provider,
                record_name: or_unknown(context.record_name),
                raw_message,
            },
            DnspodFailure::RecordGone => ProviderError::RecordNotFound {
                provider,
                record_id: or_unknown(context.record_id),
                raw_message,
            },
            DnspodFailure::DomainGone => ProviderError::DomainNotFound {
                provider,
                domain: or_unknown(context.domain),
                raw_message,
            },
            DnspodFailure::DomainLocked => ProviderError::DomainLocked {
                provider,
                domain: or_unknown(context.domain),
                raw_message,
            },
        }
    }
}
