use std::fmt;

use serde::{Deserialize, Serialize};

/// 适配器操作的统一错误
///
/// 每个变体都带 `provider`。厂商返回的错误码与消息原样保存在
/// `raw_code` / `raw_message` 中，调用方无需再次请求即可展示。
/// 适配器自身从不重试，`NetworkError`、`Timeout`、`RateLimited` 交由调用方决定。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// 尚未读到厂商响应就失败（DNS、TLS、连接被拒）
    NetworkError { provider: String, detail: String },

    /// 凭证格式错误、无效或过期。格式错误在发请求前就会报出。
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    UnsupportedRecordType {
        provider: String,
        record_type: String,
    },

    /// 账户配额用尽，等待无济于事
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    /// 限流（HTTP 429 或等价错误码），`retry_after` 单位为秒
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    Timeout { provider: String, detail: String },

    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    DomainLocked {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// 厂商响应无法解析
    ParseError { provider: String, detail: String },

    /// 请求体无法序列化
    SerializationError { provider: String, detail: String },

    /// 未收录的厂商错误
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::RecordExists { provider, .. }
            | Self::RecordNotFound { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::UnsupportedRecordType { provider, .. }
            | Self::QuotaExceeded { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::DomainLocked { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::SerializationError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }

    /// 用户输入或资源状态导致的错误，日志记 `warn`；其余记 `error`。
    /// 新增变体时同步这里。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::UnsupportedRecordType { .. }
                | Self::QuotaExceeded { .. }
                | Self::DomainNotFound { .. }
                | Self::DomainLocked { .. }
                | Self::PermissionDenied { .. }
        )
    }
}

/// 写入 `: <msg>`，没有消息时什么都不写
fn detail_suffix(f: &mut fmt::Formatter<'_>, msg: Option<&str>) -> fmt::Result {
    match msg {
        Some(msg) => write!(f, ": {msg}"),
        None => Ok(()),
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.provider())?;
        match self {
            Self::NetworkError { detail, .. } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail, .. } => write!(f, "Request timeout: {detail}"),
            Self::ParseError { detail, .. } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail, .. } => {
                write!(f, "Serialization error: {detail}")
            }
            Self::InvalidCredentials { raw_message, .. } => {
                f.write_str("Invalid credentials")?;
                detail_suffix(f, raw_message.as_deref())
            }
            Self::PermissionDenied { raw_message, .. } => {
                f.write_str("Permission denied")?;
                detail_suffix(f, raw_message.as_deref())
            }
            Self::DomainNotFound {
                domain,
                raw_message,
                ..
            } => {
                write!(f, "Domain '{domain}' not found")?;
                detail_suffix(f, raw_message.as_deref())
            }
            Self::DomainLocked {
                domain,
                raw_message,
                ..
            } => {
                write!(f, "Domain '{domain}' is locked")?;
                detail_suffix(f, raw_message.as_deref())
            }
            Self::RecordExists { record_name, .. } => {
                write!(f, "Record '{record_name}' already exists")
            }
            Self::RecordNotFound { record_id, .. } => write!(f, "Record '{record_id}' not found"),
            Self::InvalidParameter { param, detail, .. } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::UnsupportedRecordType { record_type, .. } => {
                write!(f, "Unsupported record type: {record_type}")
            }
            Self::QuotaExceeded { .. } => f.write_str("Quota exceeded"),
            Self::RateLimited { retry_after, .. } => match retry_after {
                Some(secs) => write!(f, "Rate limited (retry after {secs}s)"),
                None => f.write_str("Rate limited"),
            },
            Self::Unknown {
                raw_code,
                raw_message,
                ..
            } => match raw_code {
                Some(code) => write!(f, "{raw_message} ({code})"),
                None => f.write_str(raw_message),
            },
        }
    }
}

impl std::error::Error for ProviderError {}

pub type Result<T> = std::result::Result<T, ProviderError>;
