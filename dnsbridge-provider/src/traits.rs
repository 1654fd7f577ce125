use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{DnsRecord, Domain, ProviderInfo};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordExists` 等错误）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// 域名（用于 `DomainNotFound` 等错误）
    pub domain: Option<String>,
    /// 触发错误的操作（如 `"ListRecords"`），用于 fallback 消息
    pub operation: Option<&'static str>,
}

impl ErrorContext {
    pub fn for_operation(operation: &'static str) -> Self {
        Self {
            operation: Some(operation),
            ..Default::default()
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_record_id(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    pub fn with_record_name(mut self, record_name: impl Into<String>) -> Self {
        self.record_name = Some(record_name.into());
        self
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 按 HTTP 状态码归类无法按业务错误码解析的失败响应
    ///
    /// 401/403 → 凭证无效；404 → 记录或域名不存在（取决于上下文）；其他 → Unknown
    fn status_error(&self, status: u16, message: String, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match status {
            401 | 403 => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(message),
            },
            404 => {
                if let Some(record_id) = context.record_id {
                    ProviderError::RecordNotFound {
                        provider,
                        record_id,
                        raw_message: Some(message),
                    }
                } else {
                    ProviderError::DomainNotFound {
                        provider,
                        domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                        raw_message: Some(message),
                    }
                }
            }
            _ => self.unknown_error(
                RawApiError::with_code(format!("HTTP {status}"), message),
                &context,
            ),
        }
    }

    /// 快捷方法：凭证格式错误，请求发出前返回
    fn malformed_credentials(&self, detail: impl ToString) -> ProviderError {
        ProviderError::InvalidCredentials {
            provider: self.provider_name().to_string(),
            raw_message: Some(detail.to_string()),
        }
    }

    /// 快捷方法：未知错误（fallback），消息前缀为操作名
    fn unknown_error(&self, raw: RawApiError, context: &ErrorContext) -> ProviderError {
        let raw_message = match context.operation {
            Some(op) => format!("{op}: {}", raw.message),
            None => raw.message,
        };
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message,
        }
    }
}

/// DNS 提供商 Trait
///
/// 实现是无状态的：凭证随每次调用传入，由实现自行解析。凭证格式错误时
/// 必须在发出任何请求之前返回 [`ProviderError::InvalidCredentials`]。
///
/// 返回的 future 在被 drop 时即视为取消，实现不得在 drop 之后继续产生副作用。
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符（小写，稳定）
    fn name(&self) -> &'static str;

    /// 展示名称
    fn display_name(&self) -> &'static str;

    /// 控制台地址
    fn website_url(&self) -> &'static str;

    /// 注册表使用的身份信息
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: self.name().to_string(),
            display_name: self.display_name().to_string(),
        }
    }

    /// 列出凭证下的全部域名（内部处理分页）
    async fn list_domains(&self, credential: &str) -> Result<Vec<Domain>>;

    /// 获取单个域名
    async fn get_domain(&self, credential: &str, domain_id: &str) -> Result<Domain>;

    /// 列出域名下的全部记录（内部处理分页，不含 NS/SOA）
    async fn list_records(&self, credential: &str, domain_id: &str) -> Result<Vec<DnsRecord>>;

    /// 创建记录，返回供应商回显的记录
    async fn create_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord>;

    /// 更新记录（`record.id` 指定目标）
    async fn update_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord>;

    /// 删除记录
    async fn delete_record(&self, credential: &str, domain_id: &str, record_id: &str)
    -> Result<()>;
}
