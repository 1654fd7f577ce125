//! Dynu 错误映射
//!
//! Dynu 没有细粒度错误码，只有 `exception.type`（如 `"Authentication Exception"`）。

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DynuProvider;

impl ProviderErrorMapper for DynuProvider {
    fn provider_name(&self) -> &'static str {
        "dynu"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("Authentication Exception" | "Authorization Exception") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }
            Some("Validation Exception" | "Argument Exception") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: context
                        .record_name
                        .map_or_else(|| "request".to_string(), |name| format!("record '{name}'")),
                    detail: raw.message,
                }
            }
            Some("Rate Limit Exception") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw, &context),
        }
    }
}
