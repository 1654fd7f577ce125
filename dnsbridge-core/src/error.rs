//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dnsbridge_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No adapter registered under this provider name
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Account does not exist or belongs to another user
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error (account repository)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// The request context was cancelled
    #[error("Request cancelled")]
    Cancelled,

    /// The request context deadline passed
    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::AccountNotFound(_)
            | Self::ProviderNotFound(_)
            | Self::ValidationError(_)
            | Self::Cancelled
            | Self::DeadlineExceeded => true,
            Self::Provider(e) => e.is_expected(),
            Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
