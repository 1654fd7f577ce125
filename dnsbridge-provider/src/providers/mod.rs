//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "dynu")]
mod dynu;
#[cfg(feature = "tencentcloud")]
mod tencentcloud;

#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareProvider;
#[cfg(feature = "dynu")]
pub use dynu::DynuProvider;
#[cfg(feature = "tencentcloud")]
pub use tencentcloud::TencentCloudProvider;
