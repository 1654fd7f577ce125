//! # dnsbridge-provider
//!
//! A unified DNS provider abstraction for managing zones and records hosted on
//! API-incompatible DNS vendors through one data model.
//!
//! ## Supported Providers
//!
//! | Provider | Identifier | Feature Flag | Credential format |
//! |----------|-----------|-------------|-------------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | `cloudflare` | API token |
//! | [Tencent Cloud DNSPod](https://www.dnspod.cn/) | `tencentcloud` | `tencentcloud` | `SecretId,SecretKey` |
//! | [Dynu](https://www.dynu.com/) | `dynu` | `dynu` | API key |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: Enable all providers listed above.
//! - **`cloudflare`**, **`tencentcloud`**, **`dynu`**: Enable a single provider.
//! - **`native-tls`** *(default)* / **`rustls`**: TLS backend used by `reqwest`.
//!
//! ## Usage
//!
//! Adapters are stateless: the credential travels with every call, so one
//! instance serves every account bound to that provider.
//!
//! ```rust,no_run
//! use dnsbridge_provider::{builtin_providers, DnsProvider};
//!
//! # async fn demo() -> dnsbridge_provider::Result<()> {
//! let providers = builtin_providers()?;
//! let cloudflare = providers
//!     .iter()
//!     .find(|p| p.name() == "cloudflare")
//!     .expect("cloudflare feature enabled");
//!
//! let domains = cloudflare.list_domains("my-api-token").await?;
//! for domain in &domains {
//!     let records = cloudflare.list_records("my-api-token", &domain.id).await?;
//!     for record in records {
//!         println!("{} {} {}", record.node_name, record.record_type, record.content);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Malformed credentials are rejected with [`ProviderError::InvalidCredentials`]
//! before any request is sent. Transport timeouts surface as
//! [`ProviderError::Timeout`], distinct from vendor-reported errors.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::builtin_providers;

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{DnsRecord, Domain, ProviderInfo, ROOT_A_RECORD_ID, ROOT_AAAA_RECORD_ID};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;

#[cfg(feature = "tencentcloud")]
pub use providers::TencentCloudProvider;

#[cfg(feature = "dynu")]
pub use providers::DynuProvider;
