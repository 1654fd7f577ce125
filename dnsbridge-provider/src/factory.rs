//! Built-in provider construction.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::DnsProvider;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;
#[cfg(feature = "dynu")]
use crate::providers::DynuProvider;
#[cfg(feature = "tencentcloud")]
use crate::providers::TencentCloudProvider;

/// Creates one instance of every adapter enabled via feature flags.
///
/// Adapters are stateless, so a single instance per provider is enough for
/// every account. Fails only if the HTTP client cannot be built (e.g. the TLS
/// backend failed to initialize).
///
/// # Examples
///
/// ```rust,no_run
/// let providers = dnsbridge_provider::builtin_providers().unwrap();
/// for p in &providers {
///     println!("{} ({})", p.display_name(), p.name());
/// }
/// ```
pub fn builtin_providers() -> Result<Vec<Arc<dyn DnsProvider>>> {
    #[allow(unused_mut)]
    let mut providers: Vec<Arc<dyn DnsProvider>> = Vec::new();

    #[cfg(feature = "cloudflare")]
    providers.push(Arc::new(CloudflareProvider::new()?));
    #[cfg(feature = "tencentcloud")]
    providers.push(Arc::new(TencentCloudProvider::new()?));
    #[cfg(feature = "dynu")]
    providers.push(Arc::new(DynuProvider::new()?));

    Ok(providers)
}
