//! Stateless service façade exposing the toolbox operations.

mod dns_check;
mod resolver;

pub use resolver::{DnsLookupBackend, HickoryBackend};

use hickory_resolver::proto::rr::Name;

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{DnsCheckOptions, DnsCheckResult, DnsCheckType};

/// Validate and normalise a domain name input.
///
/// Trims whitespace and a trailing dot, converts internationalised names to
/// their ASCII form and rejects empty, malformed or overlong inputs.
fn validate_domain(domain: &str) -> ToolboxResult<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ToolboxError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    let invalid = || ToolboxError::ValidationError(format!("Invalid domain name: {domain}"));

    let ascii = Name::from_utf8(domain).map_err(|_| invalid())?.to_ascii();
    let ascii = ascii.trim_end_matches('.').to_lowercase();
    if ascii.len() > 253 {
        return Err(ToolboxError::ValidationError(format!(
            "Domain name exceeds maximum length of 253 characters (got {})",
            ascii.len()
        )));
    }
    let labels_ok = ascii.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    });
    if !labels_ok {
        return Err(invalid());
    }
    Ok(ascii)
}

/// Entry point for the network checks.
///
/// All methods are stateless associated functions.
///
/// ```rust,no_run
/// use dnsbridge_toolbox::ToolboxService;
/// # async fn demo() -> dnsbridge_toolbox::ToolboxResult<()> {
/// let result = ToolboxService::check_dns("www.example.com", "A", Some("93.184.216.34")).await?;
/// println!("{}: {}", result.matched, result.message);
/// # Ok(())
/// # }
/// ```
pub struct ToolboxService;

impl ToolboxService {
    /// Check whether a record is visible on public resolvers.
    ///
    /// Queries 8.8.8.8, 1.1.1.1 and 208.67.222.222 in order and reports the
    /// first non-empty answer, compared against `expected` when given.
    /// Resolver failures are described in the result; only invalid input
    /// returns an error.
    pub async fn check_dns(
        domain: &str,
        record_type: &str,
        expected: Option<&str>,
    ) -> ToolboxResult<DnsCheckResult> {
        let options = DnsCheckOptions::default();
        let backend = HickoryBackend::new(options.per_resolver_timeout);
        Self::check_dns_with(&backend, &options, domain, record_type, expected).await
    }

    /// Same as [`check_dns`](Self::check_dns) with a custom backend and options.
    pub async fn check_dns_with(
        backend: &dyn DnsLookupBackend,
        options: &DnsCheckOptions,
        domain: &str,
        record_type: &str,
        expected: Option<&str>,
    ) -> ToolboxResult<DnsCheckResult> {
        let domain = validate_domain(domain)?;
        let record_type: DnsCheckType = record_type
            .parse()
            .map_err(ToolboxError::ValidationError)?;
        Ok(dns_check::check_dns(backend, options, &domain, record_type, expected).await)
    }
}
