//! Type definitions

mod account;
mod audit;
mod record_change;

pub use account::Account;
pub use audit::{AuditAction, AuditEntry};
pub use record_change::{DEFAULT_RECORD_TTL, RecordChange};

// Re-export the common model from the provider library
pub use dnsbridge_provider::{DnsRecord, Domain, ProviderInfo};
