//! dnsbridge Core Library
//!
//! Aggregation layer over the adapters in `dnsbridge-provider`:
//!
//! - [`ProviderRegistry`]: maps a provider name to its adapter
//! - [`DnsService`]: domain and record operations across a user's accounts,
//!   tolerant of individual account failures
//! - [`RequestContext`]: caller identity plus cancellation and deadline
//!
//! Storage is abstracted behind [`AccountRepository`] and [`AuditSink`]; the
//! hosting application injects its implementations through [`ServiceContext`].

pub mod context;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use context::RequestContext;
pub use error::{CoreError, CoreResult};
pub use services::{DnsService, ServiceContext};
pub use traits::{AccountRepository, AuditSink, InMemoryProviderRegistry, ProviderRegistry};
