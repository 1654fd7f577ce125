//! Collaborator traits: provider registry, account storage and audit sink

mod account_repository;
mod audit_sink;
mod provider_registry;

pub use account_repository::AccountRepository;
pub use audit_sink::AuditSink;
pub use provider_registry::{InMemoryProviderRegistry, ProviderRegistry};
