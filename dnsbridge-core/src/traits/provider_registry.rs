//! Provider registry abstract Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use dnsbridge_provider::{DnsProvider, ProviderInfo};

use crate::error::{CoreError, CoreResult};

/// Provider Registry Trait
///
/// Maps a provider name (`Account::provider_type`) to its adapter. Adapters are
/// stateless, so one instance serves every account of that provider.
#[async_trait]
pub trait ProviderRegistry: Send + Sync {
    /// Register an adapter under [`DnsProvider::name`]; replaces any adapter with the same name
    async fn register(&self, provider: Arc<dyn DnsProvider>);

    /// Look up an adapter
    ///
    /// # Errors
    /// [`CoreError::ProviderNotFound`] when nothing is registered under `name`.
    async fn get(&self, name: &str) -> CoreResult<Arc<dyn DnsProvider>>;

    /// Identity of every registered adapter, in no particular order
    async fn list(&self) -> Vec<ProviderInfo>;
}

/// In-memory Provider registry
#[derive(Clone)]
pub struct InMemoryProviderRegistry {
    providers: Arc<RwLock<HashMap<String, Arc<dyn DnsProvider>>>>,
}

impl InMemoryProviderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry holding every adapter enabled by Cargo features
    ///
    /// # Errors
    /// Fails if an adapter's HTTP client cannot be built.
    pub fn with_builtin_providers() -> CoreResult<Self> {
        let providers = dnsbridge_provider::builtin_providers()?
            .into_iter()
            .map(|p| (p.name().to_string(), p))
            .collect::<HashMap<_, _>>();
        log::debug!("Registered {} built-in providers", providers.len());
        Ok(Self {
            providers: Arc::new(RwLock::new(providers)),
        })
    }
}

impl Default for InMemoryProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderRegistry for InMemoryProviderRegistry {
    async fn register(&self, provider: Arc<dyn DnsProvider>) {
        let name = provider.name().to_string();
        if self.providers.write().await.insert(name.clone(), provider).is_some() {
            log::debug!("Provider {name} re-registered");
        }
    }

    async fn get(&self, name: &str) -> CoreResult<Arc<dyn DnsProvider>> {
        self.providers
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::ProviderNotFound(name.to_string()))
    }

    async fn list(&self) -> Vec<ProviderInfo> {
        self.providers
            .read()
            .await
            .values()
            .map(|p| p.info())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockProvider;

    #[tokio::test]
    async fn get_unknown_provider() {
        let registry = InMemoryProviderRegistry::new();
        let result = registry.get("nonexistent").await;
        assert!(matches!(result, Err(CoreError::ProviderNotFound(name)) if name == "nonexistent"));
    }

    #[tokio::test]
    async fn list_returns_registered() {
        let registry = InMemoryProviderRegistry::new();
        registry.register(Arc::new(MockProvider::new("alpha"))).await;
        registry.register(Arc::new(MockProvider::new("beta"))).await;

        let mut names: Vec<_> = registry.list().await.into_iter().map(|i| i.name).collect();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(registry.get("beta").await.unwrap().name(), "beta");
    }

    #[tokio::test]
    async fn register_overwrites_same_name() {
        let registry = InMemoryProviderRegistry::new();
        registry.register(Arc::new(MockProvider::new("alpha"))).await;
        registry
            .register(Arc::new(MockProvider::new("alpha").with_display_name("Alpha v2")))
            .await;

        let infos = registry.list().await;
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].display_name, "Alpha v2");
    }

    #[tokio::test]
    async fn builtin_providers_registered() {
        let registry = InMemoryProviderRegistry::with_builtin_providers().unwrap();
        for name in ["cloudflare", "tencentcloud", "dynu"] {
            assert!(registry.get(name).await.is_ok(), "{name} missing");
        }
    }
}
