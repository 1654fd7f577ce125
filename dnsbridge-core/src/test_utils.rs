//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dnsbridge_provider::{DnsProvider, DnsRecord, Domain, ProviderError};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{AccountRepository, AuditSink, InMemoryProviderRegistry};
use crate::types::{Account, AuditEntry};

// ===== MockAccountRepository =====

pub struct MockAccountRepository {
    accounts: RwLock<Vec<Account>>,
    /// 如果 Some，所有查询返回此错误
    error: RwLock<Option<String>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
            error: RwLock::new(None),
        }
    }

    /// 添加账户，名称为 `"{id} name"`
    pub async fn add(&self, user_id: &str, id: &str, provider_type: &str, api_key: &str) {
        self.accounts.write().await.push(Account {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: format!("{id} name"),
            provider_type: provider_type.to_string(),
            api_key: api_key.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
    }

    pub async fn fail_with(&self, msg: &str) {
        *self.error.write().await = Some(msg.to_string());
    }

    async fn check(&self) -> CoreResult<()> {
        match self.error.read().await.as_ref() {
            Some(msg) => Err(CoreError::StorageError(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn list_by_user(&self, user_id: &str) -> CoreResult<Vec<Account>> {
        self.check().await?;
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, user_id: &str, account_id: &str) -> CoreResult<Option<Account>> {
        self.check().await?;
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|a| a.user_id == user_id && a.id == account_id)
            .cloned())
    }
}

// ===== MockAuditSink =====

pub struct MockAuditSink {
    entries: RwLock<Vec<AuditEntry>>,
    error: RwLock<Option<String>>,
}

impl MockAuditSink {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            error: RwLock::new(None),
        }
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }

    pub async fn fail_with(&self, msg: &str) {
        *self.error.write().await = Some(msg.to_string());
    }
}

#[async_trait]
impl AuditSink for MockAuditSink {
    async fn record(&self, entry: AuditEntry) -> CoreResult<()> {
        if let Some(msg) = self.error.read().await.as_ref() {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.entries.write().await.push(entry);
        Ok(())
    }
}

// ===== MockProvider =====

/// 内存中的 Provider
///
/// 域名按凭证区分，记录按 `domain_id` 存放；凭证命中 `failures` 时所有操作返回对应错误。
pub struct MockProvider {
    name: &'static str,
    display_name: &'static str,
    domains: HashMap<String, Vec<Domain>>,
    failures: HashMap<String, ProviderError>,
    delay: Option<Duration>,
    records: RwLock<HashMap<String, Vec<DnsRecord>>>,
    next_id: AtomicU64,
}

impl MockProvider {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            display_name: name,
            domains: HashMap::new(),
            failures: HashMap::new(),
            delay: None,
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_display_name(mut self, display_name: &'static str) -> Self {
        self.display_name = display_name;
        self
    }

    /// 凭证 `credential` 下的域名；域名 ID 即名称
    pub fn with_domains(mut self, credential: &str, names: &[&str]) -> Self {
        let domains = names
            .iter()
            .map(|n| Domain {
                id: (*n).to_string(),
                name: (*n).to_string(),
                state: "Active".to_string(),
                ttl: 300,
                ..Default::default()
            })
            .collect();
        self.domains.insert(credential.to_string(), domains);
        self
    }

    pub fn with_failure(mut self, credential: &str, err: ProviderError) -> Self {
        self.failures.insert(credential.to_string(), err);
        self
    }

    /// 每次调用前等待
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn enter(&self, credential: &str) -> dnsbridge_provider::Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.get(credential) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn not_found(&self, record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            provider: self.name.to_string(),
            record_id: record_id.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl DnsProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn display_name(&self) -> &'static str {
        self.display_name
    }

    fn website_url(&self) -> &'static str {
        "https://mock.invalid"
    }

    async fn list_domains(&self, credential: &str) -> dnsbridge_provider::Result<Vec<Domain>> {
        self.enter(credential).await?;
        Ok(self.domains.get(credential).cloned().unwrap_or_default())
    }

    async fn get_domain(
        &self,
        credential: &str,
        domain_id: &str,
    ) -> dnsbridge_provider::Result<Domain> {
        self.enter(credential).await?;
        self.domains
            .get(credential)
            .and_then(|ds| ds.iter().find(|d| d.id == domain_id))
            .cloned()
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: self.name.to_string(),
                domain: domain_id.to_string(),
                raw_message: None,
            })
    }

    async fn list_records(
        &self,
        credential: &str,
        domain_id: &str,
    ) -> dnsbridge_provider::Result<Vec<DnsRecord>> {
        self.enter(credential).await?;
        Ok(self
            .records
            .read()
            .await
            .get(domain_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> dnsbridge_provider::Result<DnsRecord> {
        self.enter(credential).await?;
        let mut created = record.clone();
        created.id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        created.domain_id = domain_id.to_string();
        self.records
            .write()
            .await
            .entry(domain_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> dnsbridge_provider::Result<DnsRecord> {
        self.enter(credential).await?;
        let mut records = self.records.write().await;
        let existing = records
            .get_mut(domain_id)
            .and_then(|rs| rs.iter_mut().find(|r| r.id == record.id))
            .ok_or_else(|| self.not_found(&record.id))?;
        *existing = record.clone();
        Ok(record.clone())
    }

    async fn delete_record(
        &self,
        credential: &str,
        domain_id: &str,
        record_id: &str,
    ) -> dnsbridge_provider::Result<()> {
        self.enter(credential).await?;
        let mut records = self.records.write().await;
        let list = records
            .get_mut(domain_id)
            .ok_or_else(|| self.not_found(record_id))?;
        let before = list.len();
        list.retain(|r| r.id != record_id);
        if list.len() == before {
            return Err(self.not_found(record_id));
        }
        Ok(())
    }
}

// ===== 工厂方法 =====

/// 测试环境：服务上下文及其 mock 依赖
pub struct TestEnv {
    pub ctx: Arc<ServiceContext>,
    pub registry: Arc<InMemoryProviderRegistry>,
    pub accounts: Arc<MockAccountRepository>,
    pub audit: Arc<MockAuditSink>,
}

/// 创建测试用 `ServiceContext`（空注册表）
pub fn create_test_context() -> TestEnv {
    let accounts = Arc::new(MockAccountRepository::new());
    let registry = Arc::new(InMemoryProviderRegistry::new());
    let audit = Arc::new(MockAuditSink::new());

    let ctx = Arc::new(ServiceContext::new(
        accounts.clone(),
        registry.clone(),
        audit.clone(),
    ));

    TestEnv {
        ctx,
        registry,
        accounts,
        audit,
    }
}
