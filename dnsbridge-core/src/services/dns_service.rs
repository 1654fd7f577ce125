//! DNS 域名与记录服务（多账户聚合）

use std::sync::Arc;

use dnsbridge_provider::DnsProvider;
use futures::future::join_all;
use serde_json::{Map, Value, json};

use crate::context::RequestContext;
use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{Account, AuditAction, AuditEntry, DnsRecord, Domain, RecordChange};

/// 标注域名所属账户
fn stamp_domain(mut domain: Domain, account: &Account) -> Domain {
    domain.account_id = Some(account.id.clone());
    domain.account_name = Some(account.name.clone());
    domain
}

fn log_core_error(operation: &str, account_id: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{operation} failed for account {account_id}: {err}");
    } else {
        log::error!("{operation} failed for account {account_id}: {err}");
    }
}

/// 新旧记录差异（content / ttl / state）
fn record_changes(old: &DnsRecord, new: &DnsRecord) -> Map<String, Value> {
    let mut changes = Map::new();
    if old.content != new.content {
        changes.insert(
            "content".into(),
            json!({ "old": old.content, "new": new.content }),
        );
    }
    if old.ttl != new.ttl {
        changes.insert("ttl".into(), json!({ "old": old.ttl, "new": new.ttl }));
    }
    if old.state != new.state {
        changes.insert("state".into(), json!({ "old": old.state, "new": new.state }));
    }
    changes
}

/// DNS 服务
pub struct DnsService {
    ctx: Arc<ServiceContext>,
}

impl DnsService {
    /// 创建 DNS 服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 解析账户及其 Provider
    async fn resolve(
        &self,
        req: &RequestContext,
        account_id: &str,
    ) -> CoreResult<(Account, Arc<dyn DnsProvider>)> {
        let account = self.ctx.get_account(&req.user_id, account_id).await?;
        let provider = self.ctx.get_provider(&account).await?;
        Ok((account, provider))
    }

    async fn account_domains(&self, account: &Account) -> CoreResult<Vec<Domain>> {
        let provider = self.ctx.get_provider(account).await?;
        let domains = provider.list_domains(&account.api_key).await?;
        Ok(domains
            .into_iter()
            .map(|d| stamp_domain(d, account))
            .collect())
    }

    /// 查找单条记录（审计用，失败时返回 `None`）
    async fn find_record(
        provider: &dyn DnsProvider,
        account: &Account,
        domain_id: &str,
        record_id: &str,
    ) -> Option<DnsRecord> {
        match provider.list_records(&account.api_key, domain_id).await {
            Ok(records) => records.into_iter().find(|r| r.id == record_id),
            Err(e) => {
                log::debug!("Could not look up record {record_id} for audit: {e}");
                None
            }
        }
    }

    /// 列出用户所有账户下的域名
    ///
    /// 各账户并发查询；单个账户失败（Provider 未注册、凭证失效等）只记录日志并跳过，
    /// 不影响其他账户。结果无顺序保证。
    pub async fn list_all_domains(&self, req: &RequestContext) -> CoreResult<Vec<Domain>> {
        req.run(async {
            let accounts = self.ctx.account_repository.list_by_user(&req.user_id).await?;
            let results = join_all(accounts.iter().map(|a| self.account_domains(a))).await;

            let mut merged = Vec::new();
            for (account, result) in accounts.iter().zip(results) {
                match result {
                    Ok(domains) => merged.extend(domains),
                    Err(e) => log_core_error("ListDomains", &account.id, &e),
                }
            }
            log::debug!(
                "Aggregated {} domains from {} accounts for user {}",
                merged.len(),
                accounts.len(),
                req.user_id
            );
            Ok(merged)
        })
        .await
    }

    /// 列出单个账户下的域名
    pub async fn list_domains(
        &self,
        req: &RequestContext,
        account_id: &str,
    ) -> CoreResult<Vec<Domain>> {
        req.run(async {
            let account = self.ctx.get_account(&req.user_id, account_id).await?;
            self.account_domains(&account).await
        })
        .await
    }

    /// 获取域名详情
    pub async fn get_domain(
        &self,
        req: &RequestContext,
        account_id: &str,
        domain_id: &str,
    ) -> CoreResult<Domain> {
        req.run(async {
            let (account, provider) = self.resolve(req, account_id).await?;
            let domain = provider.get_domain(&account.api_key, domain_id).await?;
            Ok(stamp_domain(domain, &account))
        })
        .await
    }

    /// 列出域名下的记录
    pub async fn list_records(
        &self,
        req: &RequestContext,
        account_id: &str,
        domain_id: &str,
    ) -> CoreResult<Vec<DnsRecord>> {
        req.run(async {
            let (account, provider) = self.resolve(req, account_id).await?;
            Ok(provider.list_records(&account.api_key, domain_id).await?)
        })
        .await
    }

    /// 创建记录
    pub async fn create_record(
        &self,
        req: &RequestContext,
        account_id: &str,
        domain_id: &str,
        change: RecordChange,
    ) -> CoreResult<DnsRecord> {
        let created = req
            .run(async {
                let (account, provider) = self.resolve(req, account_id).await?;
                let record = change.into_record(domain_id, None);
                Ok(provider
                    .create_record(&account.api_key, domain_id, &record)
                    .await?)
            })
            .await?;

        let details = json!({
            "domain": domain_id,
            "node_name": created.node_name,
            "record_type": created.record_type,
            "content": created.content,
            "ttl": created.ttl,
            "account": account_id,
        });
        self.ctx
            .record_audit(AuditEntry::record(
                &req.user_id,
                AuditAction::Create,
                &created.id,
                details,
                req.source_address.clone(),
            ))
            .await;

        Ok(created)
    }

    /// 更新记录
    ///
    /// 更新前会尝试读取旧记录，以便在审计日志中写入变更对比。
    pub async fn update_record(
        &self,
        req: &RequestContext,
        account_id: &str,
        domain_id: &str,
        record_id: &str,
        change: RecordChange,
    ) -> CoreResult<DnsRecord> {
        let (previous, updated) = req
            .run(async {
                let (account, provider) = self.resolve(req, account_id).await?;
                let previous =
                    Self::find_record(provider.as_ref(), &account, domain_id, record_id).await;
                let record = change.into_record(domain_id, Some(record_id));
                let updated = provider
                    .update_record(&account.api_key, domain_id, &record)
                    .await?;
                Ok((previous, updated))
            })
            .await?;

        let mut details = json!({
            "domain": domain_id,
            "node_name": updated.node_name,
            "record_type": updated.record_type,
            "content": updated.content,
            "ttl": updated.ttl,
            "account": account_id,
        });
        if let Some(previous) = &previous {
            let changes = record_changes(previous, &updated);
            if !changes.is_empty() {
                details["changes"] = Value::Object(changes);
            }
        }
        self.ctx
            .record_audit(AuditEntry::record(
                &req.user_id,
                AuditAction::Update,
                record_id,
                details,
                req.source_address.clone(),
            ))
            .await;

        Ok(updated)
    }

    /// 删除记录
    pub async fn delete_record(
        &self,
        req: &RequestContext,
        account_id: &str,
        domain_id: &str,
        record_id: &str,
    ) -> CoreResult<()> {
        let snapshot = req
            .run(async {
                let (account, provider) = self.resolve(req, account_id).await?;
                let snapshot =
                    Self::find_record(provider.as_ref(), &account, domain_id, record_id).await;
                provider
                    .delete_record(&account.api_key, domain_id, record_id)
                    .await?;
                Ok(snapshot)
            })
            .await?;

        let details = match snapshot {
            Some(r) => json!({
                "domain": domain_id,
                "node_name": r.node_name,
                "record_type": r.record_type,
                "content": r.content,
                "ttl": r.ttl,
                "account": account_id,
            }),
            None => json!({ "domain": domain_id, "account": account_id }),
        };
        self.ctx
            .record_audit(AuditEntry::record(
                &req.user_id,
                AuditAction::Delete,
                record_id,
                details,
                req.source_address.clone(),
            ))
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::test_utils::{MockProvider, TestEnv, create_test_context};
    use crate::traits::ProviderRegistry;
    use dnsbridge_provider::ProviderError;

    fn change(node: &str, content: &str) -> RecordChange {
        RecordChange {
            node_name: node.into(),
            record_type: "A".into(),
            content: content.into(),
            ..Default::default()
        }
    }

    async fn env_with_provider(provider: MockProvider) -> TestEnv {
        let env = create_test_context();
        env.registry.register(Arc::new(provider)).await;
        env
    }

    // ---- 聚合 ----

    #[tokio::test]
    async fn partial_failure_keeps_healthy_accounts() {
        let provider = MockProvider::new("mock")
            .with_domains("key-a", &["a.example"])
            .with_domains("key-c", &["c.example", "c2.example"])
            .with_failure(
                "key-b",
                ProviderError::InvalidCredentials {
                    provider: "mock".into(),
                    raw_message: None,
                },
            );
        let env = env_with_provider(provider).await;
        env.accounts.add("u1", "acc-a", "mock", "key-a").await;
        env.accounts.add("u1", "acc-b", "mock", "key-b").await;
        env.accounts.add("u1", "acc-c", "mock", "key-c").await;

        let service = DnsService::new(env.ctx.clone());
        let mut domains = service
            .list_all_domains(&RequestContext::new("u1"))
            .await
            .unwrap();
        domains.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<_> = domains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.example", "c.example", "c2.example"]);
        assert_eq!(domains[0].account_id.as_deref(), Some("acc-a"));
        assert_eq!(domains[0].account_name.as_deref(), Some("acc-a name"));
        assert!(domains[1..].iter().all(|d| d.account_id.as_deref() == Some("acc-c")));
    }

    #[tokio::test]
    async fn unknown_provider_account_is_skipped() {
        let env = env_with_provider(MockProvider::new("mock").with_domains("k", &["ok.example"]))
            .await;
        env.accounts.add("u1", "acc-1", "mock", "k").await;
        env.accounts.add("u1", "acc-2", "retired", "k").await;

        let service = DnsService::new(env.ctx.clone());
        let domains = service
            .list_all_domains(&RequestContext::new("u1"))
            .await
            .unwrap();
        assert_eq!(domains.len(), 1);
    }

    #[tokio::test]
    async fn unknown_user_has_no_domains() {
        let env = env_with_provider(MockProvider::new("mock")).await;
        let service = DnsService::new(env.ctx.clone());
        let domains = service
            .list_all_domains(&RequestContext::new("nobody"))
            .await
            .unwrap();
        assert!(domains.is_empty());
    }

    #[tokio::test]
    async fn storage_error_is_returned() {
        let env = env_with_provider(MockProvider::new("mock")).await;
        env.accounts.fail_with("db unavailable").await;
        let service = DnsService::new(env.ctx.clone());
        let result = service.list_all_domains(&RequestContext::new("u1")).await;
        assert!(matches!(result, Err(CoreError::StorageError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_does_not_wait_for_slow_accounts() {
        let provider = MockProvider::new("mock")
            .with_domains("k", &["slow.example"])
            .with_delay(Duration::from_secs(3600));
        let env = env_with_provider(provider).await;
        env.accounts.add("u1", "acc-1", "mock", "k").await;
        env.accounts.add("u1", "acc-2", "mock", "k").await;

        let service = DnsService::new(env.ctx.clone());
        let req = RequestContext::new("u1");
        let token = req.cancellation_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let started = tokio::time::Instant::now();
        let result = service.list_all_domains(&req).await;
        assert!(matches!(result, Err(CoreError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_exceeded() {
        let provider = MockProvider::new("mock")
            .with_domains("k", &["slow.example"])
            .with_delay(Duration::from_secs(60));
        let env = env_with_provider(provider).await;
        env.accounts.add("u1", "acc-1", "mock", "k").await;

        let service = DnsService::new(env.ctx.clone());
        let req = RequestContext::new("u1").with_timeout(Duration::from_secs(1));
        let result = service.list_all_domains(&req).await;
        assert!(matches!(result, Err(CoreError::DeadlineExceeded)));
    }

    // ---- 单账户 ----

    #[tokio::test]
    async fn foreign_account_not_found() {
        let env = env_with_provider(MockProvider::new("mock")).await;
        env.accounts.add("owner", "acc-1", "mock", "k").await;

        let service = DnsService::new(env.ctx.clone());
        let result = service
            .list_records(&RequestContext::new("intruder"), "acc-1", "zone")
            .await;
        assert!(matches!(result, Err(CoreError::AccountNotFound(id)) if id == "acc-1"));
    }

    #[tokio::test]
    async fn unregistered_provider_not_found() {
        let env = create_test_context();
        env.accounts.add("u1", "acc-1", "ghost", "k").await;

        let service = DnsService::new(env.ctx.clone());
        let result = service
            .get_domain(&RequestContext::new("u1"), "acc-1", "zone")
            .await;
        assert!(matches!(result, Err(CoreError::ProviderNotFound(name)) if name == "ghost"));
    }

    #[tokio::test]
    async fn single_account_domains_are_stamped() {
        let env =
            env_with_provider(MockProvider::new("mock").with_domains("k", &["one.example"])).await;
        env.accounts.add("u1", "acc-1", "mock", "k").await;

        let service = DnsService::new(env.ctx.clone());
        let req = RequestContext::new("u1");
        let domains = service.list_domains(&req, "acc-1").await.unwrap();
        assert_eq!(domains[0].account_id.as_deref(), Some("acc-1"));

        let domain = service
            .get_domain(&req, "acc-1", "one.example")
            .await
            .unwrap();
        assert_eq!(domain.account_name.as_deref(), Some("acc-1 name"));
    }

    #[tokio::test]
    async fn provider_error_is_wrapped() {
        let provider = MockProvider::new("mock").with_failure(
            "bad",
            ProviderError::InvalidCredentials {
                provider: "mock".into(),
                raw_message: None,
            },
        );
        let env = env_with_provider(provider).await;
        env.accounts.add("u1", "acc-1", "mock", "bad").await;

        let service = DnsService::new(env.ctx.clone());
        let result = service.list_domains(&RequestContext::new("u1"), "acc-1").await;
        assert!(matches!(
            result,
            Err(CoreError::Provider(ProviderError::InvalidCredentials { .. }))
        ));
    }

    // ---- 写操作 + 审计 ----

    #[tokio::test]
    async fn create_applies_defaults_and_audits() {
        let env = env_with_provider(MockProvider::new("mock")).await;
        env.accounts.add("u1", "acc-1", "mock", "k").await;

        let service = DnsService::new(env.ctx.clone());
        let req = RequestContext::new("u1").with_source_address("203.0.113.5");
        let created = service
            .create_record(&req, "acc-1", "zone-1", change("www", "192.0.2.1"))
            .await
            .unwrap();
        assert_eq!(created.ttl, 300);
        assert!(created.state);

        let entries = env.audit.entries().await;
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.actor, "u1");
        assert_eq!(entry.action, AuditAction::Create);
        assert_eq!(entry.resource_id, created.id);
        assert_eq!(entry.source_address.as_deref(), Some("203.0.113.5"));
        assert_eq!(entry.details["content"], "192.0.2.1");
        assert_eq!(entry.details["account"], "acc-1");
    }

    #[tokio::test]
    async fn update_audits_changes() {
        let env = env_with_provider(MockProvider::new("mock")).await;
        env.accounts.add("u1", "acc-1", "mock", "k").await;
        let service = DnsService::new(env.ctx.clone());
        let req = RequestContext::new("u1");

        let created = service
            .create_record(&req, "acc-1", "zone-1", change("www", "192.0.2.1"))
            .await
            .unwrap();
        let update = RecordChange {
            ttl: 600,
            ..change("www", "192.0.2.2")
        };
        let updated = service
            .update_record(&req, "acc-1", "zone-1", &created.id, update)
            .await
            .unwrap();
        assert_eq!(updated.content, "192.0.2.2");

        let entries = env.audit.entries().await;
        let entry = entries.last().unwrap();
        assert_eq!(entry.action, AuditAction::Update);
        let changes = &entry.details["changes"];
        assert_eq!(changes["content"]["old"], "192.0.2.1");
        assert_eq!(changes["content"]["new"], "192.0.2.2");
        assert_eq!(changes["ttl"]["old"], 300);
        assert_eq!(changes["ttl"]["new"], 600);
        assert!(changes.get("state").is_none());
    }

    #[tokio::test]
    async fn delete_audits_snapshot() {
        let env = env_with_provider(MockProvider::new("mock")).await;
        env.accounts.add("u1", "acc-1", "mock", "k").await;
        let service = DnsService::new(env.ctx.clone());
        let req = RequestContext::new("u1");

        let created = service
            .create_record(&req, "acc-1", "zone-1", change("mail", "192.0.2.25"))
            .await
            .unwrap();
        service
            .delete_record(&req, "acc-1", "zone-1", &created.id)
            .await
            .unwrap();

        let entries = env.audit.entries().await;
        let entry = entries.last().unwrap();
        assert_eq!(entry.action, AuditAction::Delete);
        assert_eq!(entry.details["node_name"], "mail");
        assert_eq!(entry.details["content"], "192.0.2.25");

        let remaining = service
            .list_records(&req, "acc-1", "zone-1")
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn audit_failure_does_not_fail_operation() {
        let env = env_with_provider(MockProvider::new("mock")).await;
        env.accounts.add("u1", "acc-1", "mock", "k").await;
        env.audit.fail_with("audit db down").await;

        let service = DnsService::new(env.ctx.clone());
        let result = service
            .create_record(
                &RequestContext::new("u1"),
                "acc-1",
                "zone-1",
                change("www", "192.0.2.1"),
            )
            .await;
        assert!(result.is_ok());
        assert!(env.audit.entries().await.is_empty());
    }

    #[tokio::test]
    async fn failed_write_is_not_audited() {
        let provider = MockProvider::new("mock").with_failure(
            "bad",
            ProviderError::RecordExists {
                provider: "mock".into(),
                record_name: "www".into(),
                raw_message: None,
            },
        );
        let env = env_with_provider(provider).await;
        env.accounts.add("u1", "acc-1", "mock", "bad").await;

        let service = DnsService::new(env.ctx.clone());
        let result = service
            .create_record(
                &RequestContext::new("u1"),
                "acc-1",
                "zone-1",
                change("www", "192.0.2.1"),
            )
            .await;
        assert!(result.is_err());
        assert!(env.audit.entries().await.is_empty());
    }
}
