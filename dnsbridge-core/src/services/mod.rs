//! 业务逻辑服务层

mod dns_service;

pub use dns_service::DnsService;

use std::sync::Arc;

use dnsbridge_provider::DnsProvider;

use crate::error::{CoreError, CoreResult};
use crate::traits::{AccountRepository, AuditSink, ProviderRegistry};
use crate::types::{Account, AuditEntry};

/// 服务上下文 - 持有所有依赖
///
/// 宿主应用创建此上下文，并注入自己的账户存储与审计实现。
pub struct ServiceContext {
    /// 账户持久化仓库
    pub account_repository: Arc<dyn AccountRepository>,
    /// Provider 注册表
    pub provider_registry: Arc<dyn ProviderRegistry>,
    /// 审计日志写入端
    pub audit_sink: Arc<dyn AuditSink>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        provider_registry: Arc<dyn ProviderRegistry>,
        audit_sink: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            account_repository,
            provider_registry,
            audit_sink,
        }
    }

    /// 获取用户名下的账户
    pub async fn get_account(&self, user_id: &str, account_id: &str) -> CoreResult<Account> {
        self.account_repository
            .find(user_id, account_id)
            .await?
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))
    }

    /// 获取账户对应的 Provider 实例
    pub async fn get_provider(&self, account: &Account) -> CoreResult<Arc<dyn DnsProvider>> {
        self.provider_registry.get(&account.provider_type).await
    }

    /// 写入审计日志；失败只记录警告
    pub async fn record_audit(&self, entry: AuditEntry) {
        let action = entry.action;
        let resource_id = entry.resource_id.clone();
        if let Err(e) = self.audit_sink.record(entry).await {
            log::warn!("Failed to record audit entry ({action:?} {resource_id}): {e}");
        }
    }
}
