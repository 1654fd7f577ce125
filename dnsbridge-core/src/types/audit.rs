//! 审计日志类型

use serde::{Deserialize, Serialize};

/// 审计动作
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

/// 一条审计记录，由 [`AuditSink`](crate::traits::AuditSink) 持久化
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    /// 操作者（用户 ID）
    pub actor: String,
    pub action: AuditAction,
    /// 资源类型，目前只有 `"record"`
    pub resource: String,
    pub resource_id: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
}

impl AuditEntry {
    /// DNS 记录相关的审计记录
    pub fn record(
        actor: impl Into<String>,
        action: AuditAction,
        record_id: impl Into<String>,
        details: serde_json::Value,
        source_address: Option<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action,
            resource: "record".to_string(),
            resource_id: record_id.into(),
            details,
            source_address,
        }
    }
}
