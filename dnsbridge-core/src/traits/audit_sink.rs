//! Audit log sink

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::AuditEntry;

/// 审计日志写入端，由宿主应用实现
///
/// 写入失败只会被记录为 `warn`，不影响业务结果。
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> CoreResult<()>;
}
