//! Per-request context: caller identity plus cancellation and deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{CoreError, CoreResult};

/// 每个请求的上下文
///
/// 取消令牌和截止时间对该请求发起的所有 Provider 调用生效。
/// 被取消时未完成的调用会被 drop（即中止进行中的 HTTP 请求）。
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// 发起请求的用户
    pub user_id: String,
    /// 客户端地址（写入审计日志）
    pub source_address: Option<String>,
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            source_address: None,
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    #[must_use]
    pub fn with_source_address(mut self, source_address: impl Into<String>) -> Self {
        self.source_address = Some(source_address.into());
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// 相对当前时间的截止时间
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// 使用外部令牌（例如随 HTTP 连接关闭而取消）
    #[must_use]
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 在取消令牌和截止时间的约束下执行 `fut`
    ///
    /// 取消优先于截止时间；两者都先于 `fut` 的结果被检查。
    pub async fn run<T, F>(&self, fut: F) -> CoreResult<T>
    where
        F: Future<Output = CoreResult<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Err(CoreError::DeadlineExceeded);
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            () = deadline => Err(CoreError::DeadlineExceeded),
            result = fut => result,
        }
    }
}
