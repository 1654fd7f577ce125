//! Account persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Account;

/// Account storage, implemented by the hosting application
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// All accounts owned by `user_id` (empty for an unknown user)
    async fn list_by_user(&self, user_id: &str) -> CoreResult<Vec<Account>>;

    /// One account, only if it belongs to `user_id`
    async fn find(&self, user_id: &str, account_id: &str) -> CoreResult<Option<Account>>;
}
