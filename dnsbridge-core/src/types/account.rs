//! 账户相关类型定义

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户绑定的一个 DNS 服务商账户
///
/// 核心层只使用 `provider_type` + `api_key` 调用适配器，`id` / `name` 用于标注聚合结果。
/// `api_key` 不参与序列化，`Debug` 输出也会隐藏。
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    /// 账户 ID
    pub id: String,
    /// 所属用户
    #[serde(rename = "userId")]
    pub user_id: String,
    /// 账户名称
    pub name: String,
    /// Provider 标识符（如 `"cloudflare"`）
    #[serde(rename = "providerType")]
    pub provider_type: String,
    /// 适配器凭证，格式由适配器决定
    #[serde(skip_serializing, default)]
    pub api_key: String,
    /// 创建时间
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// 更新时间
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("provider_type", &self.provider_type)
            .field("api_key", &"****")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: "acc-1".into(),
            user_id: "u1".into(),
            name: "main".into(),
            provider_type: "cloudflare".into(),
            api_key: "super-secret-token".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn api_key_never_serialized() {
        let json = serde_json::to_string(&account()).unwrap();
        assert!(!json.contains("super-secret-token"));
        assert!(json.contains("\"providerType\":\"cloudflare\""));
    }

    #[test]
    fn api_key_never_in_debug() {
        let debug = format!("{:?}", account());
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("acc-1"));
    }
}
