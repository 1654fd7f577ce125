//! 创建/更新记录的调用方输入

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dnsbridge_provider::DnsRecord;

/// 记录 TTL 为 0 时使用的默认值
pub const DEFAULT_RECORD_TTL: u32 = 300;

/// 创建/更新记录请求
///
/// `state` 缺省为启用，`ttl` 为 0 时取 [`DEFAULT_RECORD_TTL`]。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordChange {
    pub node_name: String,
    pub record_type: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub state: Option<bool>,
    pub content: String,
    #[serde(default)]
    pub priority: u16,
}

impl RecordChange {
    /// 应用默认值后转换为适配器使用的记录
    pub fn into_record(self, domain_id: &str, record_id: Option<&str>) -> DnsRecord {
        DnsRecord {
            id: record_id.unwrap_or_default().to_string(),
            domain_id: domain_id.to_string(),
            domain_name: None,
            node_name: self.node_name.trim().to_string(),
            record_type: self.record_type.trim().to_uppercase(),
            ttl: if self.ttl == 0 {
                DEFAULT_RECORD_TTL
            } else {
                self.ttl
            },
            state: self.state.unwrap_or(true),
            content: self.content.trim().to_string(),
            priority: self.priority,
            updated_on: None,
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied() {
        let change = RecordChange {
            node_name: " www ".into(),
            record_type: "a".into(),
            content: "192.0.2.1".into(),
            ..Default::default()
        };
        let record = change.into_record("zone-1", None);
        assert_eq!(record.ttl, DEFAULT_RECORD_TTL);
        assert!(record.state);
        assert_eq!(record.node_name, "www");
        assert_eq!(record.record_type, "A");
        assert_eq!(record.id, "");
        assert_eq!(record.domain_id, "zone-1");
    }

    #[test]
    fn explicit_values_kept() {
        let change = RecordChange {
            node_name: "@".into(),
            record_type: "MX".into(),
            ttl: 3600,
            state: Some(false),
            content: "mx.example.com".into(),
            priority: 10,
        };
        let record = change.into_record("zone-1", Some("rec-9"));
        assert_eq!(record.ttl, 3600);
        assert!(!record.state);
        assert_eq!(record.priority, 10);
        assert_eq!(record.id, "rec-9");
    }

    #[test]
    fn deserializes_with_missing_optionals() {
        let change: RecordChange = serde_json::from_value(serde_json::json!({
            "node_name": "www", "record_type": "CNAME", "content": "target.example.net"
        }))
        .unwrap();
        assert_eq!(change.ttl, 0);
        assert!(change.state.is_none());
    }
}
