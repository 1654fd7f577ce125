use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Synthetic id of the zone-apex IPv4 pseudo-record.
///
/// Vendors that store the apex address as a zone property (rather than a
/// discrete record) expose it under this id.
pub const ROOT_A_RECORD_ID: &str = "root-a";

/// Synthetic id of the zone-apex IPv6 pseudo-record.
pub const ROOT_AAAA_RECORD_ID: &str = "root-aaaa";

// ============ Provider Types ============

/// Identity of a registered provider, used for UI discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Stable lowercase identifier (e.g. `"cloudflare"`).
    pub name: String,
    /// Human-readable name.
    pub display_name: String,
}

// ============ Domain Types ============

/// A DNS zone as seen through any provider.
///
/// `id` is only unique within one (provider, account) pair. The
/// `account_id` / `account_name` fields are never set by adapters; the
/// aggregation layer stamps them when merging results across accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    /// Provider-specific zone identifier.
    pub id: String,
    /// Zone name (e.g. `"example.com"`).
    pub name: String,
    /// Unicode (IDN) form of the zone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unicode_name: Option<String>,
    /// Lifecycle state, e.g. `"Active"` / `"Inactive"`.
    pub state: String,
    /// Optional group label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Apex IPv4 address, for vendors that model it on the zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    /// Apex IPv6 address, for vendors that model it on the zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    /// Default TTL of the zone (seconds, 0 when the vendor does not report one).
    pub ttl: u32,
    /// Creation timestamp in the vendor's native format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    /// Last update timestamp in the vendor's native format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
    /// Owning account id (aggregation only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Owning account name (aggregation only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
}

// ============ DNS Record Types ============

/// A DNS resource record in the common model.
///
/// `content` always holds the value resolved from the vendor field that is
/// authoritative for `record_type`. Data the common model does not capture is
/// kept in `extra` so it survives a round trip through the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DnsRecord {
    /// Record id; may be synthetic (see [`ROOT_A_RECORD_ID`]).
    pub id: String,
    /// Owning zone id.
    pub domain_id: String,
    /// Owning zone name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    /// Host label relative to the zone; `""` or `"@"` for the apex.
    pub node_name: String,
    /// Upper-case record type (`"A"`, `"MX"`, ...).
    pub record_type: String,
    /// TTL in seconds.
    pub ttl: u32,
    /// Whether the record is enabled.
    pub state: bool,
    /// Canonical record value.
    pub content: String,
    /// MX/SRV priority, 0 for other types.
    pub priority: u16,
    /// Last update timestamp in the vendor's native format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
    /// Provider-specific fields.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl DnsRecord {
    /// Whether the record targets the zone apex.
    pub fn is_apex(&self) -> bool {
        is_apex_node(&self.node_name)
    }

    /// Whether the record type carries a meaningful priority.
    pub fn uses_priority(&self) -> bool {
        matches!(self.record_type.as_str(), "MX" | "SRV")
    }
}

/// `""` and `"@"` both denote the zone apex.
pub(crate) fn is_apex_node(node_name: &str) -> bool {
    let node = node_name.trim();
    node.is_empty() || node == "@"
}

/// NS and SOA are managed by the vendor and never listed.
pub(crate) fn is_infrastructure_type(record_type: &str) -> bool {
    record_type.eq_ignore_ascii_case("NS") || record_type.eq_ignore_ascii_case("SOA")
}
