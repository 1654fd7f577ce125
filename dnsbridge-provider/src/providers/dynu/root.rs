//! 根域名 A/AAAA 伪记录
//!
//! Dynu 的根地址是域名对象的属性，这里在伪记录与域名更新体之间转换。

use crate::types::{DnsRecord, ROOT_A_RECORD_ID, ROOT_AAAA_RECORD_ID, is_apex_node};

use super::DEFAULT_TTL;
use super::types::{DynuDomain, DynuDomainUpdate};

/// 域名对象的 TTL，缺省时为 300
pub(crate) fn zone_ttl(domain: &DynuDomain) -> u32 {
    if domain.ttl == 0 { DEFAULT_TTL } else { domain.ttl }
}

/// 根地址槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootSlot {
    V4,
    V6,
}

impl RootSlot {
    pub fn from_record_id(id: &str) -> Option<Self> {
        match id {
            ROOT_A_RECORD_ID => Some(Self::V4),
            ROOT_AAAA_RECORD_ID => Some(Self::V6),
            _ => None,
        }
    }

    pub fn from_record_type(record_type: &str) -> Option<Self> {
        if record_type.eq_ignore_ascii_case("A") {
            Some(Self::V4)
        } else if record_type.eq_ignore_ascii_case("AAAA") {
            Some(Self::V6)
        } else {
            None
        }
    }

    pub fn record_id(self) -> &'static str {
        match self {
            Self::V4 => ROOT_A_RECORD_ID,
            Self::V6 => ROOT_AAAA_RECORD_ID,
        }
    }

    pub fn record_type(self) -> &'static str {
        match self {
            Self::V4 => "A",
            Self::V6 => "AAAA",
        }
    }

    fn address(self, domain: &DynuDomain) -> &str {
        match self {
            Self::V4 => &domain.ipv4_address,
            Self::V6 => &domain.ipv6_address,
        }
    }
}

/// 创建时：根节点上的 A/AAAA 走域名更新
pub(crate) fn root_slot_for_create(record: &DnsRecord) -> Option<RootSlot> {
    if is_apex_node(&record.node_name) {
        RootSlot::from_record_type(&record.record_type)
    } else {
        None
    }
}

/// 更新时：伪 ID 优先（类型由 ID 决定），其次按创建规则判断
pub(crate) fn root_slot_for_update(record: &DnsRecord) -> Option<RootSlot> {
    RootSlot::from_record_id(&record.id).or_else(|| root_slot_for_create(record))
}

/// 基于当前域名设置构造完整更新体；`address` 为 `None` 表示清除
pub(crate) fn build_root_update(
    domain: &DynuDomain,
    slot: RootSlot,
    address: Option<&str>,
) -> DynuDomainUpdate {
    let mut body = DynuDomainUpdate::from(domain);
    let (value, enabled) = match address {
        Some(addr) => (addr.trim().to_string(), true),
        None => (String::new(), false),
    };
    match slot {
        RootSlot::V4 => {
            body.ipv4_address = value;
            body.ipv4 = enabled;
        }
        RootSlot::V6 => {
            body.ipv6_address = value;
            body.ipv6 = enabled;
        }
    }
    body
}

/// 域名对象上某个槽位对应的伪记录（地址可能为空）
pub(crate) fn root_record(domain: &DynuDomain, slot: RootSlot) -> DnsRecord {
    DnsRecord {
        id: slot.record_id().to_string(),
        domain_id: domain.id.to_string(),
        domain_name: Some(domain.name.clone()),
        node_name: String::new(),
        record_type: slot.record_type().to_string(),
        ttl: zone_ttl(domain),
        state: domain.state == "Active",
        content: slot.address(domain).to_string(),
        priority: 0,
        updated_on: (!domain.updated_on.is_empty()).then(|| domain.updated_on.clone()),
        extra: Default::default(),
    }
}

/// 列表中出现的伪记录：只合成地址非空的槽位
pub(crate) fn root_records(domain: &DynuDomain) -> Vec<DnsRecord> {
    [RootSlot::V4, RootSlot::V6]
        .into_iter()
        .filter(|slot| !slot.address(domain).is_empty())
        .map(|slot| root_record(domain, slot))
        .collect()
}
