//! Dynu DnsProvider trait 实现

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::providers::common::parse_single_credential;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{DnsRecord, Domain, is_apex_node, is_infrastructure_type};

use super::root::{
    RootSlot, build_root_update, root_record, root_records, root_slot_for_create,
    root_slot_for_update, zone_ttl,
};
use super::types::{
    DynuDomain, DynuDomainsResponse, DynuRecord, DynuRecordBody, DynuRecordsResponse,
};
use super::{DEFAULT_TTL, DynuProvider};

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

impl DynuProvider {
    pub(crate) fn dynu_domain_to_domain(d: DynuDomain) -> Domain {
        let ttl = zone_ttl(&d);
        Domain {
            id: d.id.to_string(),
            name: d.name,
            unicode_name: non_empty(d.unicode_name),
            state: d.state,
            group: non_empty(d.group),
            ipv4_address: non_empty(d.ipv4_address),
            ipv6_address: non_empty(d.ipv6_address),
            ttl,
            created_on: non_empty(d.created_on),
            updated_on: non_empty(d.updated_on),
            ..Default::default()
        }
    }

    /// 按记录类型取权威字段
    pub(crate) fn resolve_content(r: &DynuRecord) -> String {
        let value = match r.record_type.to_uppercase().as_str() {
            "A" => &r.ipv4_address,
            "AAAA" => &r.ipv6_address,
            "CNAME" | "MX" | "SRV" => &r.host,
            "TXT" | "SPF" => &r.text_data,
            _ => &r.content,
        };
        if value.is_empty() {
            r.content.clone()
        } else {
            value.clone()
        }
    }

    pub(crate) fn dynu_record_to_dns_record(r: DynuRecord, zone: &DynuDomain) -> DnsRecord {
        let content = Self::resolve_content(&r);

        let mut extra = HashMap::new();
        if let Some(weight) = r.weight {
            extra.insert("weight".to_string(), Value::from(weight));
        }
        if let Some(port) = r.port {
            extra.insert("port".to_string(), Value::from(port));
        }
        if !r.group.is_empty() {
            extra.insert("group".to_string(), Value::String(r.group));
        }
        if !r.hostname.is_empty() {
            extra.insert("hostname".to_string(), Value::String(r.hostname));
        }

        DnsRecord {
            id: r.id.to_string(),
            domain_id: zone.id.to_string(),
            domain_name: Some(zone.name.clone()),
            node_name: r.node_name,
            record_type: r.record_type,
            ttl: r.ttl.filter(|t| *t > 0).unwrap_or_else(|| zone_ttl(zone)),
            state: r.state,
            content,
            priority: r.priority.unwrap_or(0),
            updated_on: non_empty(r.updated_on),
            extra,
        }
    }

    /// 根地址伪记录在前，其后是普通记录（不含 NS/SOA）
    pub(crate) fn records_from_response(
        resp: DynuRecordsResponse,
        zone: &DynuDomain,
    ) -> Vec<DnsRecord> {
        let mut records = root_records(zone);
        records.extend(
            resp.dns_records
                .into_iter()
                .filter(|r| !is_infrastructure_type(&r.record_type))
                .map(|r| Self::dynu_record_to_dns_record(r, zone)),
        );
        records
    }

    /// 构造记录写入体，值放在类型对应的字段里
    pub(crate) fn build_record_body(record: &DnsRecord) -> DynuRecordBody {
        let record_type = record.record_type.to_uppercase();
        let node_name = if is_apex_node(&record.node_name) {
            String::new()
        } else {
            record.node_name.trim().to_string()
        };
        let content = record.content.trim().to_string();

        let mut body = DynuRecordBody {
            node_name,
            ttl: if record.ttl == 0 { DEFAULT_TTL } else { record.ttl },
            state: record.state,
            ..Default::default()
        };
        match record_type.as_str() {
            "A" => {
                body.ipv4_address = Some(content);
                body.group = Some(String::new());
            }
            "AAAA" => body.ipv6_address = Some(content),
            "CNAME" => body.host = Some(content),
            "MX" | "SRV" => {
                body.host = Some(content);
                body.priority = Some(record.priority);
            }
            _ => body.text_data = Some(content),
        }
        body.record_type = record_type;
        body
    }

    async fn fetch_domain(&self, api_key: &str, domain_id: &str) -> Result<DynuDomain> {
        let ctx = ErrorContext::for_operation("GetDomain").with_domain(domain_id);
        self.get(api_key, &format!("/dns/{domain_id}"), &ctx).await
    }

    /// 改写域名对象上的根地址，返回更新后的伪记录
    async fn write_root(
        &self,
        api_key: &str,
        domain_id: &str,
        slot: RootSlot,
        address: Option<&str>,
    ) -> Result<DnsRecord> {
        let domain = self.fetch_domain(api_key, domain_id).await?;
        let body = build_root_update(&domain, slot, address);
        log::info!(
            "[dynu] {} root {} of domain {domain_id}",
            if address.is_some() { "Setting" } else { "Clearing" },
            slot.record_type()
        );

        let ctx = ErrorContext::for_operation("UpdateDomain")
            .with_domain(domain_id)
            .with_record_id(slot.record_id());
        let _: Value = self
            .post(api_key, &format!("/dns/{domain_id}"), &body, &ctx)
            .await?;

        let updated = self.fetch_domain(api_key, domain_id).await?;
        Ok(root_record(&updated, slot))
    }
}

#[async_trait]
impl DnsProvider for DynuProvider {
    fn name(&self) -> &'static str {
        "dynu"
    }

    fn display_name(&self) -> &'static str {
        "Dynu.com"
    }

    fn website_url(&self) -> &'static str {
        "https://www.dynu.com"
    }

    async fn list_domains(&self, credential: &str) -> Result<Vec<Domain>> {
        let api_key = parse_single_credential(credential, "dynu")?;
        let resp: DynuDomainsResponse = self
            .get(api_key, "/dns", &ErrorContext::for_operation("ListDomains"))
            .await?;
        Ok(resp
            .domains
            .into_iter()
            .map(Self::dynu_domain_to_domain)
            .collect())
    }

    async fn get_domain(&self, credential: &str, domain_id: &str) -> Result<Domain> {
        let api_key = parse_single_credential(credential, "dynu")?;
        let domain = self.fetch_domain(api_key, domain_id).await?;
        Ok(Self::dynu_domain_to_domain(domain))
    }

    async fn list_records(&self, credential: &str, domain_id: &str) -> Result<Vec<DnsRecord>> {
        let api_key = parse_single_credential(credential, "dynu")?;
        let zone = self.fetch_domain(api_key, domain_id).await?;

        let ctx = ErrorContext::for_operation("ListRecords").with_domain(domain_id);
        let resp: DynuRecordsResponse = self
            .get(api_key, &format!("/dns/{domain_id}/record"), &ctx)
            .await?;

        Ok(Self::records_from_response(resp, &zone))
    }

    async fn create_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord> {
        let api_key = parse_single_credential(credential, "dynu")?;
        if let Some(slot) = root_slot_for_create(record) {
            return self
                .write_root(api_key, domain_id, slot, Some(&record.content))
                .await;
        }

        let body = Self::build_record_body(record);
        let ctx = ErrorContext::for_operation("CreateRecord")
            .with_domain(domain_id)
            .with_record_name(&body.node_name);
        let created: DynuRecord = self
            .post(api_key, &format!("/dns/{domain_id}/record"), &body, &ctx)
            .await?;

        let zone = DynuDomain {
            id: created.domain_id,
            name: created.domain_name.clone(),
            ..Default::default()
        };
        let mut echoed = Self::dynu_record_to_dns_record(created, &zone);
        echoed.domain_id = domain_id.to_string();
        Ok(echoed)
    }

    async fn update_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord> {
        let api_key = parse_single_credential(credential, "dynu")?;
        if let Some(slot) = root_slot_for_update(record) {
            return self
                .write_root(api_key, domain_id, slot, Some(&record.content))
                .await;
        }

        let body = Self::build_record_body(record);
        let ctx = ErrorContext::for_operation("UpdateRecord")
            .with_domain(domain_id)
            .with_record_id(&record.id)
            .with_record_name(&body.node_name);
        let updated: DynuRecord = self
            .post(
                api_key,
                &format!("/dns/{domain_id}/record/{}", record.id),
                &body,
                &ctx,
            )
            .await?;

        let zone = DynuDomain {
            id: updated.domain_id,
            name: updated.domain_name.clone(),
            ..Default::default()
        };
        let mut echoed = Self::dynu_record_to_dns_record(updated, &zone);
        echoed.domain_id = domain_id.to_string();
        Ok(echoed)
    }

    async fn delete_record(&self, credential: &str, domain_id: &str, record_id: &str) -> Result<()> {
        let api_key = parse_single_credential(credential, "dynu")?;
        if let Some(slot) = RootSlot::from_record_id(record_id) {
            self.write_root(api_key, domain_id, slot, None).await?;
            return Ok(());
        }

        let ctx = ErrorContext::for_operation("DeleteRecord")
            .with_domain(domain_id)
            .with_record_id(record_id);
        self.delete(api_key, &format!("/dns/{domain_id}/record/{record_id}"), &ctx)
            .await
    }
}
