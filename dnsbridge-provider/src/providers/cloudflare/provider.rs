//! Cloudflare DnsProvider trait 实现

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::providers::common::{
    full_name_to_relative, parse_single_credential, relative_to_full_name,
};
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{DnsRecord, Domain, is_infrastructure_type};

use super::{
    AUTO_TTL, CloudflareDnsRecord, CloudflareProvider, CloudflareRecordBody, CloudflareZone,
    DEFAULT_PRIORITY, DEFAULT_READ_TTL, MAX_PAGE_SIZE_RECORDS, MAX_PAGE_SIZE_ZONES,
};

impl CloudflareProvider {
    /// 将 Cloudflare zone 转换为 Domain
    /// Cloudflare 状态：active, pending, initializing, moved；只有 active 视为可用
    pub(crate) fn zone_to_domain(zone: CloudflareZone) -> Domain {
        let state = if zone.status == "active" {
            "Active"
        } else {
            "Inactive"
        };

        Domain {
            id: zone.id,
            unicode_name: Some(zone.name.clone()),
            name: zone.name,
            state: state.to_string(),
            created_on: zone.created_on,
            updated_on: zone.modified_on,
            ..Default::default()
        }
    }

    /// 列表结果转换，丢弃 NS/SOA
    pub(crate) fn records_from_response(
        cf_records: Vec<CloudflareDnsRecord>,
        zone_id: &str,
        zone_name: &str,
    ) -> Vec<DnsRecord> {
        cf_records
            .into_iter()
            .filter(|r| !is_infrastructure_type(&r.record_type))
            .map(|r| Self::cf_record_to_dns_record(r, zone_id, zone_name))
            .collect()
    }

    /// 将 Cloudflare 记录转换为 `DnsRecord`
    pub(crate) fn cf_record_to_dns_record(
        cf_record: CloudflareDnsRecord,
        zone_id: &str,
        zone_name: &str,
    ) -> DnsRecord {
        // 1 表示"自动"
        let ttl = match cf_record.ttl {
            Some(ttl) if ttl > 1 => ttl,
            _ => DEFAULT_READ_TTL,
        };

        let content = if cf_record.content.is_empty() {
            content_from_data(&cf_record.record_type, cf_record.data.as_ref()).unwrap_or_default()
        } else {
            cf_record.content
        };

        let mut extra = HashMap::new();
        if let Some(proxied) = cf_record.proxied {
            extra.insert("proxied".to_string(), Value::Bool(proxied));
        }
        if let Some(created_on) = cf_record.created_on {
            extra.insert("created_on".to_string(), Value::String(created_on));
        }
        if let Some(data) = cf_record.data {
            extra.insert("data".to_string(), data);
        }

        DnsRecord {
            id: cf_record.id,
            domain_id: zone_id.to_string(),
            domain_name: Some(zone_name.to_string()),
            node_name: full_name_to_relative(&cf_record.name, zone_name),
            record_type: cf_record.record_type,
            ttl,
            state: true,
            content,
            priority: cf_record.priority.unwrap_or(0),
            updated_on: cf_record.modified_on,
            extra,
        }
    }

    /// 构造创建/更新请求体
    pub(crate) fn build_record_body(record: &DnsRecord, zone_name: &str) -> CloudflareRecordBody {
        let ttl = if record.ttl == 0 { AUTO_TTL } else { record.ttl };
        let priority = record.uses_priority().then_some(if record.priority == 0 {
            DEFAULT_PRIORITY
        } else {
            record.priority
        });

        CloudflareRecordBody {
            record_type: record.record_type.to_uppercase(),
            name: relative_to_full_name(&record.node_name, zone_name),
            content: record.content.clone(),
            ttl,
            priority,
        }
    }

    async fn fetch_zone(&self, token: &str, domain_id: &str, op: &'static str) -> Result<CloudflareZone> {
        let ctx = ErrorContext::for_operation(op).with_domain(domain_id);
        self.get(token, &format!("/zones/{domain_id}"), &ctx).await
    }
}

/// SRV 等记录在 content 为空时从结构化 data 拼出值
fn content_from_data(record_type: &str, data: Option<&Value>) -> Option<String> {
    let data = data?;
    match record_type {
        "SRV" => {
            let weight = data.get("weight")?.as_u64()?;
            let port = data.get("port")?.as_u64()?;
            let target = data.get("target")?.as_str()?;
            Some(format!("{weight} {port} {target}"))
        }
        "CAA" => {
            let flags = data.get("flags")?.as_u64()?;
            let tag = data.get("tag")?.as_str()?;
            let value = data.get("value")?.as_str()?;
            Some(format!("{flags} {tag} \"{value}\""))
        }
        _ => None,
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn name(&self) -> &'static str {
        "cloudflare"
    }

    fn display_name(&self) -> &'static str {
        "Cloudflare"
    }

    fn website_url(&self) -> &'static str {
        "https://dash.cloudflare.com"
    }

    async fn list_domains(&self, credential: &str) -> Result<Vec<Domain>> {
        let token = parse_single_credential(credential, self.provider_name())?;
        let ctx = ErrorContext::for_operation("ListZones");
        let zones: Vec<CloudflareZone> = self
            .get_all_pages(token, "/zones", MAX_PAGE_SIZE_ZONES, &ctx)
            .await?;
        Ok(zones.into_iter().map(Self::zone_to_domain).collect())
    }

    async fn get_domain(&self, credential: &str, domain_id: &str) -> Result<Domain> {
        let token = parse_single_credential(credential, self.provider_name())?;
        let zone = self.fetch_zone(token, domain_id, "GetZone").await?;
        Ok(Self::zone_to_domain(zone))
    }

    async fn list_records(&self, credential: &str, domain_id: &str) -> Result<Vec<DnsRecord>> {
        let token = parse_single_credential(credential, self.provider_name())?;
        // 先获取 zone 信息以得到域名，用于还原相对名称
        let zone = self.fetch_zone(token, domain_id, "ListRecords").await?;

        let ctx = ErrorContext::for_operation("ListRecords").with_domain(&zone.name);
        let cf_records: Vec<CloudflareDnsRecord> = self
            .get_all_pages(
                token,
                &format!("/zones/{domain_id}/dns_records"),
                MAX_PAGE_SIZE_RECORDS,
                &ctx,
            )
            .await?;

        Ok(Self::records_from_response(cf_records, domain_id, &zone.name))
    }

    async fn create_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord> {
        let token = parse_single_credential(credential, self.provider_name())?;
        let zone = self.fetch_zone(token, domain_id, "CreateRecord").await?;

        let body = Self::build_record_body(record, &zone.name);
        let ctx = ErrorContext::for_operation("CreateRecord")
            .with_domain(&zone.name)
            .with_record_name(&record.node_name);
        let cf_record: CloudflareDnsRecord = self
            .send_record(
                token,
                Method::POST,
                &format!("/zones/{domain_id}/dns_records"),
                &body,
                &ctx,
            )
            .await?;

        Ok(Self::cf_record_to_dns_record(cf_record, domain_id, &zone.name))
    }

    async fn update_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord> {
        let token = parse_single_credential(credential, self.provider_name())?;
        let zone = self.fetch_zone(token, domain_id, "UpdateRecord").await?;

        let body = Self::build_record_body(record, &zone.name);
        let ctx = ErrorContext::for_operation("UpdateRecord")
            .with_domain(&zone.name)
            .with_record_id(&record.id)
            .with_record_name(&record.node_name);
        let cf_record: CloudflareDnsRecord = self
            .send_record(
                token,
                Method::PUT,
                &format!("/zones/{domain_id}/dns_records/{}", record.id),
                &body,
                &ctx,
            )
            .await?;

        Ok(Self::cf_record_to_dns_record(cf_record, domain_id, &zone.name))
    }

    async fn delete_record(&self, credential: &str, domain_id: &str, record_id: &str) -> Result<()> {
        let token = parse_single_credential(credential, self.provider_name())?;
        let ctx = ErrorContext::for_operation("DeleteRecord")
            .with_domain(domain_id)
            .with_record_id(record_id);
        self.delete(
            token,
            &format!("/zones/{domain_id}/dns_records/{record_id}"),
            &ctx,
        )
        .await
    }
}
