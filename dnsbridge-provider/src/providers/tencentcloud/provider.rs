//! 腾讯云 DNSPod DnsProvider trait 实现

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{DnsRecord, Domain, is_apex_node, is_infrastructure_type};

use super::types::{
    CreateRecordResponse, DeleteRecordRequest, DescribeDomainListRequest, DescribeDomainRequest,
    DescribeDomainResponse, DescribeRecordListRequest, DnspodDomain, DnspodDomainInfo,
    DnspodRecord, DomainListResponse, RecordListResponse, RecordWriteRequest,
};
use super::{
    DEFAULT_RECORD_LINE, DEFAULT_TTL, MAX_PAGE_SIZE, TencentCloudProvider, TencentCredentials,
};

/// 记录列表为空时 DescribeRecordList 返回的错误码
const NO_DATA_OF_RECORD: &str = "ResourceNotFound.NoDataOfRecord";

fn domain_state(status: Option<&str>) -> &'static str {
    match status {
        Some(s) if s.eq_ignore_ascii_case("enable") => "Active",
        _ => "Inactive",
    }
}

impl TencentCloudProvider {
    /// 域名 ID 即域名本身
    pub(crate) fn list_item_to_domain(d: DnspodDomain) -> Domain {
        Domain {
            id: d.name.clone(),
            unicode_name: Some(d.name.clone()),
            state: domain_state(d.status.as_deref()).to_string(),
            ttl: d.ttl.unwrap_or(DEFAULT_TTL),
            created_on: d.created_on,
            updated_on: d.updated_on,
            name: d.name,
            ..Default::default()
        }
    }

    pub(crate) fn info_to_domain(info: DnspodDomainInfo) -> Domain {
        Domain {
            id: info.domain.clone(),
            unicode_name: Some(info.domain.clone()),
            state: domain_state(info.status.as_deref()).to_string(),
            ttl: info.ttl.unwrap_or(DEFAULT_TTL),
            created_on: info.created_on,
            updated_on: info.updated_on,
            name: info.domain,
            ..Default::default()
        }
    }

    /// 一页记录的转换，丢弃 NS/SOA
    pub(crate) fn records_from_response(batch: Vec<DnspodRecord>, domain: &str) -> Vec<DnsRecord> {
        batch
            .into_iter()
            .filter(|r| !is_infrastructure_type(&r.record_type))
            .map(|r| Self::record_to_dns_record(r, domain))
            .collect()
    }

    pub(crate) fn record_to_dns_record(r: DnspodRecord, domain: &str) -> DnsRecord {
        let node_name = if r.name == "@" { String::new() } else { r.name };
        let state = r
            .status
            .as_deref()
            .is_none_or(|s| s.eq_ignore_ascii_case("ENABLE"));

        let mut extra = HashMap::new();
        if let Some(weight) = r.weight {
            extra.insert("weight".to_string(), Value::from(weight));
        }
        if let Some(line) = r.line {
            extra.insert("line".to_string(), Value::String(line));
        }
        if let Some(remark) = r.remark.filter(|s| !s.is_empty()) {
            extra.insert("remark".to_string(), Value::String(remark));
        }

        DnsRecord {
            id: r.record_id.to_string(),
            domain_id: domain.to_string(),
            domain_name: Some(domain.to_string()),
            node_name,
            record_type: r.record_type,
            ttl: r.ttl.filter(|t| *t > 0).unwrap_or(DEFAULT_TTL),
            state,
            content: r.value,
            priority: r.mx.unwrap_or(0),
            updated_on: r.updated_on,
            extra,
        }
    }

    /// 构造 CreateRecord / ModifyRecord 请求体
    pub(crate) fn build_write_request(
        domain: &str,
        record_id: Option<u64>,
        record: &DnsRecord,
    ) -> RecordWriteRequest {
        let record_type = record.record_type.to_uppercase();
        let sub_domain = if is_apex_node(&record.node_name) {
            "@".to_string()
        } else {
            record.node_name.trim().to_string()
        };
        let mx = (record_type == "MX").then_some(record.priority);

        RecordWriteRequest {
            domain: domain.to_string(),
            record_id,
            sub_domain,
            record_type,
            record_line: DEFAULT_RECORD_LINE.to_string(),
            value: record.content.clone(),
            ttl: if record.ttl == 0 { DEFAULT_TTL } else { record.ttl },
            mx,
            status: if record.state { "ENABLE" } else { "DISABLE" }.to_string(),
        }
    }

    /// 写入成功后回显的记录（API 只返回 RecordId）
    fn echo_record(domain: &str, record_id: String, req: &RecordWriteRequest) -> DnsRecord {
        DnsRecord {
            id: record_id,
            domain_id: domain.to_string(),
            domain_name: Some(domain.to_string()),
            node_name: if req.sub_domain == "@" {
                String::new()
            } else {
                req.sub_domain.clone()
            },
            record_type: req.record_type.clone(),
            ttl: req.ttl,
            state: req.status == "ENABLE",
            content: req.value.clone(),
            priority: req.mx.unwrap_or(0),
            ..Default::default()
        }
    }

    fn parse_record_id(&self, record_id: &str) -> Result<u64> {
        record_id
            .trim()
            .parse()
            .map_err(|_| ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "record_id".to_string(),
                detail: format!("'{record_id}' is not a numeric record id"),
            })
    }
}

#[async_trait]
impl DnsProvider for TencentCloudProvider {
    fn name(&self) -> &'static str {
        "tencentcloud"
    }

    fn display_name(&self) -> &'static str {
        "腾讯云 DNSPod"
    }

    fn website_url(&self) -> &'static str {
        "https://console.cloud.tencent.com/cns"
    }

    async fn list_domains(&self, credential: &str) -> Result<Vec<Domain>> {
        let creds = TencentCredentials::parse(credential)?;
        let mut domains = Vec::new();
        let mut offset = 0_u32;

        loop {
            let req = DescribeDomainListRequest {
                offset,
                limit: MAX_PAGE_SIZE,
            };
            let resp: DomainListResponse = self
                .request(
                    creds,
                    "DescribeDomainList",
                    &req,
                    ErrorContext::for_operation("DescribeDomainList"),
                )
                .await?;

            let total = resp.domain_count_info.and_then(|c| c.all_total).unwrap_or(0);
            let batch = resp.domain_list.unwrap_or_default();
            let fetched = u32::try_from(batch.len()).unwrap_or(u32::MAX);
            domains.extend(batch.into_iter().map(Self::list_item_to_domain));

            offset = offset.saturating_add(fetched);
            if fetched == 0 || offset >= total {
                break;
            }
        }

        Ok(domains)
    }

    async fn get_domain(&self, credential: &str, domain_id: &str) -> Result<Domain> {
        let creds = TencentCredentials::parse(credential)?;
        let req = DescribeDomainRequest { domain: domain_id };
        let ctx = ErrorContext::for_operation("DescribeDomain").with_domain(domain_id);
        let resp: DescribeDomainResponse = self
            .request(creds, "DescribeDomain", &req, ctx)
            .await?;
        Ok(Self::info_to_domain(resp.domain_info))
    }

    async fn list_records(&self, credential: &str, domain_id: &str) -> Result<Vec<DnsRecord>> {
        let creds = TencentCredentials::parse(credential)?;
        let mut records = Vec::new();
        let mut offset = 0_u32;

        loop {
            let req = DescribeRecordListRequest {
                domain: domain_id,
                offset,
                limit: MAX_PAGE_SIZE,
            };
            let resp: RecordListResponse =
                match self.request_raw(creds, "DescribeRecordList", &req).await? {
                    Ok(resp) => resp,
                    // 没有任何记录
                    Err(raw) if raw.code.as_deref() == Some(NO_DATA_OF_RECORD) => break,
                    Err(raw) => {
                        let ctx = ErrorContext::for_operation("DescribeRecordList")
                            .with_domain(domain_id);
                        return Err(self.map_error(raw, ctx));
                    }
                };

            let total = resp
                .record_count_info
                .and_then(|c| c.total_count)
                .unwrap_or(0);
            let batch = resp.record_list.unwrap_or_default();
            let fetched = u32::try_from(batch.len()).unwrap_or(u32::MAX);
            records.extend(Self::records_from_response(batch, domain_id));

            offset = offset.saturating_add(fetched);
            if fetched == 0 || offset >= total {
                break;
            }
        }

        Ok(records)
    }

    async fn create_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord> {
        let creds = TencentCredentials::parse(credential)?;
        let req = Self::build_write_request(domain_id, None, record);
        let ctx = ErrorContext::for_operation("CreateRecord")
            .with_domain(domain_id)
            .with_record_name(&req.sub_domain);

        let resp: CreateRecordResponse = self.request(creds, "CreateRecord", &req, ctx).await?;
        Ok(Self::echo_record(
            domain_id,
            resp.record_id.to_string(),
            &req,
        ))
    }

    async fn update_record(
        &self,
        credential: &str,
        domain_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord> {
        let creds = TencentCredentials::parse(credential)?;
        let record_id = self.parse_record_id(&record.id)?;
        let req = Self::build_write_request(domain_id, Some(record_id), record);
        let ctx = ErrorContext::for_operation("ModifyRecord")
            .with_domain(domain_id)
            .with_record_id(&record.id)
            .with_record_name(&req.sub_domain);

        let _: Value = self.request(creds, "ModifyRecord", &req, ctx).await?;
        Ok(Self::echo_record(domain_id, record_id.to_string(), &req))
    }

    async fn delete_record(&self, credential: &str, domain_id: &str, record_id: &str) -> Result<()> {
        let creds = TencentCredentials::parse(credential)?;
        let id = self.parse_record_id(record_id)?;
        let req = DeleteRecordRequest {
            domain: domain_id,
            record_id: id,
        };
        let ctx = ErrorContext::for_operation("DeleteRecord")
            .with_domain(domain_id)
            .with_record_id(record_id);

        let _: Value = self.request(creds, "DeleteRecord", &req, ctx).await?;
        Ok(())
    }
}
