//! Propagation check: 依次询问公共解析器，取第一个非空答案

use chrono::Utc;
use tokio::time::{Instant, timeout, timeout_at};

use crate::error::ToolboxError;
use crate::types::{DnsCheckOptions, DnsCheckResult, DnsCheckType};

use super::resolver::DnsLookupBackend;

/// 比较前的规范化：去空白、小写、去掉一个末尾 `.`
pub(crate) fn normalize_value(value: &str) -> String {
    let value = value.trim().to_lowercase();
    match value.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => value,
    }
}

/// `domain` and `record_type` are already validated.
pub(crate) async fn check_dns(
    backend: &dyn DnsLookupBackend,
    options: &DnsCheckOptions,
    domain: &str,
    record_type: DnsCheckType,
    expected: Option<&str>,
) -> DnsCheckResult {
    // 空白的期望值等同于未提供
    let expected = expected.map(str::trim).filter(|e| !e.is_empty());
    let deadline = Instant::now() + options.overall_timeout;

    let mut values: Vec<String> = Vec::new();
    let mut last_error: Option<ToolboxError> = None;
    let mut dns_server: Option<String> = None;

    for server in &options.resolvers {
        let attempt = if Instant::now() < deadline {
            timeout_at(
                deadline,
                timeout(
                    options.per_resolver_timeout,
                    backend.lookup(*server, domain, record_type),
                ),
            )
            .await
            .ok()
        } else {
            None
        };

        // 每轮覆盖上一轮的结果，最后报告的是最后一个解析器的错误
        let Some(outcome) = attempt else {
            values.clear();
            last_error = Some(ToolboxError::NetworkError(format!(
                "check timed out after {}s",
                options.overall_timeout.as_secs()
            )));
            log::warn!("[dns_check] {record_type} {domain}: overall deadline reached before {server}");
            break;
        };

        match outcome {
            Ok(Ok(found)) => {
                values = found;
                last_error = None;
                if !values.is_empty() {
                    dns_server = Some(server.to_string());
                    break;
                }
            }
            Ok(Err(e)) => {
                log::debug!("[dns_check] {record_type} {domain} @ {server}: {e}");
                values.clear();
                last_error = Some(e);
            }
            Err(_) => {
                log::debug!("[dns_check] {record_type} {domain} @ {server}: timed out");
                values.clear();
                last_error = Some(ToolboxError::NetworkError(format!(
                    "lookup via {server} timed out after {}s",
                    options.per_resolver_timeout.as_secs()
                )));
            }
        }
    }

    let (matched, message) = if let Some(e) = &last_error {
        (false, format!("DNS query failed: {}", e.detail()))
    } else if values.is_empty() {
        (false, "No DNS records found".to_string())
    } else if let Some(expected) = expected {
        let want = normalize_value(expected);
        if values.iter().any(|v| normalize_value(v) == want) {
            (true, "DNS record matches expected value".to_string())
        } else {
            (false, "DNS record does not match expected value".to_string())
        }
    } else {
        (true, "DNS record found".to_string())
    };

    DnsCheckResult {
        domain: domain.to_string(),
        record_type: record_type.to_string(),
        values,
        expected: expected.map(ToString::to_string),
        matched,
        message,
        timestamp: Utc::now().to_rfc3339(),
        dns_server,
    }
}
