//! Resolver backends used by the propagation check.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::{
    ResolveError, TokioResolver,
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
};

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::DnsCheckType;

/// 查询单个解析器的能力
///
/// 返回的值已渲染为字符串：A/AAAA 为地址，CNAME/NS/MX 为去掉末尾 `.` 的主机名，
/// TXT 为拼接后的文本。"无记录" 返回空列表而不是错误。
#[async_trait]
pub trait DnsLookupBackend: Send + Sync {
    async fn lookup(
        &self,
        server: SocketAddr,
        domain: &str,
        record_type: DnsCheckType,
    ) -> ToolboxResult<Vec<String>>;
}

/// 基于 hickory 的实现，每次查询针对指定解析器构建一个 resolver
#[derive(Debug, Clone)]
pub struct HickoryBackend {
    query_timeout: Duration,
}

impl HickoryBackend {
    pub fn new(query_timeout: Duration) -> Self {
        Self { query_timeout }
    }

    fn resolver_for(&self, server: SocketAddr) -> TokioResolver {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[server.ip()], server.port(), true),
        );
        let mut opts = ResolverOpts::default();
        opts.timeout = self.query_timeout;
        opts.attempts = 1;
        // 每次检查都要看到解析器当前的答案
        opts.cache_size = 0;
        TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build()
    }
}

impl Default for HickoryBackend {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

fn host(name: &impl ToString) -> String {
    name.to_string().trim_end_matches('.').to_string()
}

fn lookup_error(server: SocketAddr, e: &ResolveError) -> ToolboxError {
    ToolboxError::NetworkError(format!("lookup via {server} failed: {e}"))
}

#[async_trait]
impl DnsLookupBackend for HickoryBackend {
    async fn lookup(
        &self,
        server: SocketAddr,
        domain: &str,
        record_type: DnsCheckType,
    ) -> ToolboxResult<Vec<String>> {
        let resolver = self.resolver_for(server);
        log::debug!("[dns_check] {record_type} {domain} @ {server}");

        let result = match record_type {
            DnsCheckType::A => resolver
                .ipv4_lookup(domain)
                .await
                .map(|r| r.iter().map(ToString::to_string).collect()),
            DnsCheckType::Aaaa => resolver
                .ipv6_lookup(domain)
                .await
                .map(|r| r.iter().map(ToString::to_string).collect()),
            DnsCheckType::Cname => resolver
                .lookup(domain, hickory_resolver::proto::rr::RecordType::CNAME)
                .await
                .map(|r| {
                    r.record_iter()
                        .filter_map(|record| record.data().as_cname().map(|c| host(&c.0)))
                        .collect()
                }),
            DnsCheckType::Mx => resolver
                .mx_lookup(domain)
                .await
                .map(|r| r.iter().map(|mx| host(mx.exchange())).collect()),
            DnsCheckType::Txt => resolver.txt_lookup(domain).await.map(|r| {
                r.iter()
                    .map(|txt| {
                        txt.iter()
                            .map(|data| String::from_utf8_lossy(data).into_owned())
                            .collect::<String>()
                    })
                    .collect()
            }),
            DnsCheckType::Ns => resolver
                .ns_lookup(domain)
                .await
                .map(|r| r.iter().map(|ns| host(&ns.0)).collect()),
        };

        match result {
            Ok(values) => Ok(values),
            Err(e) if e.is_no_records_found() => Ok(Vec::new()),
            Err(e) => Err(lookup_error(server, &e)),
        }
    }
}
