//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use dnsbridge_provider::{DnsProvider, DnsRecord};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装 Provider、凭证和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub credential: String,
    pub domain: String,
    pub domain_id: Option<String>,
}

impl TestContext {
    fn build(provider: Arc<dyn DnsProvider>, credential: String) -> Option<Self> {
        let domain = env::var("TEST_DOMAIN").ok()?;
        Some(Self {
            provider,
            credential,
            domain,
            domain_id: None,
        })
    }

    /// 创建 Cloudflare 测试上下文
    pub fn cloudflare() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let provider = dnsbridge_provider::CloudflareProvider::new().ok()?;
        Self::build(Arc::new(provider), api_token)
    }

    /// 创建腾讯云测试上下文（凭证为 `SecretId,SecretKey`）
    pub fn tencentcloud() -> Option<Self> {
        let secret_id = env::var("TENCENTCLOUD_SECRET_ID").ok()?;
        let secret_key = env::var("TENCENTCLOUD_SECRET_KEY").ok()?;
        let provider = dnsbridge_provider::TencentCloudProvider::new().ok()?;
        Self::build(Arc::new(provider), format!("{secret_id},{secret_key}"))
    }

    /// 创建 Dynu 测试上下文
    pub fn dynu() -> Option<Self> {
        let api_key = env::var("DYNU_API_KEY").ok()?;
        let provider = dnsbridge_provider::DynuProvider::new().ok()?;
        Self::build(Arc::new(provider), api_key)
    }

    /// 查找测试域名的 `domain_id`
    pub async fn find_domain_id(&mut self) -> Option<String> {
        if self.domain_id.is_some() {
            return self.domain_id.clone();
        }

        let domains = self.provider.list_domains(&self.credential).await.ok()?;
        let domain = domains.into_iter().find(|d| d.name == self.domain)?;
        self.domain_id = Some(domain.id.clone());
        Some(domain.id)
    }

    /// 创建 TXT 测试记录
    pub async fn create_test_record(&self, domain_id: &str) -> Option<DnsRecord> {
        let record = DnsRecord {
            domain_id: domain_id.to_string(),
            node_name: generate_test_record_name(),
            record_type: "TXT".to_string(),
            ttl: 600,
            state: true,
            content: "integration-test".to_string(),
            ..Default::default()
        };
        self.provider
            .create_record(&self.credential, domain_id, &record)
            .await
            .ok()
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, domain_id: &str, record_id: &str) {
        let _ = self
            .provider
            .delete_record(&self.credential, domain_id, record_id)
            .await;
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self, domain_id: &str) {
        if let Ok(records) = self.provider.list_records(&self.credential, domain_id).await {
            for record in records {
                if record.node_name.starts_with("_test-") {
                    self.cleanup_record(domain_id, &record.id).await;
                }
            }
        }
    }
}
