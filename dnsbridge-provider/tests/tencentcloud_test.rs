//! 腾讯云 DNSPod Provider 集成测试
//!
//! 运行方式:
//! ```bash
//! TENCENTCLOUD_SECRET_ID=xxx TENCENTCLOUD_SECRET_KEY=xxx TEST_DOMAIN=example.com \
//!     cargo test -p dnsbridge-provider --test tencentcloud_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{TestContext, generate_test_record_name};
use dnsbridge_provider::{DnsRecord, ProviderError};

#[tokio::test]
#[ignore]
async fn test_tencentcloud_list_domains() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY", "TEST_DOMAIN");

    let ctx = TestContext::tencentcloud().expect("创建测试上下文失败");
    let result = ctx.provider.list_domains(&ctx.credential).await;
    assert!(result.is_ok(), "list_domains 调用失败: {:?}", result);

    let domains = result.unwrap();
    assert!(
        domains.iter().any(|d| d.name == ctx.domain),
        "域名列表中没有测试域名"
    );
    println!("✓ list_domains 测试通过，共 {} 个域名", domains.len());
}

#[tokio::test]
#[ignore]
async fn test_tencentcloud_get_domain() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY", "TEST_DOMAIN");

    let mut ctx = TestContext::tencentcloud().expect("创建测试上下文失败");
    let domain_id = ctx.find_domain_id().await.expect("找不到测试域名");

    let domain = ctx
        .provider
        .get_domain(&ctx.credential, &domain_id)
        .await
        .expect("get_domain 调用失败");
    assert_eq!(domain.name, ctx.domain, "域名名称不匹配");
    println!("✓ get_domain 测试通过: {}", domain.name);
}

#[tokio::test]
#[ignore]
async fn test_tencentcloud_list_records_excludes_ns_soa() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY", "TEST_DOMAIN");

    let mut ctx = TestContext::tencentcloud().expect("创建测试上下文失败");
    let domain_id = ctx.find_domain_id().await.expect("找不到测试域名");

    let records = ctx
        .provider
        .list_records(&ctx.credential, &domain_id)
        .await
        .expect("list_records 调用失败");
    assert!(
        records
            .iter()
            .all(|r| r.record_type != "NS" && r.record_type != "SOA")
    );
    println!("✓ list_records 测试通过，共 {} 条记录", records.len());
}

#[tokio::test]
#[ignore]
async fn test_tencentcloud_record_lifecycle() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY", "TEST_DOMAIN");

    let mut ctx = TestContext::tencentcloud().expect("创建测试上下文失败");
    let domain_id = ctx.find_domain_id().await.expect("找不到测试域名");

    let record = DnsRecord {
        domain_id: domain_id.clone(),
        node_name: generate_test_record_name(),
        record_type: "TXT".to_string(),
        ttl: 600,
        state: true,
        content: "lifecycle-1".to_string(),
        ..Default::default()
    };

    let created = ctx
        .provider
        .create_record(&ctx.credential, &domain_id, &record)
        .await
        .expect("create_record 调用失败");
    assert!(!created.id.is_empty());

    let update = DnsRecord {
        id: created.id.clone(),
        content: "lifecycle-2".to_string(),
        ..record.clone()
    };
    let update_result = ctx
        .provider
        .update_record(&ctx.credential, &domain_id, &update)
        .await;

    ctx.cleanup_record(&domain_id, &created.id).await;

    let updated = update_result.expect("update_record 调用失败");
    assert!(updated.content.contains("lifecycle-2"));
    println!("✓ 记录生命周期测试通过: {}", record.node_name);
}

#[tokio::test]
#[ignore]
async fn test_tencentcloud_delete_missing_record() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY", "TEST_DOMAIN");

    let mut ctx = TestContext::tencentcloud().expect("创建测试上下文失败");
    let domain_id = ctx.find_domain_id().await.expect("找不到测试域名");

    let result = ctx
        .provider
        .delete_record(&ctx.credential, &domain_id, "999999999")
        .await;
    assert!(result.is_err(), "删除不存在的记录应该失败");
    println!("✓ 删除不存在记录: {:?}", result.unwrap_err());
}

#[tokio::test]
#[ignore]
async fn test_tencentcloud_invalid_credentials() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY", "TEST_DOMAIN");

    let ctx = TestContext::tencentcloud().expect("创建测试上下文失败");
    let result = ctx.provider.list_domains("AKIDinvalid,invalid-secret").await;
    assert!(
        matches!(result, Err(ProviderError::InvalidCredentials { .. })),
        "错误凭证应返回 InvalidCredentials: {:?}",
        result
    );
}

#[tokio::test]
#[ignore]
async fn test_tencentcloud_cleanup_leftovers() {
    skip_if_no_credentials!("TENCENTCLOUD_SECRET_ID", "TENCENTCLOUD_SECRET_KEY", "TEST_DOMAIN");

    let mut ctx = TestContext::tencentcloud().expect("创建测试上下文失败");
    let domain_id = ctx.find_domain_id().await.expect("找不到测试域名");
    ctx.cleanup_all_test_records(&domain_id).await;
}
