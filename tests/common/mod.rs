//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use dnscli::{Config, DnsClient};

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

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 从环境变量构造测试客户端
///
/// `TEST_BASE_DOMAIN` 指定测试用的 base domain，
/// `ALIYUN_DNS_ENDPOINT` 可选，缺省走默认 endpoint。
pub fn test_client() -> DnsClient {
    DnsClient::new(Config {
        access_key_id: env::var("ALIYUN_ACCESS_KEY_ID").unwrap_or_default(),
        access_key_secret: env::var("ALIYUN_ACCESS_KEY_SECRET").unwrap_or_default(),
        base_domain: env::var("TEST_BASE_DOMAIN").unwrap_or_default(),
        endpoint: env::var("ALIYUN_DNS_ENDPOINT").unwrap_or_default(),
    })
}

/// 生成唯一的测试记录前缀
pub fn generate_test_prefix() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 清理所有遗留的测试记录（以 _test- 开头的前缀）
pub async fn purge_test_records(client: &DnsClient) {
    let Ok(records) = client.list_records().await else {
        return;
    };

    let prefixes: Vec<String> = records
        .into_iter()
        .filter(|record| record.rr.starts_with("_test-"))
        .map(|record| record.rr)
        .collect();

    if !prefixes.is_empty() {
        client.cleanup_records(&prefixes).await;
    }
}
