//! 阿里云 DNS 接入层
//!
//! [`DnsProvider`] 是记录操作的最小抽象，[`AlidnsProvider`] 通过
//! 阿里云 OpenAPI（ACS3-HMAC-SHA256 签名）实现它。上层的记录
//! 流程只依赖 trait，便于在测试中替换。

mod error;
mod http;
mod sign;
mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::types::{DomainRecord, NewRecord, RecordPage, RecordQuery};

pub use error::{ProviderError, Result};

use types::{
    AddDomainRecordResponse, DeleteDomainRecordResponse, DescribeDomainRecordsResponse,
};

/// 默认 API endpoint
pub const DEFAULT_ENDPOINT: &str = "alidns.cn-hangzhou.aliyuncs.com";
pub(crate) const ALIDNS_VERSION: &str = "2015-01-09";
/// 空 body 的 SHA256 hash (固定值)
pub(crate) const EMPTY_BODY_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
/// 阿里云 API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// DNS 记录操作抽象
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 查询一页记录，`query` 中的过滤条件全部可选
    async fn lookup_records(&self, domain_name: &str, query: &RecordQuery) -> Result<RecordPage>;

    /// 创建记录，返回 provider 分配的记录 ID
    async fn create_record(&self, domain_name: &str, record: &NewRecord) -> Result<String>;

    /// 按记录 ID 删除
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}

/// Alidns provider implementation.
///
/// Authenticates via HMAC-SHA256 V3 signing with Access Key ID/Secret.
///
/// # Construction
///
/// ```rust,no_run
/// use dnscli::AlidnsProvider;
///
/// let provider = AlidnsProvider::new(
///     "your-access-key-id".to_string(),
///     "your-access-key-secret".to_string(),
/// );
/// ```
pub struct AlidnsProvider {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) access_key_id: String,
    pub(crate) access_key_secret: String,
}

impl AlidnsProvider {
    /// Creates a provider talking to the default endpoint.
    pub fn new(access_key_id: String, access_key_secret: String) -> Self {
        Self::with_endpoint(access_key_id, access_key_secret, DEFAULT_ENDPOINT.to_string())
    }

    /// Creates a provider talking to a specific endpoint host.
    pub fn with_endpoint(
        access_key_id: String,
        access_key_secret: String,
        endpoint: String,
    ) -> Self {
        Self {
            client: create_http_client(),
            endpoint,
            access_key_id,
            access_key_secret,
        }
    }
}

#[async_trait]
impl DnsProvider for AlidnsProvider {
    async fn lookup_records(&self, domain_name: &str, query: &RecordQuery) -> Result<RecordPage> {
        #[derive(Serialize)]
        struct DescribeDomainRecordsRequest {
            #[serde(rename = "DomainName")]
            domain_name: String,
            #[serde(rename = "PageNumber")]
            page_number: u32,
            #[serde(rename = "PageSize")]
            page_size: u32,
            #[serde(rename = "RRKeyWord", skip_serializing_if = "Option::is_none")]
            rr_keyword: Option<String>,
            #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
            record_type: Option<String>,
        }

        let req = DescribeDomainRecordsRequest {
            domain_name: domain_name.to_string(),
            page_number: query.page_number,
            page_size: query.page_size.min(MAX_PAGE_SIZE),
            // 空关键字等同于不过滤
            rr_keyword: query.rr_keyword.clone().filter(|k| !k.is_empty()),
            record_type: query.record_type.map(|t| t.as_str().to_string()),
        };

        let response: DescribeDomainRecordsResponse =
            self.request("DescribeDomainRecords", &req).await?;

        let total_count = response.total_count.unwrap_or(0);
        let records = response
            .domain_records
            .and_then(|r| r.record)
            .unwrap_or_default()
            .into_iter()
            .map(|r| DomainRecord {
                id: r.record_id,
                rr: r.rr,
                record_type: r.record_type,
                value: r.value,
                status: r.status.unwrap_or_default(),
            })
            .collect();

        Ok(RecordPage {
            records,
            total_count,
        })
    }

    async fn create_record(&self, domain_name: &str, record: &NewRecord) -> Result<String> {
        #[derive(Serialize)]
        struct AddDomainRecordRequest {
            #[serde(rename = "DomainName")]
            domain_name: String,
            #[serde(rename = "RR")]
            rr: String,
            #[serde(rename = "Type")]
            record_type: String,
            #[serde(rename = "Value")]
            value: String,
        }

        let req = AddDomainRecordRequest {
            domain_name: domain_name.to_string(),
            rr: record.rr.clone(),
            record_type: record.record_type.as_str().to_string(),
            value: record.value.clone(),
        };

        let response: AddDomainRecordResponse = self.request("AddDomainRecord", &req).await?;

        Ok(response.record_id)
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        #[derive(Serialize)]
        struct DeleteDomainRecordRequest {
            #[serde(rename = "RecordId")]
            record_id: String,
        }

        let req = DeleteDomainRecordRequest {
            record_id: record_id.to_string(),
        };

        self.request::<DeleteDomainRecordResponse, _>("DeleteDomainRecord", &req)
            .await?;

        Ok(())
    }
}
