//! DNS 记录管理流程
//!
//! [`DnsClient`] 在 [`DnsProvider`] 之上实现幂等新增、精确删除、
//! 全量列表和批量清理。所有记录都挂在一个固定的 base domain 下，
//! 命令行里只出现相对前缀。

use std::net::IpAddr;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::provider::{AlidnsProvider, DEFAULT_ENDPOINT, DnsProvider, MAX_PAGE_SIZE};
use crate::types::{CleanupFailure, CleanupReport, DomainRecord, NewRecord, RecordQuery, RecordType};

/// 默认 base domain
pub const DEFAULT_BASE_DOMAIN: &str = "alaudatech.net";

/// `--tool-domains` 展开的工具名，顺序即生成顺序
const TOOL_NAMES: [&str; 6] = ["jenkins", "gitlab", "sonar", "harbor", "katanomi", "nexus"];

/// 客户端配置，空字段回退到默认值
#[derive(Debug, Clone)]
pub struct Config {
    pub access_key_id: String,
    pub access_key_secret: String,
    /// 为空时使用 [`DEFAULT_BASE_DOMAIN`]
    pub base_domain: String,
    /// 为空时使用 [`DEFAULT_ENDPOINT`](crate::provider::DEFAULT_ENDPOINT)
    pub endpoint: String,
}

/// DNS 记录管理客户端
pub struct DnsClient {
    provider: Arc<dyn DnsProvider>,
    base_domain: String,
}

/// 根据 IP 生成固定工具集的域名前缀
///
/// IP 中的 `:` 和 `.` 全部替换为 `-`，再拼接工具名，
/// 例如 `10.0.0.1` 生成 `10-0-0-1-jenkins` 等 6 个前缀。
pub fn tool_domains(ip: &str) -> Vec<String> {
    let name = ip.replace([':', '.'], "-");
    TOOL_NAMES
        .iter()
        .map(|tool| format!("{name}-{tool}"))
        .collect()
}

impl DnsClient {
    /// 从配置创建客户端，空的 `base_domain` / `endpoint` 自动使用默认值
    #[must_use]
    pub fn new(cfg: Config) -> Self {
        let endpoint = if cfg.endpoint.is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            cfg.endpoint
        };
        let base_domain = if cfg.base_domain.is_empty() {
            DEFAULT_BASE_DOMAIN.to_string()
        } else {
            cfg.base_domain
        };

        let provider =
            AlidnsProvider::with_endpoint(cfg.access_key_id, cfg.access_key_secret, endpoint);

        Self {
            provider: Arc::new(provider),
            base_domain,
        }
    }

    /// 使用自定义 provider 创建客户端（测试用）
    #[must_use]
    pub fn with_provider(provider: Arc<dyn DnsProvider>, base_domain: &str) -> Self {
        Self {
            provider,
            base_domain: base_domain.to_string(),
        }
    }

    /// 记录所挂载的 base domain
    #[must_use]
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    fn full_domain(&self, prefix: &str) -> String {
        format!("{prefix}.{}", self.base_domain)
    }

    /// 为前缀添加解析记录，记录类型由 IP 形态决定（IPv4 -> A，IPv6 -> AAAA）
    ///
    /// 同前缀同值的记录已存在时跳过创建，保证幂等。
    pub async fn add_record(&self, prefix: &str, ip: &str) -> Result<()> {
        let full_domain = self.full_domain(prefix);

        let addr: IpAddr = ip.parse().map_err(|_| Error::InvalidIp(ip.to_string()))?;
        let record_type = RecordType::from(addr);

        let existing = self.lookup_all(Some(prefix), Some(record_type)).await?;
        if existing
            .iter()
            .any(|record| record.rr == prefix && record.value == ip)
        {
            println!("Domain '{full_domain}' is already mapped to {ip}, skipping");
            return Ok(());
        }

        let record = NewRecord {
            rr: prefix.to_string(),
            record_type,
            value: ip.to_string(),
        };
        self.provider.create_record(&self.base_domain, &record).await?;

        println!("Successfully added DNS record: {full_domain} -> {ip}");
        Ok(())
    }

    /// 删除前缀对应的解析记录
    ///
    /// 优先删除值等于 `ip` 的记录，没有匹配值时退回第一条同名记录。
    /// 记录不存在视为成功（幂等）。
    pub async fn delete_record(&self, prefix: &str, ip: &str) -> Result<()> {
        let full_domain = self.full_domain(prefix);

        let Some(record) = self.find_record(prefix, Some(ip)).await? else {
            println!("Domain '{full_domain}' does not exist, no cleanup needed");
            return Ok(());
        };

        self.provider.delete_record(&record.id).await?;

        println!("Successfully deleted DNS record: {full_domain} (ID: {})", record.id);
        Ok(())
    }

    /// 列出 base domain 下的全部记录（翻页取完）
    pub async fn list_records(&self) -> Result<Vec<DomainRecord>> {
        self.lookup_all(None, None).await
    }

    /// 批量删除多个前缀的记录，单条失败不中断
    ///
    /// 不存在的前缀记为跳过，失败的前缀连同原因记入报告，
    /// 由调用方决定退出状态。
    pub async fn cleanup_records(&self, prefixes: &[String]) -> CleanupReport {
        println!("Cleaning up {} specified domain(s)...", prefixes.len());

        let mut report = CleanupReport::default();

        for prefix in prefixes {
            let found = match self.find_record(prefix, None).await {
                Ok(found) => found,
                Err(err) => {
                    log::error!("Failed to find record for {prefix}: {err}");
                    report.failures.push(CleanupFailure {
                        prefix: prefix.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let Some(record) = found else {
                println!("Domain '{prefix}.{}' does not exist, skipping", self.base_domain);
                report.skipped += 1;
                continue;
            };

            if let Err(err) = self.provider.delete_record(&record.id).await {
                log::error!("Failed to delete {prefix}.{}: {err}", self.base_domain);
                report.failures.push(CleanupFailure {
                    prefix: prefix.clone(),
                    reason: err.to_string(),
                });
                continue;
            }

            println!("Deleted: {prefix}.{} (ID: {})", self.base_domain, record.id);
            report.deleted += 1;
        }

        report
    }

    /// 查找前缀对应的记录
    ///
    /// 关键字查询是子串匹配，这里再按 RR 精确过滤一遍。
    /// 给定 `ip` 时优先返回值相等的记录。
    async fn find_record(&self, prefix: &str, ip: Option<&str>) -> Result<Option<DomainRecord>> {
        let mut matches: Vec<DomainRecord> = self
            .lookup_all(Some(prefix), None)
            .await?
            .into_iter()
            .filter(|record| record.rr == prefix)
            .collect();

        if let Some(ip) = ip
            && let Some(index) = matches.iter().position(|record| record.value == ip)
        {
            return Ok(Some(matches.swap_remove(index)));
        }

        Ok(matches.into_iter().next())
    }

    /// 按条件翻页取回所有记录
    async fn lookup_all(
        &self,
        rr_keyword: Option<&str>,
        record_type: Option<RecordType>,
    ) -> Result<Vec<DomainRecord>> {
        let mut records = Vec::new();
        let mut page_number = 1;

        loop {
            let query = RecordQuery {
                rr_keyword: rr_keyword.map(str::to_string),
                record_type,
                page_number,
                page_size: MAX_PAGE_SIZE,
            };

            let page = self.provider.lookup_records(&self.base_domain, &query).await?;
            let fetched = page.records.len();
            records.extend(page.records);

            // 空页兜底，TotalCount 在并发删除时可能偏大
            if fetched == 0 || u32::try_from(records.len()).unwrap_or(u32::MAX) >= page.total_count
            {
                break;
            }
            page_number += 1;
        }

        Ok(records)
    }
}
