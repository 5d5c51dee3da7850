//! DNS 记录领域模型
//!
//! 与具体 provider 无关的记录类型，provider 层负责和阿里云
//! 的线上格式互相转换。

use std::fmt;
use std::net::IpAddr;

use crate::provider::MAX_PAGE_SIZE;

// ============ 记录类型 ============

/// 受管理的 DNS 记录类型（只有 A / AAAA）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// IPv4 地址记录
    A,
    /// IPv6 地址记录
    Aaaa,
}

impl RecordType {
    /// API 参数使用的大写形式
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
        }
    }
}

impl From<IpAddr> for RecordType {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::A,
            IpAddr::V6(_) => Self::Aaaa,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ 记录 ============

/// 一条已存在的解析记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    /// Provider 分配的记录 ID，删除时必须提供
    pub id: String,
    /// 主机记录（相对 base domain 的前缀）
    pub rr: String,
    /// 记录类型原样透出（列表可能包含 CNAME、TXT 等非受管类型）
    pub record_type: String,
    /// 记录值
    pub value: String,
    /// 记录状态，如 "ENABLE"
    pub status: String,
}

/// 待创建的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub rr: String,
    pub record_type: RecordType,
    pub value: String,
}

// ============ 查询 ============

/// 记录查询参数，对应 DescribeDomainRecords 的过滤条件
#[derive(Debug, Clone)]
pub struct RecordQuery {
    /// 主机记录关键字，阿里云按子串模糊匹配
    pub rr_keyword: Option<String>,
    /// 按记录类型过滤
    pub record_type: Option<RecordType>,
    /// 页码，从 1 开始
    pub page_number: u32,
    /// 单页记录数
    pub page_size: u32,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            rr_keyword: None,
            record_type: None,
            page_number: 1,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// 一页查询结果
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub records: Vec<DomainRecord>,
    /// 所有页合计的记录总数
    pub total_count: u32,
}

// ============ 批量清理 ============

/// cleanup 的聚合结果，单条失败不会中断整体流程
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// 成功删除的记录数
    pub deleted: usize,
    /// 记录不存在而跳过的前缀数
    pub skipped: usize,
    /// 失败的前缀及原因
    pub failures: Vec<CleanupFailure>,
}

/// 单个前缀的清理失败信息
#[derive(Debug)]
pub struct CleanupFailure {
    pub prefix: String,
    pub reason: String,
}
