//! 统一错误类型定义

use thiserror::Error;

use crate::provider::ProviderError;

/// 记录操作和 CLI 流程的错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 无法解析为 IPv4 / IPv6 的输入
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    /// Provider 层错误
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// 批量操作部分失败，进程应以非零状态退出
    #[error("{failed} of {total} domain(s) failed")]
    PartialFailure { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
