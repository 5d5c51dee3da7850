//! Provider 层错误类型

use thiserror::Error;

/// 阿里云 DNS API 调用过程中产生的错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 网络层错误（连接失败、响应读取失败等）
    #[error("network error: {0}")]
    Network(String),

    /// 请求超时
    #[error("request timed out: {0}")]
    Timeout(String),

    /// API 返回的业务错误，Code 与 Message 原样透出
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// 响应体解析失败
    #[error("failed to parse API response: {0}")]
    Parse(String),

    /// 请求参数无法序列化为查询字符串
    #[error("failed to encode request parameters: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let err = ProviderError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn display_timeout_error() {
        let err = ProviderError::Timeout("operation timed out".to_string());
        assert_eq!(err.to_string(), "request timed out: operation timed out");
    }

    #[test]
    fn display_api_error_includes_code_and_message() {
        let err = ProviderError::Api {
            code: "InvalidAccessKeyId.NotFound".to_string(),
            message: "Specified access key is not found.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error InvalidAccessKeyId.NotFound: Specified access key is not found."
        );
    }

    #[test]
    fn display_parse_error() {
        let err = ProviderError::Parse("missing field RecordId".to_string());
        assert_eq!(
            err.to_string(),
            "failed to parse API response: missing field RecordId"
        );
    }

    #[test]
    fn display_encode_error() {
        let err = ProviderError::Encode("unsupported value".to_string());
        assert_eq!(
            err.to_string(),
            "failed to encode request parameters: unsupported value"
        );
    }
}
