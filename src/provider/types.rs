//! 阿里云 API 线上类型和查询串序列化
//!
//! RPC 风格接口要求所有参数以排序后的 query string 传递，
//! 这里通过 `serde_json::Value` 做一次展平再按 RFC3986 编码。

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::error::{ProviderError, Result};

// ============ 查询串序列化 ============

/// RFC3986 URL 编码，非保留字符之外全部按 UTF-8 字节转义
fn url_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => {
                result.push(c);
            }
            _ => {
                for byte in c.to_string().as_bytes() {
                    let _ = write!(result, "%{byte:02X}");
                }
            }
        }
    }
    result
}

/// 将 `serde_json::Value` 展平为 key-value 对
///
/// 嵌套对象用 `.` 连接，数组下标从 1 开始（阿里云 RPC 约定），
/// null 直接丢弃。
fn flatten_value(prefix: &str, value: &serde_json::Value, result: &mut BTreeMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let new_key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_value(&new_key, v, result);
            }
        }
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.iter().enumerate() {
                let new_key = format!("{}.{}", prefix, i + 1);
                flatten_value(&new_key, v, result);
            }
        }
        serde_json::Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        serde_json::Value::Number(n) => {
            result.insert(prefix.to_string(), n.to_string());
        }
        serde_json::Value::Bool(b) => {
            result.insert(prefix.to_string(), b.to_string());
        }
        serde_json::Value::Null => {}
    }
}

/// 将请求结构体序列化为按 key 排序的 query string
///
/// 排序由 `BTreeMap` 保证，签名计算依赖这个顺序。
pub(super) fn serialize_to_query_string<T: Serialize>(params: &T) -> Result<String> {
    let value =
        serde_json::to_value(params).map_err(|e| ProviderError::Encode(e.to_string()))?;

    let mut flat_map = BTreeMap::new();
    flatten_value("", &value, &mut flat_map);

    let query_string = flat_map
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Ok(query_string)
}

// ============ 响应结构 ============

#[derive(Debug, Deserialize)]
pub(super) struct DescribeDomainRecordsResponse {
    #[serde(rename = "DomainRecords")]
    pub domain_records: Option<RecordsWrapper>,
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RecordsWrapper {
    #[serde(rename = "Record")]
    pub record: Option<Vec<AlidnsRecord>>,
}

/// 阿里云返回的单条记录，未列出的字段（TTL、权重等）忽略
#[derive(Debug, Deserialize)]
pub(super) struct AlidnsRecord {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeleteDomainRecordResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- url_encode ----

    #[test]
    fn url_encode_unreserved_unchanged() {
        assert_eq!(url_encode("abc123-._~"), "abc123-._~");
    }

    #[test]
    fn url_encode_space() {
        assert_eq!(url_encode("hello world"), "hello%20world");
    }

    #[test]
    fn url_encode_multibyte_utf8() {
        assert_eq!(url_encode("你好"), "%E4%BD%A0%E5%A5%BD");
    }

    #[test]
    fn url_encode_reserved_chars() {
        assert_eq!(url_encode("/?"), "%2F%3F");
        assert_eq!(url_encode("&="), "%26%3D");
    }

    // ---- serialize_to_query_string ----

    #[derive(Serialize)]
    struct SampleRequest {
        #[serde(rename = "DomainName")]
        domain_name: String,
        #[serde(rename = "PageNumber")]
        page_number: u32,
        #[serde(rename = "RRKeyWord", skip_serializing_if = "Option::is_none")]
        rr_keyword: Option<String>,
    }

    #[test]
    fn query_string_sorted_by_key() {
        let req = SampleRequest {
            domain_name: "alaudatech.net".to_string(),
            page_number: 1,
            rr_keyword: None,
        };
        // BTreeMap 保证字典序
        assert_eq!(
            serialize_to_query_string(&req).unwrap(),
            "DomainName=alaudatech.net&PageNumber=1"
        );
    }

    #[test]
    fn query_string_includes_optional_when_present() {
        let req = SampleRequest {
            domain_name: "alaudatech.net".to_string(),
            page_number: 2,
            rr_keyword: Some("jenkins".to_string()),
        };
        assert_eq!(
            serialize_to_query_string(&req).unwrap(),
            "DomainName=alaudatech.net&PageNumber=2&RRKeyWord=jenkins"
        );
    }

    #[test]
    fn query_string_encodes_values() {
        #[derive(Serialize)]
        struct Raw {
            key: String,
        }
        let req = Raw {
            key: "hello world/&".to_string(),
        };
        assert_eq!(
            serialize_to_query_string(&req).unwrap(),
            "key=hello%20world%2F%26"
        );
    }

    #[test]
    fn query_string_flattens_arrays_one_based() {
        #[derive(Serialize)]
        struct Raw {
            #[serde(rename = "Tag")]
            tag: Vec<String>,
        }
        let req = Raw {
            tag: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(serialize_to_query_string(&req).unwrap(), "Tag.1=a&Tag.2=b");
    }

    // ---- 响应反序列化 ----

    #[test]
    fn deserialize_describe_records_response() {
        let body = r#"{
            "TotalCount": 2,
            "PageNumber": 1,
            "PageSize": 100,
            "DomainRecords": {
                "Record": [
                    {"RecordId": "1001", "RR": "web", "Type": "A", "Value": "1.2.3.4", "Status": "ENABLE", "TTL": 600},
                    {"RecordId": "1002", "RR": "api", "Type": "AAAA", "Value": "2001:db8::1", "Status": "DISABLE", "TTL": 600}
                ]
            }
        }"#;
        let response: DescribeDomainRecordsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_count, Some(2));
        let records = response.domain_records.unwrap().record.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_id, "1001");
        assert_eq!(records[0].rr, "web");
        assert_eq!(records[0].record_type, "A");
        assert_eq!(records[0].value, "1.2.3.4");
        assert_eq!(records[0].status.as_deref(), Some("ENABLE"));
        assert_eq!(records[1].record_type, "AAAA");
    }

    #[test]
    fn deserialize_describe_records_empty_result() {
        // 空结果时阿里云可能省略内层数组
        let body = r#"{"TotalCount": 0, "DomainRecords": {}}"#;
        let response: DescribeDomainRecordsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_count, Some(0));
        assert!(response.domain_records.unwrap().record.is_none());
    }

    #[test]
    fn deserialize_record_without_status() {
        let body = r#"{"RecordId": "1", "RR": "a", "Type": "A", "Value": "1.1.1.1"}"#;
        let record: AlidnsRecord = serde_json::from_str(body).unwrap();
        assert!(record.status.is_none());
    }

    #[test]
    fn deserialize_add_record_response() {
        let body = r#"{"RequestId": "abc", "RecordId": "9001"}"#;
        let response: AddDomainRecordResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.record_id, "9001");
    }
}
