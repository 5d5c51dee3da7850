//! Alidns HTTP request execution (RPC style: parameters travel in the query string)

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::{ProviderError, Result};
use super::types::serialize_to_query_string;
use super::{ALIDNS_VERSION, AlidnsProvider, EMPTY_BODY_SHA256};

/// Maximum number of response bytes to include in debug logs.
const LOG_BODY_LIMIT: usize = 256;

impl AlidnsProvider {
    /// Execute an Alidns API request. The body is always empty, all
    /// parameters (including the action's arguments) go through the
    /// signed query string.
    pub(crate) async fn request<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        action: &str,
        params: &B,
    ) -> Result<T> {
        // 1. Serialize parameters into the sorted query string
        let query_string = serialize_to_query_string(params)?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();

        // 2. Generate signature (covers the query string and headers)
        let authorization = self.sign(action, &query_string, &timestamp, &nonce);

        let url = format!("https://{}/?{query_string}", self.endpoint);

        log::debug!("POST {url} (Action: {action})");

        // 3. Send request with the signed header set
        let response = self
            .client
            .post(&url)
            .header("Host", &self.endpoint)
            .header("x-acs-action", action)
            .header("x-acs-version", ALIDNS_VERSION)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", EMPTY_BODY_SHA256)
            .header("Authorization", authorization)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(format!("failed to read response body: {e}")))?;

        log::debug!("Response status: {status}, body: {}", truncate_for_log(&response_text));

        // For HTTP 4xx/5xx errors, try parsing the JSON error body
        if status >= 400 {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&response_text)
                && let Some((code, message)) = extract_api_error(&value)
            {
                log::error!("API error: {code} - {message}");
                return Err(ProviderError::Api { code, message });
            }
            // Unable to resolve as a structured error
            return Err(ProviderError::Network(format!(
                "HTTP {status}: {response_text}"
            )));
        }

        // 4. Parse to Value first (only tokenize the body once)
        let value: serde_json::Value = serde_json::from_str(&response_text)
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        // 5. Some failures come back with HTTP 200 and an error envelope
        if let Some((code, message)) = extract_api_error(&value) {
            log::error!("API error: {code} - {message}");
            return Err(ProviderError::Api { code, message });
        }

        // 6. Convert to the target type
        serde_json::from_value(value).map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

/// Extract the Code/Message pair of an Alidns error envelope, if present.
fn extract_api_error(value: &serde_json::Value) -> Option<(String, String)> {
    let code = value.get("Code").and_then(|v| v.as_str())?;
    let message = value.get("Message").and_then(|v| v.as_str())?;
    Some((code.to_string(), message.to_string()))
}

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for logging, keeping multi-byte characters intact.
fn truncate_for_log(s: &str) -> String {
    if s.len() <= LOG_BODY_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, LOG_BODY_LIMIT)],
            s.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ---- extract_api_error ----

    #[test]
    fn error_envelope_extracted() {
        let value = json!({
            "RequestId": "A6B3-xxxx",
            "Code": "DomainRecordDuplicate",
            "Message": "The DNS record already exists."
        });
        let (code, message) = extract_api_error(&value).unwrap();
        assert_eq!(code, "DomainRecordDuplicate");
        assert_eq!(message, "The DNS record already exists.");
    }

    #[test]
    fn success_body_has_no_error_envelope() {
        let value = json!({"RequestId": "A6B3-xxxx", "RecordId": "1001"});
        assert!(extract_api_error(&value).is_none());
    }

    #[test]
    fn partial_envelope_is_not_an_error() {
        // A body with Code but no Message is not an error envelope
        let value = json!({"Code": "OK"});
        assert!(extract_api_error(&value).is_none());
    }

    // ---- truncate_for_log ----

    #[test]
    fn short_string_unchanged() {
        let s = "hello world";
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(LOG_BODY_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(LOG_BODY_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.contains(&format!("{} bytes]", LOG_BODY_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        // Ensure truncation doesn't split multi-byte characters
        let s = "你".repeat(200); // Each '你' is 3 bytes
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }
}
