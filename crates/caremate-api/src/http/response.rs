//! Response envelope shared by every endpoint.
//!
//! Success and failure both serialize to the same shape so clients parse
//! one structure: a `data` payload, a `meta` block with the request id and
//! timing, an `errors` list, and optional `_links` for navigation. Absent
//! sections are omitted from the JSON rather than serialized as null/empty.

use std::collections::HashMap;

use serde::Serialize;

/// Per-request metadata attached to every envelope.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Correlates the response with server-side traces.
    pub request_id: String,
    /// RFC 3339 time the response was produced.
    pub timestamp: String,
    pub response_time_ms: u64,
}

/// One entry in the envelope's `errors` list.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Stable machine-readable code, e.g. `SESSION_NOT_FOUND`.
    pub code: String,
    pub message: String,
}

/// The envelope itself. `T` is the endpoint's payload type.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub meta: ApiMeta,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,

    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful payload.
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta::now(request_id, response_time_ms),
            errors: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Attach a named link. Chainable.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }
}

impl ApiResponse<()> {
    /// An envelope carrying only an error, no payload.
    pub fn failure(code: &str, message: String) -> Self {
        Self {
            data: None,
            meta: ApiMeta::now(String::new(), 0),
            errors: vec![ApiErrorDetail {
                code: code.to_string(),
                message,
            }],
            links: HashMap::new(),
        }
    }
}

impl ApiMeta {
    fn now(request_id: String, response_time_ms: u64) -> Self {
        Self {
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(serde_json::json!({"ok": true}), "req-1".to_string(), 7)
            .with_link("self", "/api/v1/sessions");
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["data"]["ok"], true);
        assert_eq!(json["meta"]["request_id"], "req-1");
        assert_eq!(json["meta"]["response_time_ms"], 7);
        assert_eq!(json["_links"]["self"], "/api/v1/sessions");
        // Empty error list is omitted entirely.
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let resp = ApiResponse::failure("SESSION_NOT_FOUND", "Session not found".to_string());
        let json = serde_json::to_value(&resp).unwrap();

        assert!(json.get("data").is_none());
        assert_eq!(json["errors"][0]["code"], "SESSION_NOT_FOUND");
        assert!(json.get("_links").is_none());
    }
}
