//! Response shapes of the stats route.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, CACHE_CONTROL, CONTENT_TYPE,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::value::RawValue;
use serde_json::{json, Value};

use kvstats_core::StatsRecord;

const CACHE_OK: &str = "public, max-age=300";
const PREFLIGHT_MAX_AGE: &str = "86400";

/// Cross-origin headers carried by every response of the stats route.
pub fn cors_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    h.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET, OPTIONS"));
    h.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    h
}

/// Empty 204 answer to a CORS pre-flight probe.
pub fn preflight_response() -> Response {
    let mut headers = cors_headers();
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(PREFLIGHT_MAX_AGE));
    (StatusCode::NO_CONTENT, headers).into_response()
}

#[derive(Debug)]
pub enum ReplyBody {
    Json(Value),
    /// Stored record, passed through byte-for-byte.
    Raw(Box<RawValue>),
}

#[derive(Debug)]
pub struct StatsReply {
    pub status: StatusCode,
    pub body: ReplyBody,
    /// Adds the 5-minute `Cache-Control` directive.
    pub cacheable: bool,
}

impl StatsReply {
    pub fn stored(raw: Box<RawValue>) -> Self {
        Self {
            status: StatusCode::OK,
            body: ReplyBody::Raw(raw),
            cacheable: true,
        }
    }

    pub fn unavailable(now_ms: u64) -> Self {
        match serde_json::to_value(StatsRecord::unavailable(now_ms)) {
            Ok(body) => Self {
                status: StatusCode::OK,
                body: ReplyBody::Json(body),
                cacheable: false,
            },
            Err(e) => Self::internal(e.to_string()),
        }
    }

    pub fn not_configured(available_env_keys: Vec<String>) -> Self {
        Self::failure(json!({
            "success": false,
            "error": "KV namespace not configured",
            "message": "KV namespace binding not found. Please configure KV_BINDING in Cloudflare Pages project settings.",
            "availableEnvKeys": available_env_keys,
        }))
    }

    pub fn store_failed(message: impl Into<String>) -> Self {
        Self::failure(json!({
            "success": false,
            "error": "Failed to read stats from storage",
            "message": message.into(),
        }))
    }

    pub fn invalid_format() -> Self {
        Self::failure(json!({
            "success": false,
            "error": "Invalid data format in storage",
        }))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::failure(json!({
            "success": false,
            "error": "Internal server error",
            "message": message.into(),
        }))
    }

    fn failure(body: Value) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ReplyBody::Json(body),
            cacheable: false,
        }
    }

    fn encode(&self) -> serde_json::Result<String> {
        match &self.body {
            ReplyBody::Json(v) => serde_json::to_string(v),
            ReplyBody::Raw(raw) => Ok(raw.get().to_string()),
        }
    }
}

impl IntoResponse for StatsReply {
    fn into_response(self) -> Response {
        let (status, body, cacheable) = match self.encode() {
            Ok(body) => (self.status, body, self.cacheable),
            Err(e) => {
                tracing::error!(error = %e, "stats response encoding failed");
                let body = json!({
                    "success": false,
                    "error": "Internal server error",
                    "message": e.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body.to_string(), false)
            }
        };

        let mut headers = cors_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if cacheable {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_OK));
        }
        (status, headers, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_reply_carries_zeroed_data() {
        let reply = StatsReply::unavailable(5);
        assert_eq!(reply.status, StatusCode::OK);
        assert!(!reply.cacheable);
        let ReplyBody::Json(v) = &reply.body else {
            panic!("unavailable reply must be built from the record");
        };
        assert_eq!(v["status"], json!("unavailable"));
        assert_eq!(v["updated_at"], json!(5));
        assert_eq!(v["data"]["total_size_formatted"], json!("0 B"));
        assert_eq!(v["data"]["by_type"], json!({ "gif": 0, "video": 0, "image": 0 }));
    }

    #[test]
    fn internal_reply_names_the_cause() {
        let reply = StatsReply::internal("encode failed");
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            reply.encode().unwrap(),
            r#"{"success":false,"error":"Internal server error","message":"encode failed"}"#
        );
    }
}
