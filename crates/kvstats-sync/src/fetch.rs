//! Upstream read. Every failure here is soft: it is logged and the run
//! continues with no record.

use serde_json::Value;
use tracing::warn;

use kvstats_core::error::Result;
use kvstats_core::kv::CloudflareKv;
use kvstats_core::normalize::is_truthy;
use kvstats_core::STATS_KEY;

use crate::config::SyncConfig;

/// The stored record, or `None` when unconfigured, absent, or unreachable.
pub async fn read_stats_from_kv(cfg: &SyncConfig) -> Option<Value> {
    let Some((api_token, account_id, namespace_id)) = cfg.credentials() else {
        warn!("Cloudflare KV configuration missing, using default stats");
        return None;
    };

    let kv = match CloudflareKv::new(
        cfg.api_base.as_str(),
        account_id,
        namespace_id,
        api_token,
        cfg.timeout,
    ) {
        Ok(kv) => kv,
        Err(e) => {
            warn!(kind = e.kind().as_str(), "Failed to read from KV: {e}, using default stats");
            return None;
        }
    };

    match kv.get_value(STATS_KEY).await {
        Ok(None) => {
            warn!("Stats not found in KV, using default stats");
            None
        }
        Ok(Some(body)) => match decode_body(&body) {
            Ok(record) => record,
            Err(e) => {
                warn!(kind = e.kind().as_str(), "Failed to read from KV: {e}, using default stats");
                None
            }
        },
        Err(e) => {
            warn!(kind = e.kind().as_str(), "Failed to read from KV: {e}, using default stats");
            None
        }
    }
}

/// Parse a value body. The stored JSON may itself be string-encoded, in
/// which case the inner string is parsed as well. Empty or falsy bodies
/// yield `None`.
pub fn decode_body(body: &str) -> Result<Option<Value>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value = match serde_json::from_str::<Value>(body)? {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    Ok(is_truthy(&value).then_some(value))
}
