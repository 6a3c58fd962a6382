use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use futures_util::FutureExt;
use serde_json::value::RawValue;
use serde_json::Value;

use kvstats_core::error::{KvStatsError, Result};
use kvstats_core::kv::KvStore;
use kvstats_core::normalize::is_truthy;
use kvstats_core::{now_millis, STATS_KEY};

use crate::app_state::AppState;
use crate::env::{Env, BINDING_CANDIDATES};
use crate::stats::reply::{preflight_response, StatsReply};

/// `GET` on the stats route.
pub async fn get_stats(State(state): State<AppState>) -> Response {
    let env = state.env();
    match AssertUnwindSafe(read_stats(&env, now_millis()))
        .catch_unwind()
        .await
    {
        Ok(reply) => reply.into_response(),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(%message, "stats read aborted");
            StatsReply::internal(message).into_response()
        }
    }
}

/// `OPTIONS` on the stats route.
pub async fn preflight() -> Response {
    preflight_response()
}

/// Resolve the store, read the stats key, and classify the result.
pub async fn read_stats(env: &Env, now_ms: u64) -> StatsReply {
    let Some((binding, store)) = env.resolve(&BINDING_CANDIDATES) else {
        let keys = env.diagnostic_keys();
        tracing::error!(?keys, "kv namespace binding not found");
        return StatsReply::not_configured(keys);
    };

    let (raw, value) = match fetch_stored(store.as_ref(), STATS_KEY).await {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            tracing::debug!(binding, key = STATS_KEY, "no stats stored yet");
            return StatsReply::unavailable(now_ms);
        }
        Err(e) => {
            tracing::warn!(binding, kind = e.kind().as_str(), error = %e, "stats read failed");
            return StatsReply::store_failed(e.to_string());
        }
    };

    if is_valid_record(&value) {
        StatsReply::stored(raw)
    } else {
        tracing::warn!(binding, key = STATS_KEY, "stored stats have an invalid shape");
        StatsReply::invalid_format()
    }
}

/// Stored JSON for `key`, as the original text and its parsed value.
/// Falsy JSON (`null`, `false`, `0`, `""`) counts as absent.
async fn fetch_stored(store: &dyn KvStore, key: &str) -> Result<Option<(Box<RawValue>, Value)>> {
    let Some(text) = store.get_text(key).await? else {
        return Ok(None);
    };

    let invalid =
        |e: serde_json::Error| KvStatsError::Store(format!("value of {key} is not valid JSON: {e}"));
    let raw = RawValue::from_string(text.trim().to_string()).map_err(invalid)?;
    let value: Value = serde_json::from_str(raw.get()).map_err(invalid)?;

    Ok(is_truthy(&value).then_some((raw, value)))
}

fn is_valid_record(value: &Value) -> bool {
    let truthy = |field: &str| value.get(field).is_some_and(is_truthy);
    truthy("success") && truthy("data")
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown error".to_string())
}
