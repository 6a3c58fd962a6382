//! Stored record -> `JekyllStats`.
//!
//! The upstream record is read loosely as JSON: any field may be missing,
//! null, zero, or of the wrong type, and each falls back independently.

use serde_json::Value;

use crate::format::format_size;
use crate::model::{JekyllStats, DEFAULT_PERIOD};

/// Normalize an optional upstream record into the site-generator shape.
///
/// Pure: the only time input is `now_ms`, used where the record has no
/// timestamp of its own.
pub fn normalize(record: Option<&Value>, now_ms: u64) -> JekyllStats {
    let Some(data) = record.and_then(|r| r.get("data")).filter(|d| is_truthy(d)) else {
        return JekyllStats::default_at(now_ms);
    };

    let total_data_bytes = count(data.get("total_data_bytes"));
    let total_data_formatted = text(data.get("total_data_formatted"))
        .unwrap_or_else(|| format_size(total_data_bytes));
    let period = text(data.get("period")).unwrap_or_else(|| DEFAULT_PERIOD.to_string());
    let last_updated = match record.map(|r| count(r.get("updated_at"))) {
        Some(ts) if ts > 0 => ts,
        _ => now_ms,
    };

    JekyllStats {
        unique_users: count(data.get("unique_users")),
        total_files: count(data.get("total_files")),
        total_data_bytes,
        total_data_formatted,
        period,
        last_updated,
    }
}

/// JSON truthiness: `null`, `false`, `0`, and `""` are falsy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn count(v: Option<&Value>) -> u64 {
    match v {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn text(v: Option<&Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const NOW: u64 = 1_700_000_000_000;

    #[test]
    fn missing_record_yields_defaults() {
        assert_eq!(normalize(None, NOW), JekyllStats::default_at(NOW));
    }

    #[test]
    fn record_without_data_yields_defaults() {
        let rec = json!({ "success": true, "updated_at": 12 });
        assert_eq!(normalize(Some(&rec), NOW), JekyllStats::default_at(NOW));

        let rec = json!({ "success": true, "data": null, "updated_at": 12 });
        assert_eq!(normalize(Some(&rec), NOW), JekyllStats::default_at(NOW));
    }

    #[test]
    fn maps_fields_and_computes_label() {
        let rec = json!({
            "success": true,
            "data": { "total_files": 42, "unique_users": 7, "total_data_bytes": 2_097_152 },
            "updated_at": 1_699_999_999_000u64
        });
        let out = normalize(Some(&rec), NOW);
        assert_eq!(out.total_files, 42);
        assert_eq!(out.unique_users, 7);
        assert_eq!(out.total_data_bytes, 2_097_152);
        assert_eq!(out.total_data_formatted, "2.00 MB");
        assert_eq!(out.period, "24 hours");
        assert_eq!(out.last_updated, 1_699_999_999_000);
    }

    #[test]
    fn upstream_label_and_period_win() {
        let rec = json!({
            "data": {
                "total_data_bytes": 10,
                "total_data_formatted": "ten bytes",
                "period": "7 days"
            }
        });
        let out = normalize(Some(&rec), NOW);
        assert_eq!(out.total_data_formatted, "ten bytes");
        assert_eq!(out.period, "7 days");
        assert_eq!(out.last_updated, NOW);
    }

    #[test]
    fn falsy_and_mistyped_fields_fall_back() {
        let rec = json!({
            "data": {
                "unique_users": "seven",
                "total_files": null,
                "total_data_bytes": -5,
                "total_data_formatted": "",
                "period": ""
            },
            "updated_at": 0
        });
        let out = normalize(Some(&rec), NOW);
        assert_eq!(out.unique_users, 0);
        assert_eq!(out.total_files, 0);
        assert_eq!(out.total_data_bytes, 0);
        assert_eq!(out.total_data_formatted, "0.00 MB");
        assert_eq!(out.period, "24 hours");
        assert_eq!(out.last_updated, NOW);
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }
}
