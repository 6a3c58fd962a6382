//! Record shapes.
//!
//! `StatsRecord` is what the upstream job stores under [`crate::STATS_KEY`].
//! `JekyllStats` is the flattened shape the sync job hands to the site
//! generator.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::format::format_size;

/// Period label used when the upstream record does not carry one.
pub const DEFAULT_PERIOD: &str = "24 hours";

/// Per-media-type conversion counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByType {
    pub gif: u64,
    pub video: u64,
    pub image: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsData {
    pub total_conversions: u64,
    pub total_size_bytes: u64,
    pub total_size_formatted: String,
    pub unique_users: u64,
    pub by_type: ByType,
}

impl StatsData {
    /// Zeroed counters. Note the size label is `"0 B"` here, unlike
    /// [`JekyllStats::default_at`].
    pub fn zeroed() -> Self {
        Self {
            total_conversions: 0,
            total_size_bytes: 0,
            total_size_formatted: "0 B".to_string(),
            unique_users: 0,
            by_type: ByType::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub success: bool,
    pub data: StatsData,
    /// Epoch milliseconds.
    pub updated_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl StatsRecord {
    /// Placeholder served while the store holds no entry yet.
    pub fn unavailable(now_ms: u64) -> Self {
        Self {
            success: true,
            data: StatsData::zeroed(),
            updated_at: now_ms,
            status: Some("unavailable".to_string()),
        }
    }
}

/// Stats in the layout consumed by the static-site build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JekyllStats {
    pub unique_users: u64,
    pub total_files: u64,
    pub total_data_bytes: u64,
    pub total_data_formatted: String,
    pub period: String,
    /// Epoch milliseconds.
    pub last_updated: u64,
}

impl JekyllStats {
    pub fn default_at(now_ms: u64) -> Self {
        Self {
            unique_users: 0,
            total_files: 0,
            total_data_bytes: 0,
            total_data_formatted: format_size(0),
            period: DEFAULT_PERIOD.to_string(),
            last_updated: now_ms,
        }
    }
}

/// Current wall-clock time in epoch milliseconds (0 if the clock is before 1970).
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
