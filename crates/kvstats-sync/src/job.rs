use tracing::{error, info};

use kvstats_core::error::Result;
use kvstats_core::normalize::normalize;
use kvstats_core::{now_millis, JekyllStats};

use crate::config::SyncConfig;
use crate::fetch::read_stats_from_kv;
use crate::output::write_stats_file;

/// How a run ended, as reported to the invoking build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    /// The run failed but default stats were written in its place.
    FailedWithDefaults,
    /// The run failed and the default write failed too.
    FailedFallbackFailed,
}

impl SyncOutcome {
    pub fn is_success(self) -> bool {
        self == SyncOutcome::Synced
    }

    /// Process exit status: 0 only for `Synced`.
    pub fn exit_status(self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Fetch, normalize, write. Only the write can fail.
pub async fn run(cfg: &SyncConfig, now_ms: u64) -> Result<JekyllStats> {
    info!("Fetching stats from Cloudflare KV...");

    let record = read_stats_from_kv(cfg).await;
    let stats = normalize(record.as_ref(), now_ms);
    write_stats_file(&cfg.stats_file(), &stats).await?;

    info!(
        unique_users = stats.unique_users,
        total_files = stats.total_files,
        total_data = %stats.total_data_formatted,
        "Stats fetched successfully"
    );
    Ok(stats)
}

/// [`run`], falling back to writing default stats when it fails so the site
/// build still finds an input file.
pub async fn run_with_fallback(cfg: &SyncConfig) -> SyncOutcome {
    let err = match run(cfg, now_millis()).await {
        Ok(_) => return SyncOutcome::Synced,
        Err(e) => e,
    };
    error!(kind = err.kind().as_str(), error = %err, "Error fetching stats from KV");

    match write_stats_file(&cfg.stats_file(), &JekyllStats::default_at(now_millis())).await {
        Ok(()) => {
            info!("Wrote default stats due to error");
            SyncOutcome::FailedWithDefaults
        }
        Err(e) => {
            error!(error = %e, "Failed to write default stats");
            SyncOutcome::FailedFallbackFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_synced_exits_zero() {
        assert_eq!(SyncOutcome::Synced.exit_status(), 0);
        assert_eq!(SyncOutcome::FailedWithDefaults.exit_status(), 1);
        assert_eq!(SyncOutcome::FailedFallbackFailed.exit_status(), 1);
    }
}
