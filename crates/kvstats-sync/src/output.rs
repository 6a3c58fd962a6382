use std::io;
use std::path::Path;

use tokio::fs;

use kvstats_core::error::{KvStatsError, Result};
use kvstats_core::JekyllStats;

/// Write `stats` as 2-space pretty JSON, creating the parent directory.
/// Replaces any previous file.
pub async fn write_stats_file(path: &Path, stats: &JekyllStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await.map_err(write_failed)?;
    }
    fs::write(path, json).await.map_err(write_failed)?;
    tracing::info!(path = %path.display(), "Stats written");
    Ok(())
}

fn write_failed(e: io::Error) -> KvStatsError {
    KvStatsError::Io(io::Error::new(
        e.kind(),
        format!("Failed to write stats file: {e}"),
    ))
}
