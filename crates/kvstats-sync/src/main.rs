//! kvstats-sync: build step that refreshes `_data/stats.json`.
//!
//! Exit status 0 on success; 1 on failure, even when default stats were
//! written in place of the real ones.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kvstats_sync::config::{load_dotenv, Args, SyncConfig};
use kvstats_sync::run_with_fallback;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // `.env` sits under the project root and feeds the env fallbacks of the
    // second parse.
    let root = Args::parse().project_root;
    if let Some(path) = load_dotenv(&root) {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    let cfg = SyncConfig::from(Args::parse());

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    let outcome = rt.block_on(run_with_fallback(&cfg));
    ExitCode::from(outcome.exit_status())
}
