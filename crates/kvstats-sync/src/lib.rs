//! kvstats sync job.
//!
//! One linear run for the site build: fetch `stats:24h` through the
//! Cloudflare KV management API, normalize it, and write
//! `<project_root>/_data/stats.json`. Upstream trouble degrades to default
//! stats; only a failed write fails the run, and even then a default file is
//! attempted first.

pub mod config;
pub mod fetch;
pub mod job;
pub mod output;

pub use config::{Args, SyncConfig};
pub use job::{run, run_with_fallback, SyncOutcome};
