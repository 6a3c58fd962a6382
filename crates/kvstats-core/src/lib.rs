//! kvstats core: the stats data contract shared by the read endpoint and the
//! build-time sync job.
//!
//! This crate owns the record shapes, the size formatter, the normalization
//! from the stored record into the site-generator shape, and the `KvStore`
//! seam both entry points read through.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `KvStatsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod format;
pub mod kv;
pub mod model;
pub mod normalize;

/// Shared result type.
pub use error::{KvStatsError, Result};
pub use model::{now_millis, ByType, JekyllStats, StatsData, StatsRecord};

/// Storage key the upstream job writes the rolling 24h counters under.
pub const STATS_KEY: &str = "stats:24h";
