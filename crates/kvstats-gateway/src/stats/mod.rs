//! Stats read endpoint.
//!
//! Read-only: resolves the store binding, reads `stats:24h`, and maps every
//! outcome (missing binding, store failure, empty key, bad shape, abort) to a
//! JSON reply with CORS headers.

pub mod handler;
pub mod reply;

pub use handler::{get_stats, preflight, read_stats};
pub use reply::{cors_headers, ReplyBody, StatsReply};
