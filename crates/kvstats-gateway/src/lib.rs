//! kvstats gateway library entry.
//!
//! Serves the stored 24h stats record over HTTP. The binding environment is
//! resolved once from config at startup; each request is an independent,
//! read-only lookup. Intended to be consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod env;
pub mod ops;
pub mod router;
pub mod stats;
