//! Key-value store seam.
//!
//! Both entry points only ever read. Implementations return `Ok(None)` for a
//! missing key and reserve `Err` for genuine lookup failures.

pub mod cloudflare;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;

pub use cloudflare::{api_headers, CloudflareKv};
pub use memory::MemoryStore;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Short backend label for logs.
    fn kind(&self) -> &'static str;

    /// Raw stored text for `key`, or `None` when the key is absent.
    async fn get_text(&self, key: &str) -> Result<Option<String>>;
}
