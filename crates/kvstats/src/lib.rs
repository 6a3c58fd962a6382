//! Top-level facade crate for kvstats.
//!
//! Re-exports the core contract, the read endpoint, and the sync job so users
//! can depend on a single crate.

pub mod core {
    pub use kvstats_core::*;
}

pub mod gateway {
    pub use kvstats_gateway::*;
}

pub mod sync {
    pub use kvstats_sync::*;
}
