//! Axum router wiring.
//!
//! Exposes the stats route (`GET` + `OPTIONS` pre-flight) and `/healthz`.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, stats};

pub fn build_router(state: AppState) -> Router {
    let stats_route = state.cfg().gateway.stats_route.clone();
    Router::new()
        .route(&stats_route, get(stats::get_stats).options(stats::preflight))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
