//! kvstats gateway
//!
//! - Stats endpoint: GET/OPTIONS on `gateway.stats_route` (default /api/stats)
//! - Liveness: /healthz
//! - Config: first CLI argument, default `kvstats.yaml`

use std::collections::BTreeMap;
use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use kvstats_core::error::KvStatsError;
use kvstats_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), KvStatsError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "kvstats.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| KvStatsError::Config(format!("gateway.listen: {e}")))?;
    let route = cfg.gateway.stats_route.clone();

    let vars: BTreeMap<String, String> = std::env::vars().collect();
    let state = app_state::AppState::new(cfg, &vars)?;
    let app = router::build_router(state);

    tracing::info!(%listen, %route, "kvstats-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
