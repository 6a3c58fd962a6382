//! Shared application state for the kvstats gateway.

use std::collections::BTreeMap;
use std::sync::Arc;

use kvstats_core::error::Result;

use crate::config::GatewayConfig;
use crate::env::Env;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    env: Arc<Env>,
}

impl AppState {
    /// Build application state from config plus the process variables.
    /// Returns Result so main can report a bad binding instead of panicking.
    pub fn new(cfg: GatewayConfig, vars: &BTreeMap<String, String>) -> Result<Self> {
        let env = Env::from_config(&cfg, vars)?;
        Ok(Self::with_env(cfg, env))
    }

    /// State over an already-built environment.
    pub fn with_env(cfg: GatewayConfig, env: Env) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                env: Arc::new(env),
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn env(&self) -> Arc<Env> {
        Arc::clone(&self.inner.env)
    }
}
