use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;

use kvstats_core::error::{KvStatsError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(KvStatsError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;

        let mut seen = HashSet::new();
        for b in &self.bindings {
            b.validate()?;
            if !seen.insert(b.name()) {
                return Err(KvStatsError::Config(format!(
                    "duplicate binding name: {}",
                    b.name()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_stats_route")]
    pub stats_route: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            stats_route: default_stats_route(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            KvStatsError::Config(format!(
                "gateway.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })?;
        if !self.stats_route.starts_with('/') {
            return Err(KvStatsError::Config(
                "gateway.stats_route must start with '/'".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_stats_route() -> String {
    "/api/stats".into()
}

/// A named store binding, backend selected by `kind`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum BindingConfig {
    Memory {
        name: String,
        /// Key -> JSON value preloaded into the store. Stored as compact
        /// JSON text, object keys in the order written here.
        #[serde(default)]
        entries: BTreeMap<String, serde_json::Value>,
    },
    Cloudflare {
        name: String,
        account_id: String,
        namespace_id: String,
        #[serde(default = "default_api_token_env")]
        api_token_env: String,
        #[serde(default = "default_api_base")]
        api_base: String,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

impl BindingConfig {
    pub fn name(&self) -> &str {
        match self {
            BindingConfig::Memory { name, .. } | BindingConfig::Cloudflare { name, .. } => name,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.name();
        if name.trim().is_empty() {
            return Err(KvStatsError::Config("binding name must not be empty".into()));
        }
        match self {
            BindingConfig::Memory { .. } => Ok(()),
            BindingConfig::Cloudflare {
                account_id,
                namespace_id,
                api_token_env,
                timeout_ms,
                ..
            } => {
                if account_id.is_empty() || namespace_id.is_empty() {
                    return Err(KvStatsError::Config(format!(
                        "binding {name}: account_id and namespace_id must not be empty"
                    )));
                }
                if api_token_env.is_empty() {
                    return Err(KvStatsError::Config(format!(
                        "binding {name}: api_token_env must not be empty"
                    )));
                }
                if !(1000..=60000).contains(timeout_ms) {
                    return Err(KvStatsError::Config(format!(
                        "binding {name}: timeout_ms must be between 1000 and 60000"
                    )));
                }
                Ok(())
            }
        }
    }
}

fn default_api_token_env() -> String {
    "CLOUDFLARE_API_TOKEN".into()
}
fn default_api_base() -> String {
    kvstats_core::kv::cloudflare::DEFAULT_API_BASE.into()
}
fn default_timeout_ms() -> u64 {
    10000
}
