//! Hosting environment: named store bindings plus the names of the variables
//! the process was started with. Resolved once at startup, immutable after.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use kvstats_core::error::{KvStatsError, Result};
use kvstats_core::kv::{CloudflareKv, KvStore, MemoryStore};

use crate::config::{BindingConfig, GatewayConfig};

/// Binding names tried in order when resolving the stats store.
pub const BINDING_CANDIDATES: [&str; 2] = ["KV_BINDING", "STATS_KV"];

#[derive(Clone, Default)]
pub struct Env {
    bindings: BTreeMap<String, Arc<dyn KvStore>>,
    var_names: BTreeSet<String>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the environment from config. `vars` supplies the process
    /// variables (API tokens are looked up here; all names are kept for
    /// diagnostics, values are not).
    pub fn from_config(cfg: &GatewayConfig, vars: &BTreeMap<String, String>) -> Result<Self> {
        let mut env = Self::new();
        env.var_names.extend(vars.keys().cloned());

        for b in &cfg.bindings {
            let store: Arc<dyn KvStore> = match b {
                BindingConfig::Memory { entries, .. } => Arc::new(MemoryStore::with_entries(
                    entries.iter().map(|(k, v)| (k.clone(), v.to_string())),
                )),
                BindingConfig::Cloudflare {
                    name,
                    account_id,
                    namespace_id,
                    api_token_env,
                    api_base,
                    timeout_ms,
                } => {
                    let token = vars
                        .get(api_token_env)
                        .filter(|t| !t.is_empty())
                        .ok_or_else(|| {
                            KvStatsError::Config(format!(
                                "binding {name}: environment variable {api_token_env} is not set"
                            ))
                        })?;
                    Arc::new(CloudflareKv::new(
                        api_base.as_str(),
                        account_id.as_str(),
                        namespace_id.as_str(),
                        token,
                        Duration::from_millis(*timeout_ms),
                    )?)
                }
            };
            tracing::info!(binding = %b.name(), kind = store.kind(), "store binding registered");
            env.bindings.insert(b.name().to_string(), store);
        }
        Ok(env)
    }

    pub fn with_binding(mut self, name: impl Into<String>, store: Arc<dyn KvStore>) -> Self {
        self.bindings.insert(name.into(), store);
        self
    }

    pub fn with_var(mut self, name: impl Into<String>) -> Self {
        self.var_names.insert(name.into());
        self
    }

    /// First binding present among `candidates`, in order.
    pub fn resolve(&self, candidates: &[&str]) -> Option<(&str, Arc<dyn KvStore>)> {
        candidates.iter().find_map(|c| {
            self.bindings
                .get_key_value(*c)
                .map(|(k, v)| (k.as_str(), Arc::clone(v)))
        })
    }

    /// All environment key names (bindings and variables) mentioning `KV`
    /// or `BINDING`, sorted.
    pub fn diagnostic_keys(&self) -> Vec<String> {
        self.bindings
            .keys()
            .chain(self.var_names.iter())
            .filter(|k| k.contains("KV") || k.contains("BINDING"))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_first_candidate() {
        let env = Env::new()
            .with_binding("STATS_KV", Arc::new(MemoryStore::new()))
            .with_binding("KV_BINDING", Arc::new(MemoryStore::new()));
        let (name, _) = env.resolve(&BINDING_CANDIDATES).unwrap();
        assert_eq!(name, "KV_BINDING");

        let env = Env::new().with_binding("STATS_KV", Arc::new(MemoryStore::new()));
        let (name, _) = env.resolve(&BINDING_CANDIDATES).unwrap();
        assert_eq!(name, "STATS_KV");

        let env = Env::new().with_binding("OTHER", Arc::new(MemoryStore::new()));
        assert!(env.resolve(&BINDING_CANDIDATES).is_none());
    }

    #[test]
    fn diagnostic_keys_filter_and_dedupe() {
        let env = Env::new()
            .with_binding("MY_KV", Arc::new(MemoryStore::new()))
            .with_var("MY_KV")
            .with_var("ASSETS_BINDING")
            .with_var("PATH")
            .with_var("kv_lowercase");
        assert_eq!(env.diagnostic_keys(), vec!["ASSETS_BINDING", "MY_KV"]);
    }
}
