use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use kvstats_core::kv::cloudflare::{DEFAULT_API_BASE, DEFAULT_TIMEOUT};

const DATA_DIR: &str = "_data";
const STATS_FILE: &str = "stats.json";

/// Pull the 24h stats from Cloudflare KV into `_data/stats.json`.
#[derive(Debug, Parser)]
#[command(name = "kvstats-sync", version)]
pub struct Args {
    /// Project root; `.env` and `_data/` live here.
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    #[arg(long, env = "CLOUDFLARE_ACCOUNT_ID")]
    pub account_id: Option<String>,

    #[arg(long, env = "CLOUDFLARE_KV_NAMESPACE_ID")]
    pub namespace_id: Option<String>,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Upstream request timeout.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

/// Run configuration, resolved once before the job starts.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_token: Option<String>,
    pub account_id: Option<String>,
    pub namespace_id: Option<String>,
    pub project_root: PathBuf,
    pub api_base: String,
    pub timeout: Duration,
}

impl SyncConfig {
    /// No credentials, default API base and timeout.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            api_token: None,
            account_id: None,
            namespace_id: None,
            project_root: project_root.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_credentials(
        mut self,
        api_token: impl Into<String>,
        account_id: impl Into<String>,
        namespace_id: impl Into<String>,
    ) -> Self {
        self.api_token = non_empty(Some(api_token.into()));
        self.account_id = non_empty(Some(account_id.into()));
        self.namespace_id = non_empty(Some(namespace_id.into()));
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn data_dir(&self) -> PathBuf {
        self.project_root.join(DATA_DIR)
    }

    pub fn stats_file(&self) -> PathBuf {
        self.data_dir().join(STATS_FILE)
    }

    /// `(api_token, account_id, namespace_id)` when all three are set.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.api_token.as_deref()?,
            self.account_id.as_deref()?,
            self.namespace_id.as_deref()?,
        ))
    }
}

impl From<Args> for SyncConfig {
    fn from(a: Args) -> Self {
        Self {
            api_token: non_empty(a.api_token),
            account_id: non_empty(a.account_id),
            namespace_id: non_empty(a.namespace_id),
            project_root: a.project_root,
            api_base: a.api_base,
            timeout: Duration::from_secs(a.timeout_secs.max(1)),
        }
    }
}

/// Load `<root>/.env` into the process environment without overriding
/// variables that are already set. Returns the path when a file was loaded.
pub fn load_dotenv(root: &Path) -> Option<PathBuf> {
    let path = root.join(".env");
    dotenvy::from_path(&path).ok().map(|_| path)
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_under_project_root() {
        let cfg = SyncConfig::new("/site");
        assert_eq!(cfg.data_dir(), PathBuf::from("/site/_data"));
        assert_eq!(cfg.stats_file(), PathBuf::from("/site/_data/stats.json"));
    }

    #[test]
    fn credentials_need_all_three() {
        assert!(SyncConfig::new(".").credentials().is_none());

        let cfg = SyncConfig::new(".").with_credentials("tok", "", "ns");
        assert!(cfg.credentials().is_none());

        let cfg = SyncConfig::new(".").with_credentials("tok", "acct", "ns");
        assert_eq!(cfg.credentials(), Some(("tok", "acct", "ns")));
    }

    #[test]
    fn args_resolve_into_config() {
        let args = Args::try_parse_from([
            "kvstats-sync",
            "--project-root",
            "/site",
            "--api-token",
            "tok",
            "--account-id",
            "acct",
            "--namespace-id",
            "ns",
            "--timeout-secs",
            "3",
        ])
        .unwrap();
        let cfg = SyncConfig::from(args);
        assert_eq!(cfg.credentials(), Some(("tok", "acct", "ns")));
        assert_eq!(cfg.api_base, "https://api.cloudflare.com/client/v4");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.project_root, PathBuf::from("/site"));
    }

    #[test]
    fn dotenv_fills_unset_vars_only() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_dotenv(dir.path()), None);

        std::fs::write(
            dir.path().join(".env"),
            "KVSTATS_SYNC_DOTENV_FRESH=from_file\nKVSTATS_SYNC_DOTENV_PRESET=from_file\n",
        )
        .unwrap();
        std::env::set_var("KVSTATS_SYNC_DOTENV_PRESET", "from_env");

        assert_eq!(load_dotenv(dir.path()), Some(dir.path().join(".env")));
        assert_eq!(std::env::var("KVSTATS_SYNC_DOTENV_FRESH").unwrap(), "from_file");
        assert_eq!(std::env::var("KVSTATS_SYNC_DOTENV_PRESET").unwrap(), "from_env");
    }
}
