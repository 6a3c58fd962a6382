//! Cloudflare Workers KV, read through the account management REST API.
//!
//! `GET {api_base}/accounts/{account}/storage/kv/namespaces/{namespace}/values/{key}`
//! with bearer authorization. A 404 means the key is absent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::error::{KvStatsError, Result};
use crate::kv::KvStore;

pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest slice of an error body carried into the error message.
const ERROR_BODY_LIMIT: usize = 256;

/// Request headers for the management API. The token is mandatory.
pub fn api_headers(api_token: Option<&str>) -> Result<HeaderMap> {
    let token = api_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| KvStatsError::Config("CLOUDFLARE_API_TOKEN is required".into()))?;

    let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| KvStatsError::Config(format!("invalid api token: {e}")))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[derive(Debug, Clone)]
pub struct CloudflareKv {
    client: reqwest::Client,
    api_base: String,
    account_id: String,
    namespace_id: String,
}

impl CloudflareKv {
    pub fn new(
        api_base: impl Into<String>,
        account_id: impl Into<String>,
        namespace_id: impl Into<String>,
        api_token: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(api_headers(Some(api_token))?)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            account_id: account_id.into(),
            namespace_id: namespace_id.into(),
        })
    }

    pub fn value_url(&self, key: &str) -> String {
        format!(
            "{}/accounts/{}/storage/kv/namespaces/{}/values/{}",
            self.api_base, self.account_id, self.namespace_id, key
        )
    }

    /// Fetch the raw value body. `Ok(None)` on 404.
    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let url = self.value_url(key);
        tracing::debug!(%url, "kv value request");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let mut message = resp.text().await.unwrap_or_default();
            if message.len() > ERROR_BODY_LIMIT {
                let mut cut = ERROR_BODY_LIMIT;
                while !message.is_char_boundary(cut) {
                    cut -= 1;
                }
                message.truncate(cut);
            }
            return Err(KvStatsError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Some(resp.text().await?))
    }
}

#[async_trait]
impl KvStore for CloudflareKv {
    fn kind(&self) -> &'static str {
        "cloudflare"
    }

    async fn get_text(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key).await
    }
}
