//! Peer Client
//!
//! HTTP client side of the peer protocol.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::peers::protocol::{escape_segment, Response};
use crate::peers::PeerGetter;

// == HTTP Getter ==
/// Fetches values from one remote node over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGetter {
    /// Peer URL including the base path, e.g. `http://10.0.0.2:8008/_ringcache/`
    base_url: String,
    client: reqwest::Client,
}

impl HttpGetter {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base_url}{group}/{key}` with both segments escaped.
    pub fn url_for(&self, group: &str, key: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            escape_segment(group),
            escape_segment(key)
        )
    }
}

#[async_trait]
impl PeerGetter for HttpGetter {
    async fn get(&self, group: &str, key: &str) -> Result<Vec<u8>> {
        let url = self.url_for(group, key);
        debug!(%url, "fetching from peer");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CacheError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Status(status.to_string()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CacheError::Transport(format!("reading response body: {}", e)))?;

        Ok(Response::from_bytes(&body)?.value)
    }
}
