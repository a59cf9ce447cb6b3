// Cutlist HTTP adapter - Access to a cutlist.at compatible repository

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Default repository address
pub const DEFAULT_SERVER_URL: &str = "http://www.cutlist.at/";

/// Configuration for the cutlist repository client
#[derive(Debug, Clone)]
pub struct CutlistServerConfig {
    /// Base URL of the repository
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for CutlistServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("cutlist-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Cutlist repository adapter
pub struct CutlistAtAdapter {
    http: Client,
    config: CutlistServerConfig,
}

impl CutlistAtAdapter {
    /// Create new adapter
    pub fn new(config: CutlistServerConfig) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// URL of an endpoint below the base URL
    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), name)
    }

    /// Issue a GET request and check the status
    async fn get(&self, name: &str, query: &[(&str, &str)]) -> Result<reqwest::Response, DomainError> {
        let url = self.endpoint(name);
        debug!("Call cutlist server: {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Transport(format!(
                "Cutlist server returned {} for {}",
                status, url
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl CutlistSourcePort for CutlistAtAdapter {
    async fn fetch_header_index(&self, video_key: &str) -> Result<Vec<u8>, DomainError> {
        let response = self.get("getxml.php", &[("name", video_key)]).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::Transport(format!("Cannot read header index body: {}", e)))?;
        Ok(body.to_vec())
    }

    async fn fetch_cutlist_file(&self, cutlist_id: &str) -> Result<String, DomainError> {
        let response = self.get("getfile.php", &[("id", cutlist_id)]).await?;
        response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("Cannot read cutlist body: {}", e)))
    }
}
