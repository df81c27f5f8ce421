//! NewsAPI search client
//!
//! Issues one `GET /everything` query per call. The body is handed back
//! unparsed so the caller can tell a malformed response apart from a
//! transport failure.

use super::ProviderError;
use crate::config::NewsConfig;
use std::time::Duration;

/// One outbound news search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    /// Full-text search term
    pub topic: String,
    pub page_size: u32,
    pub language: String,
}

/// Backend that runs a news search and returns the raw response body
pub trait NewsBackend: Send + Sync {
    fn search(&self, query: &NewsQuery, api_key: &str) -> Result<String, ProviderError>;
}

/// NewsAPI (`newsapi.org`) backend
pub struct NewsApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &NewsConfig) -> Self {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }
}

impl NewsBackend for NewsApiClient {
    fn search(&self, query: &NewsQuery, api_key: &str) -> Result<String, ProviderError> {
        let url = format!("{}/everything", self.base_url);
        tracing::debug!(topic = %query.topic, page_size = query.page_size, "querying news API");

        let response = self
            .agent
            .get(&url)
            .set("X-Api-Key", api_key)
            .query("q", &query.topic)
            .query("pageSize", &query.page_size.to_string())
            .query("language", &query.language)
            .query("sortBy", "publishedAt")
            .query("searchIn", "title,description")
            .call()?;

        Ok(response.into_string()?)
    }
}
