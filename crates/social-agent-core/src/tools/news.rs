//! News tool
//!
//! Runs one full-text news search per call through a [`NewsBackend`] and
//! reshapes the articles into a fixed record layout.

use super::args::{Arg, Args};
use super::{Echo, Tool, ToolResult, ToolSpec};
use crate::provider::{NewsBackend, NewsQuery, ProviderError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const GET_NEWS: &str = "get_news";

pub const DEFAULT_MAX_ARTICLES: i64 = 5;
/// Largest page the tool will ever request
pub const MAX_PAGE_SIZE: i64 = 10;
/// Article content is cut to this many characters
pub const CONTENT_PREVIEW_CHARS: usize = 200;

const INVALID_TOPIC: &str = "Invalid topic provided. Please provide a valid topic.";
const INVALID_MAX_ARTICLES: &str =
    "Invalid max_articles provided. Please provide a whole number between 1 and 10.";
const MISSING_KEY: &str =
    "News API key not found. Please set NEWS_API_KEY in your environment or .env file.";

/// One reshaped news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: String,
    pub source: String,
    pub author: String,
    /// First 200 characters of the article body plus `...`, or empty
    pub content: String,
}

#[derive(Debug, Serialize)]
struct NewsDigest {
    total_results: usize,
    total_available: u64,
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(rename = "totalResults", default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<RawSource>,
    author: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            title: raw.title.unwrap_or_else(|| "No title available".to_string()),
            description: raw
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            url: raw.url.unwrap_or_default(),
            published_at: raw.published_at.unwrap_or_default(),
            source: raw
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown source".to_string()),
            author: raw.author.unwrap_or_else(|| "Unknown author".to_string()),
            content: preview(raw.content.as_deref()),
        }
    }
}

/// Cut article content to a fixed preview; empty content stays empty
fn preview(content: Option<&str>) -> String {
    match content {
        Some(text) if !text.is_empty() => {
            let mut cut: String = text.chars().take(CONTENT_PREVIEW_CHARS).collect();
            cut.push_str("...");
            cut
        }
        _ => String::new(),
    }
}

/// Out-of-range requests fall back to the default instead of failing
fn clamp_max_articles(max_articles: i64) -> i64 {
    if (1..=MAX_PAGE_SIZE).contains(&max_articles) {
        max_articles
    } else {
        DEFAULT_MAX_ARTICLES
    }
}

/// `get_news` tool
pub struct NewsTool {
    backend: Arc<dyn NewsBackend>,
    api_key: Option<String>,
    language: String,
}

impl NewsTool {
    pub fn new(backend: Arc<dyn NewsBackend>, api_key: Option<String>) -> Self {
        Self {
            backend,
            api_key,
            language: "en".to_string(),
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Latest articles about `topic`, newest first
    pub fn get_news(&self, topic: &str, max_articles: i64) -> ToolResult {
        tracing::info!(tool = GET_NEWS, topic = %topic, max_articles, "tool called");

        let echo = Echo::new().with("topic", topic);

        if topic.trim().is_empty() {
            return ToolResult::error(echo, INVALID_TOPIC);
        }

        let max_articles = clamp_max_articles(max_articles);

        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return ToolResult::error(echo, MISSING_KEY);
        };

        let query = NewsQuery {
            topic: topic.to_string(),
            page_size: max_articles.min(MAX_PAGE_SIZE) as u32,
            language: self.language.clone(),
        };

        match self.backend.search(&query, api_key) {
            Ok(body) => digest(echo, &body, query.page_size as usize),
            Err(err) => {
                tracing::warn!(tool = GET_NEWS, error = %err, "news search failed");
                ToolResult::error(echo, describe_failure(&err))
            }
        }
    }
}

/// Turn a successful HTTP body into a result
fn digest(echo: Echo, body: &str, limit: usize) -> ToolResult {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => return ToolResult::error(echo, format!("Invalid response format: {}", e)),
    };

    let response: SearchResponse = match serde_json::from_value(json) {
        Ok(response) => response,
        Err(e) => return ToolResult::error(echo, format!("Unexpected error: {}", e)),
    };

    if response.status.as_deref() != Some("ok") {
        return ToolResult::error(
            echo,
            format!(
                "News API error: {}",
                response.message.as_deref().unwrap_or("Unknown error")
            ),
        );
    }

    let articles: Vec<Article> = response
        .articles
        .into_iter()
        .take(limit)
        .map(Article::from)
        .collect();

    let digest = NewsDigest {
        total_results: articles.len(),
        total_available: response.total_results,
        articles,
    };
    ToolResult::success(echo, &digest)
}

fn describe_failure(err: &ProviderError) -> String {
    match err {
        _ if err.is_transport() => format!("Network error: {}", err),
        ProviderError::Api { message, .. } => format!("News API error: {}", message),
        ProviderError::InvalidResponse(msg) => format!("Invalid response format: {}", msg),
        ProviderError::Internal(msg) => format!("Unexpected error: {}", msg),
        _ => format!("Unexpected error: {}", err),
    }
}

impl Tool for NewsTool {
    fn name(&self) -> &str {
        GET_NEWS
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            GET_NEWS,
            "Retrieves the most recent English news articles about a topic, used as \
             source material for social media posts.",
            json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "The topic to search for, e.g. \"technology\", \"climate change\", \"AI\"."
                    },
                    "max_articles": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": MAX_PAGE_SIZE,
                        "description": "Maximum number of articles to return (1-10). Defaults to 5."
                    }
                },
                "required": ["topic"]
            }),
        )
    }

    fn invoke(&self, args: &Value) -> ToolResult {
        let args = Args::new(args);
        let echo = || Echo::new().with("topic", args.raw("topic"));

        let Arg::Present(topic) = args.str("topic") else {
            return ToolResult::error(echo(), INVALID_TOPIC);
        };
        let Some(max_articles) = args.int("max_articles").or_default(DEFAULT_MAX_ARTICLES) else {
            return ToolResult::error(echo(), INVALID_MAX_ARTICLES);
        };

        self.get_news(topic, max_articles)
    }
}
