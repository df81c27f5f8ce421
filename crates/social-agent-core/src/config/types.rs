//! Configuration types for social-agent
//!
//! Defines the structure of `.social-agent.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialAgentConfig {
    /// Process-wide identifiers
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Language model used to pick tools
    #[serde(default)]
    pub coordinator: CoordinatorConfig,

    /// News search provider
    #[serde(default)]
    pub news: NewsConfig,

    /// Image generation provider
    #[serde(default)]
    pub image: ImageConfig,
}

/// Application, user and session identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_user_id")]
    pub user_id: String,

    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_app_name() -> String {
    "social_media_agent_team".to_string()
}

fn default_user_id() -> String {
    "user_123".to_string()
}

fn default_session_id() -> String {
    "session_456".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            user_id: default_user_id(),
            session_id: default_session_id(),
        }
    }
}

/// Coordinator (tool-selecting language model) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// API key (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Chat model
    #[serde(default = "default_coordinator_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_coordinator_timeout")]
    pub timeout_secs: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_coordinator_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_coordinator_timeout() -> u64 {
    60
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_coordinator_model(),
            temperature: default_temperature(),
            timeout_secs: default_coordinator_timeout(),
        }
    }
}

/// News search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// API key (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_news_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_news_timeout")]
    pub timeout_secs: u64,

    /// Language filter sent with every query
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_news_timeout() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_news_base_url(),
            timeout_secs: default_news_timeout(),
            language: default_language(),
        }
    }
}

/// Image generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// API key (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_image_model")]
    pub model: String,

    /// Directory generated images are downloaded into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_images")
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_image_model(),
            output_dir: default_output_dir(),
        }
    }
}

/// Treat blank keys the same as missing ones.
fn present(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

impl CoordinatorConfig {
    pub fn credential(&self) -> Option<&str> {
        present(&self.api_key)
    }
}

impl NewsConfig {
    pub fn credential(&self) -> Option<&str> {
        present(&self.api_key)
    }
}

impl ImageConfig {
    pub fn credential(&self) -> Option<&str> {
        present(&self.api_key)
    }
}
