//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.social-agent.toml` in the working directory or
//! the user config directory.

use super::types::SocialAgentConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

const PROJECT_CONFIG_FILE: &str = ".social-agent.toml";

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl From<ConfigError> for crate::AgentError {
    fn from(err: ConfigError) -> Self {
        crate::AgentError::Config(err.to_string())
    }
}

/// Load configuration from various sources
///
/// Priority order:
/// 1. Project-level `.social-agent.toml`
/// 2. User-level `~/.config/social-agent/config.toml`
/// 3. Default configuration
///
/// Environment overrides are applied on top of whichever source won.
pub fn load_config(project_dir: &Path) -> Result<SocialAgentConfig, ConfigError> {
    let project_config = project_dir.join(PROJECT_CONFIG_FILE);
    if project_config.exists() {
        return load_from_file(&project_config);
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            return load_from_file(&user_config);
        }
    }

    Ok(apply_env_overrides(SocialAgentConfig::default(), env_lookup))
}

/// Get user config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("social-agent").join("config.toml"))
}

/// Load configuration from a specific file
pub fn load_from_file(path: &Path) -> Result<SocialAgentConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content, env_lookup)
}

fn parse_config(
    content: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SocialAgentConfig, ConfigError> {
    let mut config: SocialAgentConfig = toml::from_str(content)?;
    tracing::debug!("parsed configuration file");

    expand_env_vars(&mut config, &lookup);
    Ok(apply_env_overrides(config, lookup))
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Expand ${VAR} patterns in string values
///
/// A key that still contains an unresolved placeholder after expansion is
/// dropped, so the tool reports it as missing instead of sending the literal.
fn expand_env_vars(config: &mut SocialAgentConfig, lookup: &impl Fn(&str) -> Option<String>) {
    for key in [
        &mut config.coordinator.api_key,
        &mut config.news.api_key,
        &mut config.image.api_key,
    ] {
        *key = key
            .take()
            .map(|k| expand_string(&k, lookup))
            .filter(|k| !ENV_VAR_PATTERN.is_match(k));
    }

    config.coordinator.base_url = expand_string(&config.coordinator.base_url, lookup);
    config.news.base_url = expand_string(&config.news.base_url, lookup);
    config.image.base_url = expand_string(&config.image.base_url, lookup);
}

/// Expand environment variables in a single string
fn expand_string(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    ENV_VAR_PATTERN
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Apply environment variable overrides for credentials and the model
///
/// Supports direct environment variables:
/// - OPENAI_API_KEY -> coordinator.api_key and image.api_key
/// - NEWS_API_KEY -> news.api_key
/// - SOCIAL_AGENT_MODEL -> coordinator.model
fn apply_env_overrides(
    mut config: SocialAgentConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> SocialAgentConfig {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty("OPENAI_API_KEY") {
        config.coordinator.api_key = Some(key.clone());
        config.image.api_key = Some(key);
    }

    if let Some(key) = non_empty("NEWS_API_KEY") {
        config.news.api_key = Some(key);
    }

    if let Some(model) = non_empty("SOCIAL_AGENT_MODEL") {
        config.coordinator.model = model;
    }

    config
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# social-agent configuration
# Place this file in your working directory as .social-agent.toml
# or in ~/.config/social-agent/config.toml for global settings

[identity]
app_name = "social_media_agent_team"
user_id = "user_123"
session_id = "session_456"

[coordinator]
api_key = "${OPENAI_API_KEY}"
base_url = "https://api.openai.com/v1"
model = "gpt-4o-mini"
temperature = 0.2
timeout_secs = 60

[news]
# Get a free key from https://newsapi.org/
api_key = "${NEWS_API_KEY}"
base_url = "https://newsapi.org/v2"
timeout_secs = 10
language = "en"

[image]
api_key = "${OPENAI_API_KEY}"
base_url = "https://api.openai.com/v1"
model = "dall-e-3"
output_dir = "generated_images"
"#
}
