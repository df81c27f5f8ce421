//! Tool registry
//!
//! Holds the tools available to the coordinator, keyed by name.

use super::{ImageTool, JokesTool, NewsTool, SharedTool, ToolResult, ToolSpec, WeatherTool};
use crate::config::SocialAgentConfig;
use crate::error::{AgentError, Result};
use crate::provider::{ImageBackend, NewsApiClient, NewsBackend, OpenAiImageClient};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of callable tools
pub struct ToolRegistry {
    tools: HashMap<String, SharedTool>,
    /// Registration order, used for listing
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// The four standard tools backed by the real HTTP clients
    pub fn from_config(config: &SocialAgentConfig) -> Self {
        Self::standard(
            config,
            Arc::new(NewsApiClient::from_config(&config.news)),
            Arc::new(OpenAiImageClient::from_config(&config.image)),
        )
    }

    /// The four standard tools with the given backends
    pub fn standard(
        config: &SocialAgentConfig,
        news: Arc<dyn NewsBackend>,
        images: Arc<dyn ImageBackend>,
    ) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(WeatherTool::default()));
        registry.register(Arc::new(
            NewsTool::new(news, config.news.credential().map(str::to_string))
                .with_language(&config.news.language),
        ));
        registry.register(Arc::new(JokesTool::default()));
        registry.register(Arc::new(ImageTool::new(
            images,
            config.image.credential().map(str::to_string),
            config.image.output_dir.clone(),
        )));

        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: SharedTool) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<SharedTool> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Specs of every registered tool, in registration order
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.spec())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke a tool by name
    ///
    /// Only an unknown name is an `Err`; tool failures come back as error
    /// results.
    pub fn invoke(&self, name: &str, args: &Value) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| AgentError::not_found(format!("Tool '{}'", name)))?;
        Ok(tool.invoke(args))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ImageRequest, NewsQuery, ProviderError};
    use crate::tools::{GENERATE_IMAGE, GET_JOKES, GET_NEWS, GET_WEATHER};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct NoNetwork;

    impl NewsBackend for NoNetwork {
        fn search(&self, _query: &NewsQuery, _api_key: &str) -> std::result::Result<String, ProviderError> {
            Err(ProviderError::Connection("offline".into()))
        }
    }

    impl ImageBackend for NoNetwork {
        fn generate(
            &self,
            _request: &ImageRequest,
            _api_key: &str,
        ) -> std::result::Result<String, ProviderError> {
            Err(ProviderError::Connection("offline".into()))
        }

        fn download(&self, _url: &str) -> std::result::Result<Vec<u8>, ProviderError> {
            Err(ProviderError::Connection("offline".into()))
        }
    }

    fn offline_registry(config: &SocialAgentConfig) -> ToolRegistry {
        ToolRegistry::standard(config, Arc::new(NoNetwork), Arc::new(NoNetwork))
    }

    #[test]
    fn test_standard_registry() {
        let registry = offline_registry(&SocialAgentConfig::default());
        assert_eq!(
            registry.names(),
            vec![GET_WEATHER, GET_NEWS, GET_JOKES, GENERATE_IMAGE]
        );
        assert_eq!(registry.len(), 4);

        let spec_names: Vec<String> = registry.specs().into_iter().map(|s| s.name).collect();
        assert_eq!(spec_names, vec![GET_WEATHER, GET_NEWS, GET_JOKES, GENERATE_IMAGE]);
    }

    #[test]
    fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        let err = registry.invoke("get_horoscope", &json!({})).unwrap_err();
        assert!(matches!(err, AgentError::NotFound(_)));
    }

    #[test]
    fn test_invoke_dispatches_by_name() {
        let registry = offline_registry(&SocialAgentConfig::default());
        let result = registry
            .invoke(GET_WEATHER, &json!({"city": "Sydney"}))
            .unwrap();
        assert_eq!(result.get_str("conditions"), Some("clear and sunny"));
    }

    #[test]
    fn test_missing_credentials_surface_as_tool_errors() {
        let registry = offline_registry(&SocialAgentConfig::default());

        let news = registry.invoke(GET_NEWS, &json!({"topic": "ai"})).unwrap();
        assert!(news.error_message().unwrap().contains("NEWS_API_KEY"));

        let image = registry
            .invoke(GENERATE_IMAGE, &json!({"prompt": "a cat"}))
            .unwrap();
        assert!(image.error_message().unwrap().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_configured_credentials_reach_backends() {
        let mut config = SocialAgentConfig::default();
        config.news.api_key = Some("news-key".into());

        let registry = offline_registry(&config);
        let news = registry.invoke(GET_NEWS, &json!({"topic": "ai"})).unwrap();
        assert!(news.error_message().unwrap().starts_with("Network error: "));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(WeatherTool::default()));
        registry.register(Arc::new(WeatherTool::default()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec![GET_WEATHER]);
    }
}
