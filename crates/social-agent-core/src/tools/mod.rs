//! Tool layer
//!
//! Four single-purpose tools sharing one contract: validate the arguments,
//! make at most one external call, and answer with a [`ToolResult`]. Tools
//! never return `Err`; every failure becomes an `error` result.

pub(crate) mod args;
mod image;
mod jokes;
mod news;
mod registry;
mod result;
mod weather;

pub use image::{
    image_filename, ImageTool, DEFAULT_QUALITY, DEFAULT_SIZE, GENERATE_IMAGE, VALID_QUALITIES,
    VALID_SIZES,
};
pub use jokes::{
    Joke, JokeSource, JokesTool, StaticJokeBook, DEFAULT_CATEGORY, GET_JOKES, MAX_COUNT, MIN_COUNT,
};
pub use news::{Article, NewsTool, DEFAULT_MAX_ARTICLES, GET_NEWS, MAX_PAGE_SIZE};
pub use registry::ToolRegistry;
pub use result::{Echo, ToolResult, ToolStatus};
pub use weather::{StaticWeatherTable, WeatherReport, WeatherSource, WeatherTool, GET_WEATHER};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Name, description and JSON-schema parameters of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSpec {
    pub fn new(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }

    /// OpenAI function-calling form
    pub fn to_openai(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// A callable capability exposed to the coordinator
pub trait Tool: Send + Sync {
    /// Unique tool name
    fn name(&self) -> &str;

    fn spec(&self) -> ToolSpec;

    /// Run the tool on untyped JSON arguments
    fn invoke(&self, args: &Value) -> ToolResult;
}

/// Shared reference to a tool
pub type SharedTool = Arc<dyn Tool>;

/// Lookup key for static tables: lowercase with all whitespace removed
pub(crate) fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn offline_tools() -> Vec<SharedTool> {
        vec![
            Arc::new(WeatherTool::default()),
            Arc::new(JokesTool::default()),
        ]
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("New York"), "newyork");
        assert_eq!(normalize_key("  NEW\tyork "), "newyork");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_spec_to_openai() {
        let spec = ToolSpec::new("get_weather", "Weather", json!({"type": "object"}));
        assert_eq!(
            spec.to_openai(),
            json!({
                "type": "function",
                "function": {
                    "name": "get_weather",
                    "description": "Weather",
                    "parameters": {"type": "object"}
                }
            })
        );
    }

    #[test]
    fn test_spec_name_matches_tool_name() {
        for tool in offline_tools() {
            assert_eq!(tool.spec().name, tool.name());
            assert_eq!(tool.spec().parameters["type"], "object");
        }
    }

    #[test]
    fn test_exactly_one_of_payload_or_error() {
        let calls = [
            json!({"city": "Paris"}),
            json!({"city": "Atlantis"}),
            json!({"city": ""}),
            json!({"category": "dad", "count": 2}),
            json!({"category": "unknown"}),
            json!({"count": 99}),
            json!("not an object"),
        ];

        for tool in offline_tools() {
            for args in &calls {
                let result = tool.invoke(args);
                let has_error = result.error_message().is_some();
                assert_eq!(has_error, result.is_error(), "{} {}", tool.name(), args);

                let json = result.to_json();
                let status = json["status"].as_str().unwrap();
                assert!(status == "success" || status == "error");
            }
        }
    }

    #[test]
    fn test_echo_present_on_both_outcomes() {
        let weather = WeatherTool::default();
        for city in ["Tokyo", "Nowhere", ""] {
            assert_eq!(weather.get_weather(city).get_str("city"), Some(city));
        }

        let jokes = JokesTool::default();
        for (category, count) in [("science", 1), ("science", 0), ("nope", 2)] {
            let result = jokes.get_jokes(category, count);
            assert_eq!(result.get_str("category"), Some(category));
            assert!(result.get("count").and_then(Value::as_i64).is_some());
        }
    }
}
