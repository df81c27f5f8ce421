//! Weather tool
//!
//! Looks a city up in a [`WeatherSource`]. The bundled [`StaticWeatherTable`]
//! covers five cities; no network call is made.

use super::args::{Arg, Args};
use super::{normalize_key, Echo, Tool, ToolResult, ToolSpec};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const GET_WEATHER: &str = "get_weather";

const INVALID_CITY: &str = "Invalid city name provided. Please provide a valid city name.";

/// Success payload of the weather tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub report: String,
    pub temperature: String,
    pub conditions: String,
}

/// Source of weather reports keyed by normalized city name
pub trait WeatherSource: Send + Sync {
    /// `key` is already lowercased with whitespace removed
    fn lookup(&self, key: &str) -> Option<WeatherReport>;
}

const STATIC_WEATHER: [(&str, &str, &str, &str); 5] = [
    (
        "newyork",
        "The weather in New York is sunny with a temperature of 25°C.",
        "25°C",
        "sunny",
    ),
    (
        "london",
        "It's cloudy in London with a temperature of 15°C.",
        "15°C",
        "cloudy",
    ),
    (
        "tokyo",
        "Tokyo is experiencing light rain and a temperature of 18°C.",
        "18°C",
        "light rain",
    ),
    (
        "paris",
        "Paris has partly cloudy skies with a temperature of 22°C.",
        "22°C",
        "partly cloudy",
    ),
    (
        "sydney",
        "Sydney is clear and sunny with a temperature of 28°C.",
        "28°C",
        "clear and sunny",
    ),
];

/// Fixed in-memory weather table
#[derive(Debug, Clone, Default)]
pub struct StaticWeatherTable;

impl WeatherSource for StaticWeatherTable {
    fn lookup(&self, key: &str) -> Option<WeatherReport> {
        STATIC_WEATHER
            .iter()
            .find(|(city, ..)| *city == key)
            .map(|(_, report, temperature, conditions)| WeatherReport {
                report: report.to_string(),
                temperature: temperature.to_string(),
                conditions: conditions.to_string(),
            })
    }
}

/// `get_weather` tool
pub struct WeatherTool {
    source: Arc<dyn WeatherSource>,
}

impl WeatherTool {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    /// Current weather report for `city`
    pub fn get_weather(&self, city: &str) -> ToolResult {
        tracing::info!(tool = GET_WEATHER, city = %city, "tool called");

        let echo = Echo::new().with("city", city);
        if city.trim().is_empty() {
            return ToolResult::error(echo, INVALID_CITY);
        }

        match self.source.lookup(&normalize_key(city)) {
            Some(report) => ToolResult::success(echo, &report),
            None => ToolResult::error(
                echo,
                format!(
                    "Sorry, I don't have weather information for '{}'. Please try another city.",
                    city
                ),
            ),
        }
    }
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new(Arc::new(StaticWeatherTable))
    }
}

impl Tool for WeatherTool {
    fn name(&self) -> &str {
        GET_WEATHER
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            GET_WEATHER,
            "Retrieves the current weather report (report sentence, temperature and \
             conditions) for a named city.",
            json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "The name of the city, e.g. \"New York\", \"London\", \"Tokyo\"."
                    }
                },
                "required": ["city"]
            }),
        )
    }

    fn invoke(&self, args: &Value) -> ToolResult {
        let args = Args::new(args);
        match args.str("city") {
            Arg::Present(city) => self.get_weather(city),
            Arg::Missing | Arg::WrongType => {
                ToolResult::error(Echo::new().with("city", args.raw("city")), INVALID_CITY)
            }
        }
    }
}
