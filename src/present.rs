//! Plain-text rendering of tool results

use social_agent_core::tools::{Article, Joke, GENERATE_IMAGE, GET_JOKES, GET_NEWS, GET_WEATHER};
use social_agent_core::{ToolResult, Turn};
use serde_json::Value;

/// Render one turn for the terminal
pub fn render_turn(turn: &Turn) -> String {
    match turn {
        Turn::Reply(text) => text.clone(),
        Turn::ToolCall { name, result, .. } => match turn.delegate() {
            Some(delegate) => format!("[{}]\n{}", delegate.display_name(), render(name, result)),
            None => render(name, result),
        },
    }
}

/// Render a tool result as human-readable text
pub fn render(tool: &str, result: &ToolResult) -> String {
    if let Some(message) = result.error_message() {
        return format!("Error: {}", message);
    }

    match tool {
        GET_WEATHER => result.get_str("report").unwrap_or_default().to_string(),
        GET_JOKES => render_jokes(result),
        GET_NEWS => render_news(result),
        GENERATE_IMAGE => render_image(result),
        _ => serde_json::to_string_pretty(&result.to_json()).unwrap_or_default(),
    }
}

fn field<T: serde::de::DeserializeOwned>(result: &ToolResult, key: &str) -> Option<T> {
    result
        .get(key)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
}

fn render_jokes(result: &ToolResult) -> String {
    let jokes: Vec<Joke> = field(result, "jokes").unwrap_or_default();
    jokes
        .iter()
        .enumerate()
        .map(|(i, joke)| format!("{}. {}\n   {}", i + 1, joke.joke, joke.punchline))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_news(result: &ToolResult) -> String {
    let articles: Vec<Article> = field(result, "articles").unwrap_or_default();
    let total_available = result
        .get("total_available")
        .and_then(Value::as_u64)
        .unwrap_or_default();

    let mut lines = vec![format!(
        "{} of {} matching articles",
        articles.len(),
        total_available
    )];
    for article in &articles {
        lines.push(format!(
            "- {} ({}, {})",
            article.title, article.source, article.published_at
        ));
        if !article.url.is_empty() {
            lines.push(format!("  {}", article.url));
        }
    }
    lines.join("\n")
}

fn render_image(result: &ToolResult) -> String {
    let url = result.get_str("image_url").unwrap_or_default();
    match result.get_str("local_path") {
        Some(path) => format!("Image: {}\nSaved to: {}", url, path),
        None => format!(
            "Image: {}\nNot saved locally: {}",
            url,
            result.get_str("download_error").unwrap_or("unknown error")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use social_agent_core::tools::{Echo, WeatherTool};
    use serde_json::json;

    #[test]
    fn test_render_error() {
        let result = ToolResult::error(Echo::new().with("city", "x"), "Unknown city");
        assert_eq!(render(GET_WEATHER, &result), "Error: Unknown city");
    }

    #[test]
    fn test_render_weather() {
        let result = WeatherTool::default().get_weather("Paris");
        assert_eq!(
            render(GET_WEATHER, &result),
            "Paris has partly cloudy skies with a temperature of 22°C."
        );
    }

    #[test]
    fn test_render_jokes() {
        let payload = json!({
            "jokes": [{"joke": "Why?", "punchline": "Because."}],
            "count": 1
        });
        let result = ToolResult::success(Echo::new(), &payload);
        assert_eq!(render(GET_JOKES, &result), "1. Why?\n   Because.");
    }

    #[test]
    fn test_render_news() {
        let payload = json!({
            "total_results": 1,
            "total_available": 40,
            "articles": [{
                "title": "Headline",
                "description": "d",
                "url": "https://example.com",
                "published_at": "2024-01-15",
                "source": "Wire",
                "author": "A",
                "content": ""
            }]
        });
        let result = ToolResult::success(Echo::new().with("topic", "ai"), &payload);
        assert_eq!(
            render(GET_NEWS, &result),
            "1 of 40 matching articles\n- Headline (Wire, 2024-01-15)\n  https://example.com"
        );
    }

    #[test]
    fn test_render_image_partial_success() {
        let payload = json!({
            "image_url": "https://img",
            "local_path": null,
            "download_error": "timed out"
        });
        let result = ToolResult::success(Echo::new(), &payload);
        assert_eq!(
            render(GENERATE_IMAGE, &result),
            "Image: https://img\nNot saved locally: timed out"
        );
    }

    #[test]
    fn test_render_turn_labels_delegate() {
        let turn = Turn::ToolCall {
            call_id: None,
            name: GET_WEATHER.into(),
            arguments: json!({"city": "Tokyo"}),
            result: WeatherTool::default().get_weather("Tokyo"),
        };
        assert!(render_turn(&turn).starts_with("[Weather Agent]\n"));
        assert_eq!(render_turn(&Turn::Reply("hi".into())), "hi");
    }
}
