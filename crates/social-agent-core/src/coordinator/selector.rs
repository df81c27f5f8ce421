//! Tool selection seam
//!
//! A [`ToolSelector`] turns a free-text request into either a tool call or a
//! direct reply. The coordinator never inspects the request itself.

use super::types::{Selection, Turn};
use crate::error::Result;
use crate::tools::ToolSpec;
use serde_json::{Map, Value};

/// Picks a tool (and its arguments) for a request
pub trait ToolSelector: Send + Sync {
    fn select(&self, request: &str, tools: &[ToolSpec]) -> Result<Selection>;

    /// Phrase a final answer from a completed tool call
    ///
    /// `None` means the selector has nothing to add and the caller should
    /// present the tool result itself.
    fn summarize(&self, _request: &str, _turn: &Turn) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Parse a plain-text selector answer
///
/// Accepts a JSON object `{"tool": "...", "arguments": {...}}`, optionally
/// inside a markdown code fence. Anything else is a direct reply.
pub fn parse_selection_content(content: &str) -> Selection {
    let clean_content = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let Ok(json) = serde_json::from_str::<Value>(clean_content) else {
        return Selection::Reply(content.to_string());
    };

    let name = json
        .get("tool")
        .or_else(|| json.get("name"))
        .and_then(|v| v.as_str());

    match name {
        Some(name) => Selection::Invoke {
            name: name.to_string(),
            arguments: json
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
            call_id: None,
        },
        None => Selection::Reply(content.to_string()),
    }
}
