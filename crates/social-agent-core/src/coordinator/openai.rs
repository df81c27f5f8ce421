//! OpenAI-compatible tool selector
//!
//! Sends the request with the tool specs to a chat-completions endpoint and
//! reads back either a native tool call or plain content.

use super::selector::{parse_selection_content, ToolSelector};
use super::types::{Delegate, Selection, Turn};
use crate::config::{CoordinatorConfig, IdentityConfig};
use crate::error::{AgentError, Result};
use crate::provider::ProviderError;
use crate::tools::ToolSpec;
use serde_json::{json, Value};
use std::time::Duration;

const COORDINATOR_PROMPT: &str = r#"
You are the coordinator for a team of specialized agents: weather, social media, jokes and image generation.
Route every request to the right specialist by calling exactly one of the available tools, or answer directly
when no tool fits (greetings, clarifying questions, general chat).

If no native tool calling is available, respond with a strict JSON object (no markdown formatting):
{"tool": "<tool name>", "arguments": { ... }}

Always be helpful and conversational in your final answers.
"#;

/// Full system prompt: routing rules plus each specialist's instructions
pub fn system_prompt() -> String {
    let mut prompt = COORDINATOR_PROMPT.trim().to_string();
    prompt.push_str("\n\nSpecialists:\n");
    for delegate in Delegate::ALL {
        prompt.push_str(&format!(
            "- {} ({}): {}\n",
            delegate.display_name(),
            delegate.tool(),
            delegate.instructions()
        ));
    }
    prompt
}

/// Chat-completions backed [`ToolSelector`]
pub struct OpenAiSelector {
    client: ureq::Agent,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    /// Sent as the `user` field for provider-side attribution
    user: String,
}

impl OpenAiSelector {
    /// Fails when no coordinator API key is configured
    pub fn new(config: &CoordinatorConfig, identity: &IdentityConfig) -> Result<Self> {
        let api_key = config.credential().ok_or_else(|| {
            AgentError::config(
                "Coordinator API key not set. Set OPENAI_API_KEY or [coordinator].api_key",
            )
        })?;

        Ok(Self {
            client: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build(),
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            user: identity.user_id.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, messages: Vec<Value>, tools: &[ToolSpec]) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "user": self.user,
        });

        if !tools.is_empty() {
            body["tools"] = Value::Array(tools.iter().map(ToolSpec::to_openai).collect());
            body["tool_choice"] = Value::String("auto".to_string());
        }

        body
    }

    /// Send a chat request and return the first choice's message
    fn chat(&self, body: &Value) -> Result<Value> {
        tracing::debug!(model = %self.model, "calling chat completions");

        let response = self
            .client
            .post(&format!("{}/chat/completions", self.base_url))
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body)
            .map_err(ProviderError::from)?;

        let json: Value = response
            .into_json()
            .map_err(|e| AgentError::llm(e.to_string()))?;

        json.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .cloned()
            .ok_or_else(|| AgentError::llm("Invalid chat completion response"))
    }
}

/// Read a selection out of a chat-completion message
pub fn parse_chat_message(message: &Value) -> Result<Selection> {
    if let Some(call) = message
        .get("tool_calls")
        .and_then(|c| c.as_array())
        .and_then(|calls| calls.first())
    {
        let function = call
            .get("function")
            .ok_or_else(|| AgentError::llm("Tool call without function"))?;
        let name = function
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| AgentError::llm("Tool call without name"))?;

        // arguments normally arrive as a JSON-encoded string
        let arguments = match function.get("arguments") {
            Some(Value::String(raw)) if raw.trim().is_empty() => json!({}),
            Some(Value::String(raw)) => serde_json::from_str(raw).map_err(|e| {
                AgentError::llm(format!("Malformed arguments for tool '{}': {}", name, e))
            })?,
            Some(other) => other.clone(),
            None => json!({}),
        };

        return Ok(Selection::Invoke {
            name: name.to_string(),
            arguments,
            call_id: call.get("id").and_then(|i| i.as_str()).map(str::to_string),
        });
    }

    message
        .get("content")
        .and_then(|c| c.as_str())
        .map(parse_selection_content)
        .ok_or_else(|| AgentError::llm("Empty chat completion message"))
}

/// Messages that replay a finished tool call for the final answer
fn summary_messages(request: &str, turn: &Turn) -> Option<Vec<Value>> {
    let Turn::ToolCall {
        call_id,
        name,
        arguments,
        result,
    } = turn
    else {
        return None;
    };

    let mut messages = vec![
        json!({"role": "system", "content": system_prompt()}),
        json!({"role": "user", "content": request}),
    ];

    let result_json = result.to_json().to_string();
    match call_id {
        Some(id) => {
            messages.push(json!({
                "role": "assistant",
                "content": Value::Null,
                "tool_calls": [{
                    "id": id,
                    "type": "function",
                    "function": {"name": name, "arguments": arguments.to_string()}
                }]
            }));
            messages.push(json!({"role": "tool", "tool_call_id": id, "content": result_json}));
        }
        None => {
            messages.push(json!({
                "role": "user",
                "content": format!(
                    "The {} tool returned: {}\nAnswer my original request using this result.",
                    name, result_json
                )
            }));
        }
    }

    Some(messages)
}

impl ToolSelector for OpenAiSelector {
    fn select(&self, request: &str, tools: &[ToolSpec]) -> Result<Selection> {
        let messages = vec![
            json!({"role": "system", "content": system_prompt()}),
            json!({"role": "user", "content": request}),
        ];
        let message = self.chat(&self.request_body(messages, tools))?;
        parse_chat_message(&message)
    }

    fn summarize(&self, request: &str, turn: &Turn) -> Result<Option<String>> {
        let Some(messages) = summary_messages(request, turn) else {
            return Ok(None);
        };

        let message = self.chat(&self.request_body(messages, &[]))?;
        Ok(message
            .get("content")
            .and_then(|c| c.as_str())
            .map(str::to_string))
    }
}
