//! Normalized tool results
//!
//! A [`ToolResult`] is either a success carrying tool-specific payload fields
//! or an error carrying `error_message`, never both. Echo fields (the request
//! parameters as supplied) are present in both cases.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Outcome of a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Success => "success",
            ToolStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request parameters echoed back on every result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Echo(Map<String, Value>);

impl Echo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }
}

/// The normalized success/error mapping every tool returns
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    status: ToolStatus,
    fields: Map<String, Value>,
}

impl ToolResult {
    /// Build a success result from the echo fields and a payload that
    /// serializes to a JSON object. Payload keys win over echo keys.
    pub fn success(echo: Echo, payload: &impl serde::Serialize) -> Self {
        match serde_json::to_value(payload) {
            Ok(Value::Object(payload)) => {
                let mut fields = echo.0;
                fields.extend(payload);
                fields.remove("error_message");
                Self {
                    status: ToolStatus::Success,
                    fields,
                }
            }
            Ok(other) => Self::error(
                echo,
                format!("Unexpected error: tool payload is not an object: {}", other),
            ),
            Err(e) => Self::error(echo, format!("Unexpected error: {}", e)),
        }
    }

    /// Build an error result from the echo fields and a human-readable message
    pub fn error(echo: Echo, message: impl Into<String>) -> Self {
        let mut fields = echo.0;
        fields.insert("error_message".to_string(), Value::String(message.into()));
        Self {
            status: ToolStatus::Error,
            fields,
        }
    }

    pub fn status(&self) -> ToolStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }

    /// Look up any field (echo, payload, or `error_message`)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up a string field
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.get_str("error_message")
    }

    /// Field names other than `status`
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The full mapping, `status` included
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len() + 1);
        map.insert(
            "status".to_string(),
            Value::String(self.status.as_str().to_string()),
        );
        map.extend(self.fields.clone());
        Value::Object(map)
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("status", &self.status)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
