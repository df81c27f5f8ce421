//! Error types for social-agent core
//!
//! Everything outside the tool boundary reports through [`AgentError`].
//! Tools themselves never fail with an `Err`: they return a
//! [`ToolResult`](crate::tools::ToolResult) carrying an `error_message`.

use thiserror::Error;

/// Result type for social-agent core operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Unified error type for social-agent core
#[derive(Error, Debug)]
pub enum AgentError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Language model (coordinator) error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl AgentError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        AgentError::Config(msg.into())
    }

    /// Create an LLM error
    pub fn llm(msg: impl Into<String>) -> Self {
        AgentError::Llm(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        AgentError::NotFound(msg.into())
    }

    /// Create an invalid operation error
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        AgentError::InvalidOperation(msg.into())
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(err.to_string())
    }
}

impl From<crate::provider::ProviderError> for AgentError {
    fn from(err: crate::provider::ProviderError) -> Self {
        AgentError::Llm(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_format() {
        assert_eq!(
            AgentError::config("missing key").to_string(),
            "Configuration error: missing key"
        );
        assert_eq!(
            AgentError::not_found("tool 'x'").to_string(),
            "Not found: tool 'x'"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let agent_err: AgentError = err.into();
        assert!(matches!(agent_err, AgentError::Serialization(_)));
    }

    #[test]
    fn test_toml_errors_arrive_through_config_error() {
        let err = toml::from_str::<toml::Value>("identity = [").unwrap_err();
        let agent_err: AgentError = crate::config::ConfigError::from(err).into();
        match agent_err {
            AgentError::Config(msg) => assert!(msg.starts_with("Failed to parse config: ")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
