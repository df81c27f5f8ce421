//! Social Agent Core - tool layer and coordination for social-agent
//!
//! This crate provides the UI-agnostic functionality:
//! - Tools (weather, news, jokes, image generation) with one result contract
//! - Provider clients (NewsAPI, OpenAI images) behind backend traits
//! - Tool registry and the coordinator seam for a language model router
//! - Configuration loading
//!
//! Any front end (CLI, chat bot, server) can consume this crate through
//! [`Coordinator`] or by calling tools from a [`ToolRegistry`] directly.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  request   ┌─────────────┐  select   ┌──────────────┐
//! │  Front end   │ ─────────→ │ Coordinator │ ────────→ │ ToolSelector │
//! │              │ ←───────── │             │           └──────────────┘
//! └──────────────┘   Turn     │             │  invoke   ┌──────────────┐
//!                             │             │ ────────→ │ ToolRegistry │
//!                             └─────────────┘           └──────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use social_agent_core::{SocialAgentConfig, ToolRegistry};
//! use serde_json::json;
//!
//! let registry = ToolRegistry::from_config(&SocialAgentConfig::default());
//! let result = registry.invoke("get_weather", &json!({"city": "Paris"})).unwrap();
//! println!("{}", result.to_json());
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod provider;
pub mod tools;

// Re-export commonly used types
pub use error::{AgentError, Result};

// Re-export config types
pub use config::{CoordinatorConfig, IdentityConfig, ImageConfig, NewsConfig, SocialAgentConfig};

// Re-export provider types
pub use provider::{ImageBackend, NewsBackend, ProviderError};

// Re-export tool types
pub use tools::{
    ImageTool, JokesTool, NewsTool, SharedTool, Tool, ToolRegistry, ToolResult, ToolSpec,
    ToolStatus, WeatherTool,
};

// Re-export coordinator types
pub use coordinator::{Coordinator, Delegate, OpenAiSelector, Selection, ToolSelector, Turn};

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
