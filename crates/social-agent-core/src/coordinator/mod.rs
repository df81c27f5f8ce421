//! Request coordination
//!
//! Routes free-text requests to the four specialist tools:
//! - Weather: current conditions for a city
//! - Social media: news articles as material for posts
//! - Jokes: random jokes from a category
//! - Image: text-to-image generation
//!
//! # Example
//!
//! ```no_run
//! use social_agent_core::config::SocialAgentConfig;
//! use social_agent_core::coordinator::{Coordinator, OpenAiSelector};
//! use social_agent_core::tools::ToolRegistry;
//!
//! let config = SocialAgentConfig::default();
//! let selector = OpenAiSelector::new(&config.coordinator, &config.identity).unwrap();
//! let coordinator = Coordinator::new(ToolRegistry::from_config(&config), selector);
//!
//! let turn = coordinator.handle("What's the weather in London?").unwrap();
//! println!("{:?}", turn);
//! ```

mod openai;
mod selector;
mod service;
mod types;

pub use openai::{parse_chat_message, system_prompt, OpenAiSelector};
pub use selector::{parse_selection_content, ToolSelector};
pub use service::Coordinator;
pub use types::{Delegate, Selection, Turn};
