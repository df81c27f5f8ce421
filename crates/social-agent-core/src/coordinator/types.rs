//! Coordinator types
//!
//! Defines what a selector decides and what one coordinator turn produces.

use crate::tools::{ToolResult, GENERATE_IMAGE, GET_JOKES, GET_NEWS, GET_WEATHER};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Specialist roles the coordinator delegates to, one per tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delegate {
    Weather,
    SocialMedia,
    Jokes,
    Image,
}

impl Delegate {
    pub const ALL: [Delegate; 4] = [
        Delegate::Weather,
        Delegate::SocialMedia,
        Delegate::Jokes,
        Delegate::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Delegate::Weather => "weather",
            Delegate::SocialMedia => "social_media",
            Delegate::Jokes => "jokes",
            Delegate::Image => "image",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Delegate::Weather => "Weather Agent",
            Delegate::SocialMedia => "Social Media Agent",
            Delegate::Jokes => "Jokes Agent",
            Delegate::Image => "Image Agent",
        }
    }

    /// The tool this role works through
    pub fn tool(&self) -> &'static str {
        match self {
            Delegate::Weather => GET_WEATHER,
            Delegate::SocialMedia => GET_NEWS,
            Delegate::Jokes => GET_JOKES,
            Delegate::Image => GENERATE_IMAGE,
        }
    }

    /// How the role presents its tool's results
    pub fn instructions(&self) -> &'static str {
        match self {
            Delegate::Weather => {
                "Weather questions: call get_weather and present the report conversationally. \
                 If the city is unknown, say so and suggest another city."
            }
            Delegate::SocialMedia => {
                "Social media content or news summaries: call get_news for the topic, then \
                 write engaging posts from the articles, one per platform (Twitter/X under 280 \
                 characters, LinkedIn professional, Instagram with hashtags, Facebook \
                 conversational). Cite sources."
            }
            Delegate::Jokes => {
                "Jokes and entertainment: call get_jokes (categories: programming, dad, \
                 science, general, office; count 1-5) and deliver each joke with its punchline."
            }
            Delegate::Image => {
                "Image generation: call generate_image with a detailed prompt (sizes \
                 1024x1024, 1792x1024, 1024x1792; quality standard or hd). Report the image \
                 URL and local path, and mention any download problem."
            }
        }
    }

    pub fn for_tool(name: &str) -> Option<Delegate> {
        Self::ALL.into_iter().find(|d| d.tool() == name)
    }
}

/// What the selector decided to do with a request
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Call a tool with these arguments
    Invoke {
        name: String,
        arguments: Value,
        /// Provider-assigned call id, when the selector used native tool calls
        call_id: Option<String>,
    },
    /// Answer directly without a tool
    Reply(String),
}

/// Outcome of one coordinator turn
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    Reply(String),
    ToolCall {
        call_id: Option<String>,
        name: String,
        arguments: Value,
        result: ToolResult,
    },
}

impl Turn {
    /// The role that handled the turn, if a tool was called
    pub fn delegate(&self) -> Option<Delegate> {
        match self {
            Turn::Reply(_) => None,
            Turn::ToolCall { name, .. } => Delegate::for_tool(name),
        }
    }

    pub fn result(&self) -> Option<&ToolResult> {
        match self {
            Turn::Reply(_) => None,
            Turn::ToolCall { result, .. } => Some(result),
        }
    }
}
