//! Coordinator service
//!
//! Routes one request per turn: ask the selector, run the chosen tool,
//! hand back the outcome. Nothing is retried.

use super::selector::ToolSelector;
use super::types::{Selection, Turn};
use crate::error::{AgentError, Result};
use crate::tools::ToolRegistry;

/// Couples a tool registry with a selector
pub struct Coordinator<S: ToolSelector> {
    registry: ToolRegistry,
    selector: S,
}

impl<S: ToolSelector> Coordinator<S> {
    pub fn new(registry: ToolRegistry, selector: S) -> Self {
        Self { registry, selector }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Handle one free-text request
    pub fn handle(&self, request: &str) -> Result<Turn> {
        let request = request.trim();
        if request.is_empty() {
            return Err(AgentError::invalid_operation("Empty request"));
        }

        match self.selector.select(request, &self.registry.specs())? {
            Selection::Reply(text) => Ok(Turn::Reply(text)),
            Selection::Invoke {
                name,
                arguments,
                call_id,
            } => {
                tracing::info!(tool = %name, "delegating request");
                let result = self.registry.invoke(&name, &arguments)?;
                Ok(Turn::ToolCall {
                    call_id,
                    name,
                    arguments,
                    result,
                })
            }
        }
    }

    /// Final answer for a handled turn, if the selector provides one
    pub fn summarize(&self, request: &str, turn: &Turn) -> Result<Option<String>> {
        match turn {
            Turn::Reply(text) => Ok(Some(text.clone())),
            Turn::ToolCall { .. } => self.selector.summarize(request.trim(), turn),
        }
    }
}
