//! Tool registry - manages and dispatches tool calls
//!
//! Central hub for registering tools and routing tool calls to handlers.
//! Tool failures come back as failed [`ToolResult`]s so the agent can see
//! them; only infrastructure errors are returned as `Err`.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

use crate::core::{ComputerError, Config, Result, ToolResult};
use crate::tools::computer::ComputerTool;
use crate::tools::traits::Tool;

/// Registry of available tools
#[derive(Default)]
pub struct ToolRegistry {
    /// Tools indexed by name
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the native computer tool
    pub fn with_computer(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(ComputerTool::new(config)?));
        Ok(registry)
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Parameters of every tool, for the agent's tool list
    pub fn all_params(&self) -> Vec<Value> {
        self.tools.values().map(|tool| tool.to_params()).collect()
    }

    /// Execute a tool call
    pub async fn run(&self, name: &str, input: Value) -> Result<ToolResult> {
        let Some(tool) = self.tools.get(name) else {
            warn!(tool = name, "call to unknown tool");
            return Ok(ToolResult::failure(
                ComputerError::UnknownTool(name.to_string()).to_string(),
            ));
        };

        match tool.call(input).await {
            Ok(result) => Ok(result),
            Err(e) if e.is_tool_failure() => {
                warn!(tool = name, error = %e, "tool call failed");
                Ok(ToolResult::failure(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
